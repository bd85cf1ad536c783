use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    #[default]
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MoodBefore {
    Happy,
    #[default]
    Neutral,
    Stressed,
    Sad,
    Excited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SocialContext {
    #[default]
    Alone,
    Family,
    Friends,
    Work,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl MoodBefore {
    pub fn as_str(self) -> &'static str {
        match self {
            MoodBefore::Happy => "happy",
            MoodBefore::Neutral => "neutral",
            MoodBefore::Stressed => "stressed",
            MoodBefore::Sad => "sad",
            MoodBefore::Excited => "excited",
        }
    }
}

impl SocialContext {
    pub fn as_str(self) -> &'static str {
        match self {
            SocialContext::Alone => "alone",
            SocialContext::Family => "family",
            SocialContext::Friends => "friends",
            SocialContext::Work => "work",
        }
    }
}

/// Behavioral categories making up a Food DNA profile. The backend emits
/// these as plain strings; anything outside the known vocabulary maps to
/// `Developing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DnaGene {
    Optimizer,
    Explorer,
    Emotional,
    Social,
    #[serde(other)]
    Developing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTrajectory {
    Improving,
    Concerning,
    Stable,
}

/// Cached user profile. `total_xp`, `level`, and `streak_days` are
/// server-authoritative: the client only ever copies values delivered in a
/// response, it never computes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub streak_days: u32,
}
