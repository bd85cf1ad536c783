//! Request and response payloads for the coaching backend. Field names and
//! shapes follow the wire format exactly; everything optional on the wire is
//! optional here so a thin response never fails to decode.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DnaGene, Gender, HealthTrajectory, MealType, MoodBefore, SocialContext, UserProfile,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: u32,
    pub current_weight: f64,
    pub target_weight: f64,
    pub height: f64,
    pub gender: Gender,
}

/// `POST /api/login` and `POST /api/register` both answer with the identity
/// of the now-authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvancedStats {
    #[serde(default)]
    pub total_analyses: u32,
    #[serde(default)]
    pub badges_earned: u32,
    #[serde(default)]
    pub personality_unlocked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub user: UserProfile,
    #[serde(default)]
    pub advanced_stats: AdvancedStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevolutionaryInsights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction_prediction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_impact: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub obesity_risk: String,
}

/// One complete analysis outcome. Never partially constructed: a failed
/// request synthesizes a complete fallback instance instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub foods_detected: Vec<String>,
    pub nutrition: Nutrition,
    #[serde(default)]
    pub revolutionary_insights: RevolutionaryInsights,
    pub health_assessment: HealthAssessment,
    #[serde(default)]
    pub ai_feedback: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
}

/// `POST /api/analyze-revolutionary` success payload. The flat progression
/// fields are the server-authoritative deltas merged into the cached profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub xp_gained: u64,
    pub new_total_xp: u64,
    pub new_level: String,
    pub streak_days: u32,
    #[serde(default)]
    pub new_badges: Vec<Badge>,
    #[serde(default)]
    pub dna_unlocked: bool,
}

/// Multipart body for the analysis endpoint: raw image bytes plus three
/// context fields.
#[derive(Debug, Clone)]
pub struct AnalysisUpload {
    pub image: Vec<u8>,
    pub filename: String,
    pub meal_type: MealType,
    pub mood_before: MoodBefore,
    pub social_context: SocialContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnaProfile {
    #[serde(default)]
    pub dominant_genes: Vec<DnaGene>,
}

/// `GET /api/food-dna`. `dna_profile` is present iff the usage threshold has
/// been reached; before that only the progress counters are sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodDnaResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dna_profile: Option<DnaProfile>,
    #[serde(default)]
    pub current_analyses: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyses_needed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPrediction {
    #[serde(rename = "1_month")]
    pub one_month: f64,
    #[serde(rename = "3_months")]
    pub three_months: f64,
    #[serde(rename = "6_months")]
    pub six_months: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub weight_prediction: WeightPrediction,
    pub health_trajectory: HealthTrajectory,
}

/// `GET /api/predictive-insights`. Either full predictions or a count of how
/// many more analyses the server needs before it will produce any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Predictions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyses_needed: Option<u32>,
}

/// Error body the backend sends with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
