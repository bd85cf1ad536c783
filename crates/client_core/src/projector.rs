//! Shallow merge of server-delivered profile deltas into the cached
//! `UserProfile`. Fields present in a response overwrite; absent fields keep
//! their local value. The merge is pure, so the orchestrator can apply it
//! under its state lock and no observer ever sees a half-updated profile.

use shared::{domain::UserProfile, protocol::AnalysisResponse};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDelta {
    pub total_xp: Option<u64>,
    pub level: Option<String>,
    pub streak_days: Option<u32>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
}

impl ProfileDelta {
    /// The progression fields an analysis response carries alongside the
    /// result, saving a full profile refetch.
    pub fn from_analysis(response: &AnalysisResponse) -> Self {
        Self {
            total_xp: Some(response.new_total_xp),
            level: Some(response.new_level.clone()),
            streak_days: Some(response.streak_days),
            ..Self::default()
        }
    }
}

pub fn merge_profile(profile: &mut UserProfile, delta: &ProfileDelta) {
    if let Some(total_xp) = delta.total_xp {
        profile.total_xp = total_xp;
    }
    if let Some(level) = &delta.level {
        profile.level = level.clone();
    }
    if let Some(streak_days) = delta.streak_days {
        profile.streak_days = streak_days;
    }
    if let Some(current_weight) = delta.current_weight {
        profile.current_weight = Some(current_weight);
    }
    if let Some(target_weight) = delta.target_weight {
        profile.target_weight = Some(target_weight);
    }
}
