//! Pure predicates gating what the DNA and predictions views render. They
//! never drive navigation: both views are always reachable, only their
//! content switches between a progress placeholder and the full profile.

pub const DNA_UNLOCK_THRESHOLD: u32 = 5;

pub fn dna_unlocked(current_analyses: u32) -> bool {
    current_analyses >= DNA_UNLOCK_THRESHOLD
}

/// Progress towards the DNA unlock for the placeholder view, e.g. 3 of 5
/// analyses renders as 60.
pub fn dna_progress_percent(current_analyses: u32) -> u32 {
    (current_analyses * 100 / DNA_UNLOCK_THRESHOLD).min(100)
}

/// Predictions are available once the server stops asking for more analyses.
pub fn predictions_available(analyses_needed: Option<u32>) -> bool {
    analyses_needed.is_none_or(|needed| needed == 0)
}
