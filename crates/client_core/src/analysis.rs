//! The meal-analysis workflow: read the picked image, upload it with its
//! context fields, then reconcile the delayed response with local state.
//! Phases advance `Idle -> Reading -> Uploading -> Succeeded | Failed`; a
//! failure always lands a complete fallback result so the consuming view
//! never special-cases a missing one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::{
    domain::{MealType, MoodBefore, SocialContext},
    protocol::{
        AnalysisResult, AnalysisUpload, HealthAssessment, Nutrition, RevolutionaryInsights,
    },
};
use tracing::{debug, info, warn};

use crate::{projector, AppCore, CoreEvent, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Reading,
    Uploading,
    Succeeded,
    Failed,
}

/// A picked image as an explicit asynchronous read with a single suspension
/// point, consumed by the `Reading` phase.
#[async_trait]
pub trait ImageSource: Send + Sync {
    fn filename(&self) -> String;
    async fn read(&self) -> Result<Vec<u8>>;
}

pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "meal.jpg".to_string())
    }

    async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read image {}", self.path.display()))
    }
}

/// Complete result substituted when an analysis fails: zeroed nutrition, a
/// diagnostic placeholder in `foods_detected`, and a single retry
/// suggestion.
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        foods_detected: vec!["Analysis error".to_string()],
        nutrition: Nutrition::default(),
        revolutionary_insights: RevolutionaryInsights::default(),
        health_assessment: HealthAssessment {
            score: 0.0,
            obesity_risk: "Unknown".to_string(),
        },
        ai_feedback: "Error processing analysis. Please try again.".to_string(),
        suggestions: vec!["Check connection and try again".to_string()],
    }
}

impl AppCore {
    /// Runs one analysis end to end. A new call while a prior one is in
    /// flight supersedes it: the superseded run's completion is discarded by
    /// generation check, so the result view only ever reflects one coherent
    /// outcome.
    pub async fn analyze_image(
        self: &Arc<Self>,
        source: &dyn ImageSource,
        mood_before: MoodBefore,
        social_context: SocialContext,
    ) {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.analysis_generation += 1;
            guard.analysis_phase = AnalysisPhase::Reading;
            guard.analysis_result = None;
            guard.loading = true;
            guard.error = None;
            guard.view = View::Analyzing;
            self.emit_state(&guard);
            guard.analysis_generation
        };

        let image = match source.read().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "image read failed");
                let mut guard = self.inner.lock().await;
                if guard.analysis_generation != generation {
                    return;
                }
                guard.analysis_phase = AnalysisPhase::Idle;
                guard.loading = false;
                guard.error = Some(err.to_string());
                self.emit_state(&guard);
                return;
            }
        };

        {
            let mut guard = self.inner.lock().await;
            if guard.analysis_generation != generation {
                return;
            }
            guard.analysis_phase = AnalysisPhase::Uploading;
            self.emit_state(&guard);
        }

        let upload = AnalysisUpload {
            image,
            filename: source.filename(),
            meal_type: MealType::default(),
            mood_before,
            social_context,
        };

        match self.gateway.submit_analysis(upload).await {
            Ok(response) => {
                {
                    let mut guard = self.inner.lock().await;
                    if guard.analysis_generation != generation {
                        debug!("discarding superseded analysis response");
                        return;
                    }
                    guard.analysis_phase = AnalysisPhase::Succeeded;
                    guard.loading = false;
                    guard.analysis_result = Some(response.analysis.clone());
                    if let Some(profile) = guard.profile.as_mut() {
                        projector::merge_profile(
                            profile,
                            &projector::ProfileDelta::from_analysis(&response),
                        );
                    }
                    self.emit_state(&guard);
                }
                info!(
                    xp_gained = response.xp_gained,
                    new_total_xp = response.new_total_xp,
                    "analysis complete"
                );
                self.notify(format!("Analysis complete! +{} XP", response.xp_gained));

                if !response.new_badges.is_empty() {
                    let names: Vec<String> = response
                        .new_badges
                        .iter()
                        .map(|badge| badge.name.clone())
                        .collect();
                    let _ = self.events.send(CoreEvent::BadgesEarned(names));
                }

                // The server flipped the threshold; pull the fresh profile so
                // the DNA view has content the next time it renders.
                if response.dna_unlocked {
                    self.notify("Food DNA profile unlocked!");
                    self.refresh_food_dna().await;
                }
            }
            Err(err) => {
                warn!(error = %err, "analysis failed; substituting fallback result");
                let mut guard = self.inner.lock().await;
                if guard.analysis_generation != generation {
                    debug!("discarding superseded analysis failure");
                    return;
                }
                guard.analysis_phase = AnalysisPhase::Failed;
                guard.loading = false;
                guard.analysis_result = Some(fallback_analysis());
                guard.error = Some(err.to_string());
                self.emit_state(&guard);
            }
        }
    }
}
