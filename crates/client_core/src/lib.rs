//! Client-side orchestration core for the nutrition coaching app: session
//! lifecycle, the meal-analysis workflow, profile projection, feature
//! unlock predicates, and view routing. The presentation layer drives this
//! core with actions and consumes immutable state snapshots; it never
//! mutates state directly.

use std::sync::Arc;

use anyhow::Result;
use shared::{
    domain::{DnaGene, UserProfile},
    protocol::{AdvancedStats, AnalysisResult, FoodDnaResponse, Predictions, PredictionsResponse},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, warn};

pub mod analysis;
pub mod errors;
pub mod gateway;
pub mod projector;
pub mod router;
pub mod session;
pub mod unlocks;

pub use analysis::{fallback_analysis, AnalysisPhase, FileImageSource, ImageSource};
pub use gateway::{ApiGateway, HttpApiGateway, MissingApiGateway};
pub use router::{Command, NavTarget, View, ViewAction};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Everything a rendering layer needs to draw one frame, captured
/// atomically. Snapshots are emitted on every state change.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub view: View,
    pub error: Option<String>,
    pub loading: bool,
    pub profile: Option<UserProfile>,
    pub advanced_stats: Option<AdvancedStats>,
    pub analysis_phase: AnalysisPhase,
    pub analysis_result: Option<AnalysisResult>,
    pub food_dna: Option<FoodDnaSnapshot>,
    pub predictions: Option<PredictionsSnapshot>,
}

/// Server DNA payload enriched with the unlock predicates the view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodDnaSnapshot {
    pub dominant_genes: Vec<DnaGene>,
    pub current_analyses: u32,
    pub unlocked: bool,
    pub progress_percent: u32,
}

impl From<&FoodDnaResponse> for FoodDnaSnapshot {
    fn from(response: &FoodDnaResponse) -> Self {
        Self {
            dominant_genes: response
                .dna_profile
                .as_ref()
                .map(|profile| profile.dominant_genes.clone())
                .unwrap_or_default(),
            current_analyses: response.current_analyses,
            unlocked: unlocks::dna_unlocked(response.current_analyses),
            progress_percent: unlocks::dna_progress_percent(response.current_analyses),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionsSnapshot {
    pub predictions: Option<Predictions>,
    pub analyses_needed: Option<u32>,
    pub available: bool,
}

impl From<&PredictionsResponse> for PredictionsSnapshot {
    fn from(response: &PredictionsResponse) -> Self {
        Self {
            predictions: response.predictions.clone(),
            analyses_needed: response.analyses_needed,
            available: unlocks::predictions_available(response.analyses_needed),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CoreEvent {
    StateChanged(StateSnapshot),
    /// Transient success toast.
    Notice(String),
    /// Badge names earned by the latest analysis; displayed once, not
    /// persisted client-side.
    BadgesEarned(Vec<String>),
}

pub(crate) struct CoreState {
    pub(crate) view: View,
    pub(crate) error: Option<String>,
    pub(crate) loading: bool,
    pub(crate) profile: Option<UserProfile>,
    pub(crate) advanced_stats: Option<AdvancedStats>,
    pub(crate) analysis_phase: AnalysisPhase,
    pub(crate) analysis_result: Option<AnalysisResult>,
    /// Bumped per analysis run; completions from a superseded run are
    /// discarded before touching state.
    pub(crate) analysis_generation: u64,
    pub(crate) food_dna: Option<FoodDnaSnapshot>,
    pub(crate) predictions: Option<PredictionsSnapshot>,
}

impl CoreState {
    fn initial() -> Self {
        Self {
            view: View::Login,
            error: None,
            loading: false,
            profile: None,
            advanced_stats: None,
            analysis_phase: AnalysisPhase::Idle,
            analysis_result: None,
            analysis_generation: 0,
            food_dna: None,
            predictions: None,
        }
    }

    pub(crate) fn reset(&mut self) {
        let generation = self.analysis_generation;
        *self = Self::initial();
        // Keep counting so a completion from before sign-out stays stale.
        self.analysis_generation = generation;
    }

    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            view: self.view,
            error: self.error.clone(),
            loading: self.loading,
            profile: self.profile.clone(),
            advanced_stats: self.advanced_stats.clone(),
            analysis_phase: self.analysis_phase,
            analysis_result: self.analysis_result.clone(),
            food_dna: self.food_dna.clone(),
            predictions: self.predictions.clone(),
        }
    }
}

/// Single owner of process-wide client state.
pub struct AppCore {
    pub(crate) gateway: Arc<dyn ApiGateway>,
    pub(crate) inner: Mutex<CoreState>,
    pub(crate) events: broadcast::Sender<CoreEvent>,
}

impl AppCore {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            gateway,
            inner: Mutex::new(CoreState::initial()),
            events,
        })
    }

    /// Core wired to a live backend at `server_url`.
    pub fn connect(server_url: &str) -> Result<Arc<Self>> {
        let gateway = HttpApiGateway::new(server_url)?;
        Ok(Self::new(Arc::new(gateway)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<CoreEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> StateSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Applies a user action to the view state machine and runs the commands
    /// the transition produced. View-entry fetches are fire-and-forget: the
    /// view renders its placeholder until the data lands.
    pub async fn apply_action(self: &Arc<Self>, action: ViewAction) {
        let commands = {
            let mut guard = self.inner.lock().await;
            let (next, commands) = router::route(guard.view, action);
            if next != guard.view {
                debug!(from = ?guard.view, to = ?next, "view transition");
                guard.view = next;
            }
            self.emit_state(&guard);
            commands
        };

        for command in commands {
            match command {
                Command::FetchFoodDna => {
                    let core = Arc::clone(self);
                    tokio::spawn(async move { core.refresh_food_dna().await });
                }
                Command::FetchPredictions => {
                    let core = Arc::clone(self);
                    tokio::spawn(async move { core.refresh_predictions().await });
                }
                Command::ClearSession => self.logout().await,
            }
        }
    }

    /// Refetches the Food DNA profile. Fetch failures after login are benign:
    /// the view keeps rendering its placeholder.
    pub async fn refresh_food_dna(self: &Arc<Self>) {
        match self.gateway.fetch_food_dna().await {
            Ok(response) => {
                let mut guard = self.inner.lock().await;
                guard.food_dna = Some(FoodDnaSnapshot::from(&response));
                self.emit_state(&guard);
            }
            Err(err) => warn!(error = %err, "food dna fetch failed"),
        }
    }

    pub async fn refresh_predictions(self: &Arc<Self>) {
        match self.gateway.fetch_predictions().await {
            Ok(response) => {
                let mut guard = self.inner.lock().await;
                guard.predictions = Some(PredictionsSnapshot::from(&response));
                self.emit_state(&guard);
            }
            Err(err) => warn!(error = %err, "predictions fetch failed"),
        }
    }

    pub(crate) fn emit_state(&self, state: &CoreState) {
        let _ = self.events.send(CoreEvent::StateChanged(state.snapshot()));
    }

    pub(crate) fn notify(&self, message: impl Into<String>) {
        let _ = self.events.send(CoreEvent::Notice(message.into()));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
