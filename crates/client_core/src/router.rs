//! View routing as a pure finite state machine. A user action applied to the
//! current view yields the next view plus the side-effecting commands the
//! transition requires; executing those commands is the orchestrator's job,
//! which keeps every transition testable without a network.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Login,
    Register,
    Dashboard,
    Analyzing,
    Dna,
    Predictions,
    Profile,
}

impl View {
    pub fn is_authenticated(self) -> bool {
        !matches!(self, View::Login | View::Register)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Dashboard,
    Dna,
    Predictions,
    Profile,
}

impl NavTarget {
    fn view(self) -> View {
        match self {
            NavTarget::Dashboard => View::Dashboard,
            NavTarget::Dna => View::Dna,
            NavTarget::Predictions => View::Predictions,
            NavTarget::Profile => View::Profile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Login or registration completed on the backend.
    SubmitSuccess,
    NavigateRegister,
    PickImage,
    AnalysisComplete,
    BackToDashboard,
    NavTap(NavTarget),
    SignOut,
}

/// Side effects a transition asks the orchestrator to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FetchFoodDna,
    FetchPredictions,
    ClearSession,
}

/// The deterministic transition table. Unlisted `(view, action)` pairs stay
/// on the current view with no commands.
pub fn route(view: View, action: ViewAction) -> (View, Vec<Command>) {
    let next = match (view, action) {
        (View::Login, ViewAction::SubmitSuccess) => View::Dashboard,
        (View::Login, ViewAction::NavigateRegister) => View::Register,
        (View::Register, ViewAction::SubmitSuccess) => View::Dashboard,
        (View::Dashboard, ViewAction::PickImage) => View::Analyzing,
        // The analyzing view holds its position when results land; leaving
        // it is an explicit user action.
        (View::Analyzing, ViewAction::AnalysisComplete) => View::Analyzing,
        (View::Analyzing, ViewAction::BackToDashboard) => View::Dashboard,
        (current, ViewAction::NavTap(target)) if current.is_authenticated() => target.view(),
        (View::Profile, ViewAction::SignOut) => View::Login,
        (current, _) => current,
    };
    (next, commands_on_entry(view, next, action))
}

fn commands_on_entry(from: View, to: View, action: ViewAction) -> Vec<Command> {
    if action == ViewAction::SignOut && to == View::Login {
        return vec![Command::ClearSession];
    }
    if from == to {
        return Vec::new();
    }
    match to {
        View::Dna => vec![Command::FetchFoodDna],
        View::Predictions => vec![Command::FetchPredictions],
        _ => Vec::new(),
    }
}
