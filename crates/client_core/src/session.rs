//! Session lifecycle: startup probe, login, registration, logout. Owns the
//! cached `UserProfile` (via the core state) and drives the view router on
//! auth completions.

use std::sync::Arc;

use shared::protocol::{LoginRequest, RegisterRequest};
use tracing::{debug, info, warn};

use crate::{errors::classify_auth_failure, router, AppCore, ViewAction};

impl AppCore {
    /// Startup probe for an existing backend session. Success seeds the
    /// profile and routes to the dashboard; failure is expected when nobody
    /// is signed in and stays silently on the login view.
    pub async fn bootstrap(self: &Arc<Self>) {
        match self.gateway.fetch_stats().await {
            Ok(stats) => {
                let username = stats.user.username.clone();
                {
                    let mut guard = self.inner.lock().await;
                    guard.profile = Some(stats.user);
                    guard.advanced_stats = Some(stats.advanced_stats);
                    guard.error = None;
                    (guard.view, _) = router::route(guard.view, ViewAction::SubmitSuccess);
                    self.emit_state(&guard);
                }
                info!(username, "restored existing session");
            }
            Err(err) => {
                debug!(error = %err, "no existing session");
            }
        }
    }

    pub async fn login(self: &Arc<Self>, email: &str, password: &str) {
        self.begin_auth_call().await;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.gateway.login(&request).await {
            Ok(response) => {
                let username = response.user.username.clone();
                self.complete_auth_success(response.user).await;
                self.notify(format!("Welcome back, {username}!"));
            }
            Err(err) => self.complete_auth_failure(classify_auth_failure(&err)).await,
        }
    }

    pub async fn register(self: &Arc<Self>, request: RegisterRequest) {
        self.begin_auth_call().await;
        match self.gateway.register(&request).await {
            Ok(response) => {
                let username = response.user.username.clone();
                self.complete_auth_success(response.user).await;
                self.notify(format!("Welcome, {username}! Your journey starts now!"));
            }
            Err(err) => self.complete_auth_failure(classify_auth_failure(&err)).await,
        }
    }

    /// Ends the backend session best-effort and resets all local state. A
    /// failed logout call still clears local state and routes to login.
    pub async fn logout(self: &Arc<Self>) {
        if let Err(err) = self.gateway.logout().await {
            warn!(error = %err, "backend logout failed; clearing local session anyway");
        }
        let mut guard = self.inner.lock().await;
        guard.reset();
        self.emit_state(&guard);
    }

    async fn begin_auth_call(self: &Arc<Self>) {
        let mut guard = self.inner.lock().await;
        guard.loading = true;
        guard.error = None;
        self.emit_state(&guard);
    }

    async fn complete_auth_success(self: &Arc<Self>, user: shared::domain::UserProfile) {
        let mut guard = self.inner.lock().await;
        guard.loading = false;
        guard.error = None;
        guard.profile = Some(user);
        (guard.view, _) = router::route(guard.view, ViewAction::SubmitSuccess);
        self.emit_state(&guard);
    }

    /// Failed credentials keep the current auth view; only the message
    /// changes.
    async fn complete_auth_failure(self: &Arc<Self>, message: String) {
        let mut guard = self.inner.lock().await;
        guard.loading = false;
        guard.error = Some(message);
        self.emit_state(&guard);
    }
}
