//! Error surfacing policy for the orchestration core.
//!
//! Four situations, four treatments: bad credentials stay on the auth view
//! with the backend's message; the startup session probe fails silently;
//! analysis transport failures substitute a complete fallback result; and
//! post-login stats fetches fail into a logged placeholder state.

use shared::error::ApiError;

/// Maps raw transport noise on the auth path to something a user can act
/// on. Backend-authored messages (wrong password, taken email) pass through
/// untouched.
pub fn classify_auth_failure(err: &ApiError) -> String {
    let lower = err.message.to_ascii_lowercase();
    if lower.contains("connection refused")
        || lower.contains("error sending request")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Connection error. Please check if the backend is running.".to_string()
    } else {
        err.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn transport_noise_becomes_a_friendly_message() {
        let err = ApiError::new(
            ErrorCode::Transport,
            "error sending request for url (http://127.0.0.1:9/api/login)",
        );
        assert_eq!(
            classify_auth_failure(&err),
            "Connection error. Please check if the backend is running."
        );
    }

    #[test]
    fn backend_messages_pass_through() {
        let err = ApiError::new(ErrorCode::Unauthorized, "Invalid credentials");
        assert_eq!(classify_auth_failure(&err), "Invalid credentials");
    }
}
