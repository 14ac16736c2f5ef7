use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub email: String,
    pub is_authenticated: bool,
}

impl CurrentUser {
    // Helper for templates
    pub fn display_email(&self) -> &str {
        if self.is_authenticated {
            &self.email
        } else {
            "Not signed in"
        }
    }
}

/// Snapshot of the session for the current request.
pub async fn get_current_user(state: &AppState) -> CurrentUser {
    let session = state.session.lock().await;

    CurrentUser {
        email: session.user_email().to_string(),
        is_authenticated: session.is_authenticated(),
    }
}
