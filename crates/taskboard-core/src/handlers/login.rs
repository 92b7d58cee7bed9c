//! Login handlers

use crate::api::ApiError;
use crate::domain::User;

/// Shown when the backend rejects a login without saying why
pub const LOGIN_FAILED: &str = "Error al iniciar sesión";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub email: String,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Store the user in the session and go to the dashboard
    Navigate(User),
    /// Stay on the form; `LoginState::error` holds the message
    Stay,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the previous error and show the loading state.
    /// Returns the email to log in with.
    pub fn begin_submit(&mut self) -> String {
        self.error = None;
        self.loading = true;
        self.email.trim().to_string()
    }

    /// Handle the login response; loading ends either way
    pub fn finish(&mut self, result: Result<User, ApiError>) -> LoginOutcome {
        self.loading = false;
        match result {
            Ok(user) => LoginOutcome::Navigate(user),
            Err(e) => {
                self.error = Some(e.user_message(LOGIN_FAILED));
                LoginOutcome::Stay
            }
        }
    }
}
