use serde::{Deserialize, Serialize};

/// Who is looking at the dashboard.
///
/// Carries an opaque token and the signed-in email. Nothing validates the
/// token; holding a non-empty one is what grants access to the dashboard views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    auth_token: Option<String>,
    user_email: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(auth_token: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            auth_token: Some(auth_token.into()),
            user_email: Some(user_email.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }

    /// Email shown in the header, or `"Guest"`.
    pub fn display_identity(&self) -> &str {
        self.user_email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or("Guest")
    }

    pub fn sign_out(&mut self) {
        self.auth_token = None;
        self.user_email = None;
    }
}
