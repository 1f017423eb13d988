//! Login, registration and logout exchanges.
//!
//! Failure policy: every network failure is converted into a user-facing
//! message and the session is left exactly as it was — either the token is
//! set (successful login) or it is not. No retries.

use lectern_types::Session;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{ApiClient, ApiError};
use crate::forms::RegisterForm;
use crate::session::SessionStore;

/// Where the host shell should navigate after an auth transition.
///
/// The core never performs navigation itself; it hands the intent back to
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    /// Authenticated home view (after login).
    Home,
    /// Unauthenticated entry view (after logout).
    Entry,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    message: String,
}

/// Executes credential exchanges and owns the session transitions.
pub struct AuthFlow<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthFlow<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Exchanges credentials for a bearer token and persists it.
    ///
    /// On any failure the store is untouched and the error message carries
    /// the server's `detail` string, or a generic fallback.
    pub async fn login(
        &self,
        store: &mut SessionStore,
        email: &str,
        password: &str,
    ) -> Result<NavIntent, ApiError> {
        let response = self
            .api
            .http()
            .post(self.api.url("/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::auth_status(&body, "Could not sign in"));
        }

        let parsed: LoginResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::shape("login", e))?;
        store
            .set(Session::new(parsed.access_token))
            .map_err(ApiError::storage)?;
        debug!("session established");
        Ok(NavIntent::Home)
    }

    /// Registers a new account. Does not establish a session.
    ///
    /// On success the form is cleared and the server's confirmation message
    /// is returned; on failure the form is left intact.
    pub async fn register(&self, form: &mut RegisterForm) -> Result<String, ApiError> {
        let response = self
            .api
            .http()
            .post(self.api.url("/register"))
            .json(&json!({
                "username": form.username,
                "email": form.email,
                "password": form.password,
            }))
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::auth_status(&body, "Could not create the account"));
        }

        let parsed: RegisterResponse = serde_json::from_str(&body).unwrap_or(RegisterResponse {
            message: String::new(),
        });
        form.clear();
        if parsed.message.is_empty() {
            Ok("Account created".to_string())
        } else {
            Ok(parsed.message)
        }
    }

    /// Clears the persisted session and signals navigation to the entry view.
    pub fn logout(&self, store: &mut SessionStore) -> Result<NavIntent, ApiError> {
        store.clear().map_err(ApiError::storage)?;
        debug!("session cleared");
        Ok(NavIntent::Entry)
    }
}
