//! Current-user resolution and profile updates.

use lectern_types::{Session, User};
use serde::Serialize;

use super::{ApiClient, ApiError};

/// JSON body for `PUT /me`. Fields left as `None` are not sent, so the
/// server keeps the existing values.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Reads and mutates the authenticated user's profile projection.
pub struct ProfileClient<'a> {
    api: &'a ApiClient,
}

impl<'a> ProfileClient<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Resolves the current user. Fail-closed: any non-success response is
    /// an auth error.
    pub async fn whoami(&self, session: &Session) -> Result<User, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url("/me"))
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(ApiError::network)?;

        if !response.status().is_success() {
            return Err(ApiError::not_authenticated());
        }

        let body = response.text().await.map_err(ApiError::network)?;
        serde_json::from_str(&body).map_err(|e| ApiError::shape("/me", e))
    }

    /// Updates the profile and returns the server's view of it.
    pub async fn update_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let response = self
            .api
            .http()
            .put(self.api.url("/me"))
            .bearer_auth(session.token())
            .json(update)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::shape("/me", e))
    }

    /// Looks up a user's public profile by id.
    pub async fn fetch_user(&self, id: &str) -> Result<User, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url(&format!("/users/{id}")))
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::shape("/users", e))
    }
}
