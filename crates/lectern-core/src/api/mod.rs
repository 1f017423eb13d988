//! HTTP client plumbing for the remote library service.
//!
//! `ApiClient` owns the `reqwest::Client` and base URL; the per-concern
//! components (`AuthFlow`, `CatalogClient`, `MutationCoordinator`,
//! `ProfileClient`) borrow it. Authorization is never ambient: operations
//! that need it take the session explicitly.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::Config;

pub mod auth;
pub mod books;
pub mod catalog;
mod errors;
pub mod profile;

pub use errors::{ApiError, ApiErrorKind};

/// Shared HTTP client for the remote store.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("build HTTP client")?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Creates a client pointed at an explicit base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Base URL of the remote store (e.g., to resolve `file_path` links).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
