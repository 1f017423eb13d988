//! Catalog and reference-data fetches.
//!
//! Three visibility levels:
//! - reference data (authors, categories): public, fail-soft to empty lists,
//! - the full collection: public, shape failures resolve to an empty list,
//! - the owned view: requires a session, fails closed on auth errors.

use lectern_types::{Author, Book, Category, Session, User};
use tracing::warn;

use super::profile::ProfileClient;
use super::{ApiClient, ApiError};

/// Authors and categories for the upload form's dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub authors: Vec<Author>,
    pub categories: Vec<Category>,
}

/// Result of the ownership-scoped catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedCatalog {
    /// No session at invocation time; no network call was made.
    MustLogIn,
    /// Books owned by the resolved user, in original relative order.
    Books(Vec<Book>),
}

/// Fetches and filters the shared catalog.
pub struct CatalogClient<'a> {
    api: &'a ApiClient,
}

impl<'a> CatalogClient<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Fetches authors and categories in parallel.
    ///
    /// Fail-soft: any failure on either leg yields empty lists for both, so
    /// the upload form stays usable with zero options instead of erroring.
    pub async fn load_reference_data(&self) -> ReferenceData {
        let (authors, categories) = tokio::join!(
            self.fetch_list::<Author>("/authors/"),
            self.fetch_list::<Category>("/categories/"),
        );

        match (authors, categories) {
            (Ok(authors), Ok(categories)) => ReferenceData {
                authors,
                categories,
            },
            (authors, categories) => {
                if let Err(e) = &authors {
                    warn!(error = %e, "reference data fetch failed (authors)");
                }
                if let Err(e) = &categories {
                    warn!(error = %e, "reference data fetch failed (categories)");
                }
                ReferenceData::default()
            }
        }
    }

    /// Fetches the full collection. Unauthenticated-safe.
    ///
    /// A body that is not a well-formed list resolves to an empty list;
    /// transport failures are real errors.
    pub async fn load_catalog(&self) -> Result<Vec<Book>, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url("/books/"))
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        match serde_json::from_str::<Vec<Book>>(&body) {
            Ok(books) => Ok(books),
            Err(e) => {
                warn!(error = %e, "catalog response was not a book list");
                Ok(Vec::new())
            }
        }
    }

    /// Fetches the books owned by the current user.
    ///
    /// With no session this short-circuits to [`OwnedCatalog::MustLogIn`]
    /// without touching the network. With a session, the user is resolved
    /// first (fail-closed: any non-success is an auth error, never an empty
    /// list), then the full collection is fetched and filtered by owner.
    pub async fn load_owned_catalog(
        &self,
        session: Option<&Session>,
    ) -> Result<OwnedCatalog, ApiError> {
        let Some(session) = session else {
            return Ok(OwnedCatalog::MustLogIn);
        };

        let user: User = ProfileClient::new(self.api).whoami(session).await?;
        let books = self.load_catalog().await?;

        let owned = books
            .into_iter()
            .filter(|book| book.owner_id == user.id)
            .collect();
        Ok(OwnedCatalog::Books(owned))
    }

    async fn fetch_list<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .api
            .http()
            .get(self.api.url(path))
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::shape(path, e))
    }
}
