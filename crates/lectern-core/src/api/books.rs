//! Book mutations and snapshot reconciliation.
//!
//! Every operation requires a session and applies confirm-then-apply: the
//! local [`CatalogSnapshot`] changes only after the server's success
//! response. Operations are not queued or coalesced; concurrent edits to the
//! same id are last-write-wins at the remote store.

use lectern_types::{Book, Session};
use reqwest::multipart;
use serde_json::json;
use tracing::debug;

use super::{ApiClient, ApiError, ApiErrorKind};
use crate::catalog::CatalogSnapshot;
use crate::forms::{BookForm, FileAttachment};

/// Metadata-only patch for an existing book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

/// Executes create/update/delete against the remote store and reconciles
/// the local snapshot afterward.
pub struct MutationCoordinator<'a> {
    api: &'a ApiClient,
}

impl<'a> MutationCoordinator<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Uploads a new book (multipart: metadata + PDF file).
    ///
    /// On success the returned record is appended to the snapshot and the
    /// form is cleared, file selection included. On failure the form is left
    /// fully intact — only successful submission clears it.
    pub async fn create_book(
        &self,
        session: &Session,
        form: &mut BookForm,
        snapshot: &mut CatalogSnapshot,
    ) -> Result<Book, ApiError> {
        let file = form
            .file
            .as_ref()
            .ok_or_else(|| ApiError::new(ApiErrorKind::Shape, "A PDF file is required"))?;

        let parts = multipart::Form::new()
            .text("title", form.title.clone())
            .text("author_id", form.author_id.clone())
            .text("category_id", form.category_id.clone())
            .text("description", form.description.clone())
            .text("image", form.image_url.clone())
            .part("file", pdf_part(file)?);

        let response = self
            .api
            .http()
            .post(self.api.url("/books/"))
            .bearer_auth(session.token())
            .multipart(parts)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        let book: Book = serde_json::from_str(&body).map_err(|e| ApiError::shape("/books/", e))?;
        debug!(id = %book.id, "book created");
        snapshot.append(book.clone());
        form.clear();
        Ok(book)
    }

    /// Updates an existing book.
    ///
    /// Two encodings against the same resource and method: multipart when a
    /// replacement file is present, plain JSON otherwise. On success the
    /// matching snapshot entry is replaced by id; ordering of the remaining
    /// entries is preserved.
    pub async fn update_book(
        &self,
        session: &Session,
        id: &str,
        patch: &BookPatch,
        file: Option<&FileAttachment>,
        snapshot: &mut CatalogSnapshot,
    ) -> Result<Book, ApiError> {
        let request = self
            .api
            .http()
            .put(self.api.url(&format!("/books/{id}")))
            .bearer_auth(session.token());

        let request = match file {
            Some(file) => {
                let parts = multipart::Form::new()
                    .text("title", patch.title.clone())
                    .text("description", patch.description.clone())
                    .text("image", patch.image_url.clone())
                    .part("file", pdf_part(file)?);
                request.multipart(parts)
            }
            None => request.json(&json!({
                "title": patch.title,
                "description": patch.description,
                "image": patch.image_url,
            })),
        };

        let response = request.send().await.map_err(ApiError::network)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        let book: Book = serde_json::from_str(&body).map_err(|e| ApiError::shape("/books", e))?;
        debug!(id = %book.id, "book updated");
        snapshot.replace(book.clone());
        Ok(book)
    }

    /// Deletes a book. The interactive confirmation gate lives with the
    /// caller, outside this contract.
    ///
    /// On success the entry is removed from the snapshot; on failure the
    /// snapshot is untouched. No undo.
    pub async fn delete_book(
        &self,
        session: &Session,
        id: &str,
        snapshot: &mut CatalogSnapshot,
    ) -> Result<(), ApiError> {
        let response = self
            .api
            .http()
            .delete(self.api.url(&format!("/books/{id}")))
            .bearer_auth(session.token())
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(ApiError::network)?;
            return Err(ApiError::http_status(status.as_u16(), &body));
        }

        debug!(id, "book deleted");
        snapshot.remove(id);
        Ok(())
    }
}

fn pdf_part(file: &FileAttachment) -> Result<multipart::Part, ApiError> {
    multipart::Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str("application/pdf")
        .map_err(ApiError::network)
}
