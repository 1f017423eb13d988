//! Wire-level domain model for the lectern library service.
//!
//! Field names follow the remote store's JSON (`_id`, `user_id`, `image`,
//! `profile_image`); the Rust side uses the clearer names via serde renames.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque bearer token proving identity on authorized requests.
///
/// The client never inspects or validates the token; it is stored as-is
/// and sent back in an `Authorization: Bearer` header. `Debug` redacts
/// the value so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Raw token value, for building the authorization header.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// A book record in the shared catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    /// Optional cover image URL (empty string when unset).
    #[serde(default, rename = "image")]
    pub image_url: String,
    /// Server-side path of the uploaded PDF.
    #[serde(default)]
    pub file_path: String,
    /// Id of the user who uploaded the book; drives the "my books" view.
    #[serde(rename = "user_id")]
    pub owner_id: String,
}

/// Immutable reference data: a book author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Immutable reference data: a book category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// The authenticated user's profile projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}
