//! Subcommand handlers.

use anyhow::{Context, Result};
use lectern_core::session::SessionStore;
use lectern_types::Session;

pub mod auth;
pub mod books;
pub mod config;
pub mod profile;
pub mod reference;
pub mod view;

/// Resolves the stored session or fails with a hint to log in.
fn require_session(store: &SessionStore) -> Result<&Session> {
    store
        .get()
        .context("You are not logged in; run `lectern login` first")
}
