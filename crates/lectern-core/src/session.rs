//! Session token storage and retrieval.
//!
//! Stores the bearer token in `${LECTERN_HOME}/session.json` with restricted
//! permissions (0600). The token is an opaque value: no shape validation and
//! no expiry handling happen here — that is the remote store's job.
//!
//! The store is a dumb holder. AuthFlow is the sole writer (login success,
//! logout); everything else reads the current value right before issuing a
//! request and passes it along explicitly.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lectern_types::Session;
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// On-disk shape of the persisted session.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    token: Option<String>,
}

/// Holder for the current session token, persisted across process runs.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    session: Option<Session>,
}

impl SessionStore {
    /// Opens the store at the default location.
    pub fn open() -> Result<Self> {
        Self::open_at(paths::session_path())
    }

    /// Opens the store at a specific path (used by tests).
    pub fn open_at(path: PathBuf) -> Result<Self> {
        let session = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {}", path.display()))?;
            let file: SessionFile = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse session from {}", path.display()))?;
            file.token.map(Session::new)
        } else {
            None
        };
        Ok(Self { path, session })
    }

    /// Returns the current session, if any.
    pub fn get(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Stores a new session token and persists it.
    pub fn set(&mut self, session: Session) -> Result<()> {
        self.session = Some(session);
        self.save()
    }

    /// Clears the session and removes the persisted file.
    pub fn clear(&mut self) -> Result<()> {
        self.session = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Saves the current session to disk with restricted permissions (0600).
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let file = SessionFile {
            token: self.session.as_ref().map(|s| s.token().to_string()),
        };
        let contents = serde_json::to_string_pretty(&file).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut out = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            out.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}
