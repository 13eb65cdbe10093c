//! On-disk session persistence.
//!
//! The bearer token survives invocations in a small JSON file; logout removes
//! it. Cart state itself is never persisted, only the session.

use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::session::models::CurrentUser;

/// Persisted session payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PersistedSession {
    pub token: String,
    pub user: CurrentUser,
}

/// Reads and writes the session JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// A store rooted at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Best-effort load; an unreadable or malformed file yields nothing.
    pub(crate) fn load(&self) -> Option<PersistedSession> {
        let raw = fs::read_to_string(&self.path).ok()?;

        serde_json::from_str(&raw).ok()
    }

    pub(crate) fn save(&self, session: &PersistedSession) -> io::Result<()> {
        let raw = serde_json::to_string(session).map_err(io::Error::other)?;

        fs::write(&self.path, raw)
    }

    /// Remove the file; a missing file already counts as removed.
    pub(crate) fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
