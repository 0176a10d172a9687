//! Session Storage
//!
//! Cookie-style key-value store for the bearer tokens and the UI theme
//! preference, persisted as a small TOML file in the user config directory.
//! Tokens are opaque strings issued by the API at login; no expiry is
//! tracked client-side and nothing is encrypted. Created at login, removed
//! at logout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted session values. Field names match the keys the web client
/// kept in its cookies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(rename = "Token", skip_serializing_if = "Option::is_none")]
    token: Option<String>,

    #[serde(rename = "RefreshToken", skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// Handle to the session file. Reads go back to disk every time (cookie
/// semantics); writes replace the whole file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by the default location
    /// (`<config_dir>/fastfin/session.toml`).
    pub fn open_default() -> Result<Self, SessionError> {
        let base = dirs::config_dir().ok_or(SessionError::NoConfigDir)?;
        Ok(Self::at_path(base.join("fastfin").join("session.toml")))
    }

    /// Store backed by an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Access token for the `Authorization` header, if a session exists.
    pub fn access_token(&self) -> Option<String> {
        self.read().token
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token
    }

    /// Write both tokens, as the login flow does.
    pub fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), SessionError> {
        let mut data = self.read();
        data.token = Some(access.to_string());
        data.refresh_token = Some(refresh.to_string());
        self.write(&data)
    }

    /// Remove both tokens (logout). The theme preference survives.
    pub fn clear(&self) -> Result<(), SessionError> {
        let mut data = self.read();
        data.token = None;
        data.refresh_token = None;
        self.write(&data)
    }

    /// Saved theme preference (`"light"` or `"dark"`), if any.
    pub fn theme(&self) -> Option<String> {
        self.read().theme
    }

    pub fn set_theme(&self, theme: &str) -> Result<(), SessionError> {
        let mut data = self.read();
        data.theme = Some(theme.to_string());
        self.write(&data)
    }

    fn read(&self) -> SessionData {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return SessionData::default(),
        };

        match toml::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Discarding unreadable session file {:?}: {}", self.path, e);
                SessionData::default()
            }
        }
    }

    fn write(&self, data: &SessionData) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Io {
                path: self.path.clone(),
                error: e.to_string(),
            })?;
        }

        let content = toml::to_string(data).map_err(|e| SessionError::Serialize(e.to_string()))?;

        std::fs::write(&self.path, content).map_err(|e| SessionError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }
}

/// Session storage errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("No user config directory available")]
    NoConfigDir,

    #[error("Failed to write session file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to serialize session data: {0}")]
    Serialize(String),
}
