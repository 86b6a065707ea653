use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Bearer token authenticating calls to the Film Fusion backend.
///
/// Obtained from `POST /api/auth/login`; its lifecycle is tied to
/// login/logout, not to any authorization flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub expire_at: Option<DateTime<Utc>>,
}

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expire_at: None,
        }
    }

    /// Whether the recorded expiry has passed. Tokens without an expiry
    /// never expire.
    pub fn is_expired(&self) -> bool {
        self.expire_at.is_some_and(|at| at <= Utc::now())
    }
}

/// Storage abstraction for the session bearer token.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<SessionToken>, AuthError>;
    fn save(&self, token: &SessionToken) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// In-memory session store, one token per process.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<SessionToken>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(SessionToken::new(token))),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionToken>, AuthError> {
        Ok(self.inner.read().ok().and_then(|guard| guard.clone()))
    }

    fn save(&self, token: &SessionToken) -> Result<(), AuthError> {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(token.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
        Ok(())
    }
}

/// File-backed session store using a TOML file.
///
/// # Example
/// ```no_run
/// use film_fusion::auth::{FileSessionStore, SessionStore, SessionToken};
///
/// let store = FileSessionStore::new_default();
/// store.save(&SessionToken::new("bearer-token"))?;
/// # Ok::<(), film_fusion::auth::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.film-fusion/session.toml`, or the platform config dir when known.
    pub fn new_default() -> Self {
        let dir = ProjectDirs::from("", "", "film-fusion")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".film-fusion"));
        Self {
            path: dir.join("session.toml"),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionToken>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let token: SessionToken = toml::from_str(&raw)?;
        Ok(Some(token))
    }

    fn save(&self, token: &SessionToken) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(token)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
