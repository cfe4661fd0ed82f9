//! Session persistence
//!
//! The session store is the single source of truth for "is the caller
//! authenticated, and as whom". It owns two string-valued keys in a
//! key/value [`Storage`] backend: `ts_token` (the raw credential) and
//! `ts_user` (a JSON-serialized profile cached for display). No other
//! module touches these keys directly.
//!
//! The cached profile has no independent lifecycle: clearing the token
//! always clears the profile with it.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

pub mod claims;

/// Storage key for the raw session token
pub const TOKEN_KEY: &str = "ts_token";

/// Storage key for the cached user profile
pub const USER_KEY: &str = "ts_user";

/// Cached user profile, a denormalized copy of display fields.
///
/// This is a cache, not a source of truth; it is invalidated whenever the
/// token is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display username
    pub username: String,

    /// Administrator role flag
    #[serde(default)]
    pub is_admin: bool,

    /// Account email, when the backend returned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// String-keyed persistent storage, atomic at the key level
pub trait Storage: Send + Sync {
    /// Read a value, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value if present
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed storage: a YAML map of string keys to string values.
///
/// Each operation reads or rewrites the whole file, so the file on disk is
/// the only state. The file is written with 0600 permissions on Unix since
/// it holds a live credential.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default session file location, `~/.surveyctl/session.yaml`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(SessionError::NoHome)?;
        Ok(home.join(".surveyctl").join("session.yaml"))
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| SessionError::Read(e.to_string()))?;
        serde_yaml::from_str(&contents).map_err(|e| SessionError::Read(e.to_string()).into())
    }

    fn store(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(map).map_err(|e| SessionError::Write(e.to_string()))?;
        std::fs::write(&self.path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.store(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.store(&map)?;
        }
        Ok(())
    }
}

/// In-memory storage for tests and out-of-band corruption scenarios
#[derive(Default)]
pub struct MemoryStorage {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.map.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Session store over a [`Storage`] backend.
///
/// Reads fail soft: a missing or unreadable value is `None`, never an error.
/// Writes propagate storage failures to the caller.
pub struct SessionStore {
    storage: Box<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read the persisted token, with no validation
    pub fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Failed to read session token: {}", e);
                None
            }
        }
    }

    /// Persist the token
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)
    }

    /// Clear the token and the cached profile together.
    ///
    /// Invariant: no orphaned profile without a token.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }

    /// Cache the user profile alongside the token
    pub fn set_user(&self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.storage.set(USER_KEY, &json)
    }

    /// Read the cached profile.
    ///
    /// A value that is not well-formed JSON for a profile yields `None`;
    /// absent is the normal outcome of invalid or missing data.
    pub fn user(&self) -> Option<Profile> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read cached profile: {}", e);
                return None;
            }
        };

        serde_json::from_str(&raw).ok()
    }
}
