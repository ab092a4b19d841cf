//! Persisted client state: credentials and the cached group list.
//!
//! Each key is stored as its own file in the store directory. Writes go to a
//! temp file first and are renamed into place, so a crash never leaves a
//! half-written token behind. An in-memory store is available for sessions
//! that should not outlive the process.

use crate::config;
use crate::error::{CashCrewError, Result};
use crate::models::{Group, Token};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

/// Key/value storage for the session token and group snapshot.
pub struct SessionStore {
    dir: Option<PathBuf>,
    memory: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    /// Create a store backed by `dir`, or by the platform default
    /// directory when `None`. Creates the directory if it does not exist.
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_store_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir: Some(dir),
            memory: Mutex::new(HashMap::new()),
        })
    }

    /// Create a store that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self {
            dir: None,
            memory: Mutex::new(HashMap::new()),
        }
    }

    /// Directory backing this store, `None` for in-memory stores.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.memory
            .lock()
            .map_err(|_| CashCrewError::InvalidArgument("session store lock poisoned".into()))
    }

    // -- Raw keys ----------------------------------------------------------

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let memory = self.lock()?;
        match self.dir {
            None => Ok(memory.get(key).cloned()),
            Some(ref dir) => {
                let path = dir.join(key);
                if path.exists() {
                    Ok(Some(fs::read_to_string(path)?.trim().to_string()))
                } else {
                    Ok(None)
                }
            }
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut memory = self.lock()?;
        match self.dir {
            None => {
                memory.insert(key.to_string(), value.to_string());
                Ok(())
            }
            Some(ref dir) => write_atomic(&dir.join(key), value),
        }
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut memory = self.lock()?;
        match self.dir {
            None => {
                memory.remove(key);
                Ok(())
            }
            Some(ref dir) => {
                let path = dir.join(key);
                if path.exists() {
                    fs::remove_file(path)?;
                }
                Ok(())
            }
        }
    }

    // -- Credentials -------------------------------------------------------

    /// Restore the persisted token, if an access token was saved.
    ///
    /// A missing token type falls back to `bearer`.
    pub fn load_token(&self) -> Result<Option<Token>> {
        let Some(access_token) = self.get(config::KEY_ACCESS_TOKEN)? else {
            return Ok(None);
        };
        if access_token.is_empty() {
            return Ok(None);
        }
        let token_type = self
            .get(config::KEY_TOKEN_TYPE)?
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| config::DEFAULT_TOKEN_TYPE.to_string());
        let refresh_token = self.get(config::KEY_REFRESH_TOKEN)?;
        Ok(Some(Token {
            access_token,
            token_type,
            refresh_token,
        }))
    }

    pub fn save_token(&self, token: &Token) -> Result<()> {
        self.set(config::KEY_ACCESS_TOKEN, &token.access_token)?;
        self.set(config::KEY_TOKEN_TYPE, &token.token_type)?;
        match token.refresh_token {
            Some(ref refresh) => self.set(config::KEY_REFRESH_TOKEN, refresh)?,
            None => self.remove(config::KEY_REFRESH_TOKEN)?,
        }
        Ok(())
    }

    pub fn clear_token(&self) -> Result<()> {
        self.remove(config::KEY_ACCESS_TOKEN)?;
        self.remove(config::KEY_TOKEN_TYPE)?;
        self.remove(config::KEY_REFRESH_TOKEN)
    }

    // -- Group snapshot ----------------------------------------------------

    /// Load the cached group list.
    ///
    /// Returns `Ok(None)` if nothing was cached. A corrupt snapshot is
    /// deleted so the next list call can rewrite it.
    pub fn load_groups(&self) -> Result<Option<Vec<Group>>> {
        let Some(raw) = self.get(config::KEY_GROUPS)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(groups) => Ok(Some(groups)),
            Err(e) => {
                warn!(error = %e, "corrupt group snapshot, removing");
                self.remove(config::KEY_GROUPS)?;
                Err(CashCrewError::NotFound(format!(
                    "Group snapshot was corrupt and has been removed. Original error: {}",
                    e
                )))
            }
        }
    }

    pub fn save_groups(&self, groups: &[Group]) -> Result<()> {
        let raw = serde_json::to_string(groups)?;
        self.set(config::KEY_GROUPS, &raw)?;
        info!(count = groups.len(), "group snapshot saved");
        Ok(())
    }

    /// Remove every persisted key.
    pub fn clear(&self) -> Result<()> {
        self.clear_token()?;
        self.remove(config::KEY_GROUPS)
    }
}

/// Write `contents` to a temp file next to `dest`, then rename it into place.
fn write_atomic(dest: &Path, contents: &str) -> Result<()> {
    let file_name = dest
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("value");
    let tmp = dest.with_file_name(format!("{}.tmp", file_name));

    let result = (|| -> Result<()> {
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, dest)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
