use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::api::SessionUser;
use crate::errors::ClientError;

/// On-disk cache format version; bump on any schema change so stale caches
/// are discarded instead of misparsed.
const CACHE_VERSION: u32 = 1;

const CACHE_FILE: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    token: String,
    user: SessionUser,
}

/// The `{token, user}` pair recovered from disk.
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub token: String,
    pub user: SessionUser,
}

/// Persisted session cache.
///
/// One JSON file in the given directory. A cache that cannot be parsed, or
/// that was written by a different format version, is cleared rather than
/// reported as an error: losing a cached login only costs a re-login.
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// Create a cache rooted in the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(CACHE_FILE),
        }
    }

    /// Read the stored session, if any.
    ///
    /// Returns None when no cache exists, and also when the cache exists but
    /// is corrupted or from another version; in those cases the file is
    /// removed.
    pub fn load(&self) -> Option<StoredSession> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read session cache: {}", e);
                return None;
            }
        };

        let parsed: CacheFile = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Clearing corrupted session cache: {}", e);
                self.clear();
                return None;
            }
        };

        if parsed.version != CACHE_VERSION {
            tracing::warn!(
                found = parsed.version,
                expected = CACHE_VERSION,
                "Clearing session cache from another version"
            );
            self.clear();
            return None;
        }

        Some(StoredSession {
            token: parsed.token,
            user: parsed.user,
        })
    }

    /// Persist the given session, replacing any previous one.
    pub fn store(&self, token: &str, user: &SessionUser) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::Cache(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(&CacheFile {
            version: CACHE_VERSION,
            token: token.to_string(),
            user: user.clone(),
        })
        .map_err(|e| ClientError::Cache(e.to_string()))?;

        fs::write(&self.path, contents).map_err(|e| ClientError::Cache(e.to_string()))
    }

    /// Remove the stored session. Removing an absent cache is not an error.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!("Failed to clear session cache: {}", e);
            }
        }
    }
}
