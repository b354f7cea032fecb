//! Per-user data version tracking
//!
//! Every budget or transaction mutation bumps the owning user's counter, so
//! callers can tell whether anything changed since they last looked. Counters
//! live on the storage context, never in process-global state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{SpendcapError, SpendcapResult};
use crate::models::UserId;

use super::file_io::{read_json, write_json_atomic};

/// Serializable version data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct VersionData {
    versions: HashMap<UserId, u64>,
}

/// Tracks a monotonically increasing data version per user
pub struct UpdateTracker {
    path: PathBuf,
    versions: RwLock<HashMap<UserId, u64>>,
}

impl UpdateTracker {
    /// Create a new update tracker
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            versions: RwLock::new(HashMap::new()),
        }
    }

    /// Load versions from disk
    pub fn load(&self) -> SpendcapResult<()> {
        let file_data: VersionData = read_json(&self.path)?;

        let mut versions = self.versions.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        *versions = file_data.versions;
        Ok(())
    }

    /// Save versions to disk
    pub fn save(&self) -> SpendcapResult<()> {
        let versions = self.versions.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = VersionData {
            versions: versions.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Increment a user's data version, returning the new value
    pub fn bump(&self, user_id: UserId) -> SpendcapResult<u64> {
        let mut versions = self.versions.write().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let version = versions.entry(user_id).or_insert(0);
        *version += 1;
        Ok(*version)
    }

    /// Get a user's current data version (0 when nothing has changed yet)
    pub fn current(&self, user_id: UserId) -> SpendcapResult<u64> {
        let versions = self.versions.read().map_err(|e| {
            SpendcapError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(versions.get(&user_id).copied().unwrap_or(0))
    }
}
