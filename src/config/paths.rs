//! Path management for Spendcap
//!
//! Provides platform-aware path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDCAP_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/spendcap` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{SpendcapError, SpendcapResult};

/// Manages all paths used by Spendcap
#[derive(Debug, Clone)]
pub struct SpendcapPaths {
    /// Base directory for all Spendcap data
    base_dir: PathBuf,
}

impl SpendcapPaths {
    /// Create a new SpendcapPaths instance
    ///
    /// Path resolution:
    /// 1. `SPENDCAP_DATA_DIR` env var (explicit override)
    /// 2. Platform config directory via `directories`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> SpendcapResult<Self> {
        let base_dir = if let Ok(custom) = std::env::var("SPENDCAP_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SpendcapPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/spendcap/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/spendcap/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to budgets.json
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to versions.json (per-user data versions)
    pub fn versions_file(&self) -> PathBuf {
        self.data_dir().join("versions.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> SpendcapResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendcapError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SpendcapError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Spendcap has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory for this platform
fn resolve_default_path() -> SpendcapResult<PathBuf> {
    let dirs = ProjectDirs::from("", "", "spendcap")
        .ok_or_else(|| SpendcapError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().to_path_buf())
}
