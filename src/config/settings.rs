//! User settings for Spendcap
//!
//! Manages the profile identity and user preferences: default period kind,
//! default alert threshold, and display options.

use serde::{Deserialize, Serialize};

use super::paths::SpendcapPaths;
use crate::error::{SpendcapError, SpendcapResult};
use crate::models::{Period, UserId};

/// User settings for Spendcap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Profile owner; generated once on first run and stable afterwards
    #[serde(default = "default_user_id")]
    pub user_id: UserId,

    /// Period kind used when a budget command doesn't specify one
    #[serde(default)]
    pub default_period: Period,

    /// Alert threshold applied to new budgets unless overridden (0-100)
    #[serde(default = "default_alert_threshold")]
    pub default_alert_threshold: u8,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether initial setup has been completed
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_user_id() -> UserId {
    UserId::new()
}

fn default_alert_threshold() -> u8 {
    80
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: default_user_id(),
            default_period: Period::default(),
            default_alert_threshold: default_alert_threshold(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SpendcapPaths) -> SpendcapResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| SpendcapError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendcapError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Create default settings
            let settings = Settings::default();
            // Don't save yet - let caller decide when to persist
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendcapPaths) -> SpendcapResult<()> {
        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SpendcapError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| SpendcapError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
