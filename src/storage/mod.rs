//! Storage layer for Spendcap
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. The `Storage` context owns every repository plus the per-user
//! update tracker, so nothing mutable hides in global state.

pub mod budgets;
pub mod file_io;
pub mod init;
pub mod transactions;
pub mod updates;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::{SpendTotal, TransactionRepository};
pub use updates::UpdateTracker;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SpendcapPaths;
use crate::error::SpendcapResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendcapPaths,
    pub budgets: BudgetRepository,
    pub transactions: TransactionRepository,
    pub updates: UpdateTracker,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SpendcapPaths) -> SpendcapResult<Self> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            updates: UpdateTracker::new(paths.versions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SpendcapPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendcapResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update operation in the audit log
    ///
    /// When the caller passes no summary, one is derived from the serialized
    /// before and after values.
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> SpendcapResult<()> {
        let diff_summary = diff_summary.or_else(|| Self::derived_diff(before, after));
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a deactivation in the audit log
    pub fn log_deactivate<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> SpendcapResult<()> {
        let diff_summary = diff_summary.or_else(|| Self::derived_diff(before, after));
        self.audit.log(&AuditEntry::deactivate(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    fn derived_diff<T: Serialize>(before: &T, after: &T) -> Option<String> {
        let before = serde_json::to_value(before).ok()?;
        let after = serde_json::to_value(after).ok()?;
        generate_diff(&before, &after)
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> SpendcapResult<()> {
        self.budgets.load()?;
        self.transactions.load()?;
        self.updates.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> SpendcapResult<()> {
        self.budgets.save()?;
        self.transactions.save()?;
        self.updates.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (has any data)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}
