//! Storage initialization
//!
//! Handles first-run setup: directories plus empty data files, so every
//! later command finds well-formed JSON on disk.

use crate::config::paths::SpendcapPaths;
use crate::error::SpendcapResult;

use super::budgets::BudgetRepository;
use super::transactions::TransactionRepository;
use super::updates::UpdateTracker;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and seeds empty data files. Existing files
/// are left untouched.
pub fn initialize_storage(paths: &SpendcapPaths) -> SpendcapResult<()> {
    // Ensure all directories exist
    paths.ensure_directories()?;

    if !paths.budgets_file().exists() {
        let budgets = BudgetRepository::new(paths.budgets_file());
        budgets.load()?;
        budgets.save()?;
    }

    if !paths.transactions_file().exists() {
        let transactions = TransactionRepository::new(paths.transactions_file());
        transactions.load()?;
        transactions.save()?;
    }

    if !paths.versions_file().exists() {
        let updates = UpdateTracker::new(paths.versions_file());
        updates.load()?;
        updates.save()?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &SpendcapPaths) -> bool {
    !paths.budgets_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Money, Period, UserId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendcapPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.budgets_file().exists());
        assert!(paths.transactions_file().exists());
        assert!(paths.versions_file().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendcapPaths::with_base_dir(temp_dir.path().to_path_buf());

        // First initialization, then add real data
        initialize_storage(&paths).unwrap();

        let repo = BudgetRepository::new(paths.budgets_file());
        repo.load().unwrap();
        let budget = Budget::new(
            UserId::new(),
            "Groceries",
            "Groceries",
            Money::from_cents(60000),
            Period::Monthly,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        let id = budget.id;
        repo.insert_checked(budget).unwrap();
        repo.save().unwrap();

        // Second initialization should not clobber the data
        initialize_storage(&paths).unwrap();

        let reloaded = BudgetRepository::new(paths.budgets_file());
        reloaded.load().unwrap();
        assert!(reloaded.get(id).unwrap().is_some());
    }
}
