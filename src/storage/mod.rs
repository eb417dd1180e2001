//! Storage layer for SpendGuard
//!
//! The core never touches disk itself. It is handed a loaded snapshot and hands
//! back mutated state through the `Persistence` trait, which the application
//! session calls after every mutation.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_atomic, write_json_atomic};

use crate::config::paths::SpendGuardPaths;
use crate::config::settings::Settings;
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::ExpenseRecord;

/// Load/save contract between the application session and a storage backend
pub trait Persistence {
    /// Load the persisted ledger (newest first) and settings
    fn load(&self) -> SpendGuardResult<(Vec<ExpenseRecord>, Settings)>;

    /// Persist the full ledger
    fn save_expenses(&mut self, records: &[ExpenseRecord]) -> SpendGuardResult<()>;

    /// Persist the settings
    fn save_settings(&mut self, settings: &Settings) -> SpendGuardResult<()>;
}

/// JSON files under the SpendGuard data directory
pub struct JsonStorage {
    paths: SpendGuardPaths,
    expenses: ExpenseRepository,
}

impl JsonStorage {
    /// Create a new storage instance, ensuring the directories exist
    pub fn new(paths: SpendGuardPaths) -> SpendGuardResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &SpendGuardPaths {
        &self.paths
    }
}

impl Persistence for JsonStorage {
    fn load(&self) -> SpendGuardResult<(Vec<ExpenseRecord>, Settings)> {
        let records = self.expenses.load()?;
        let settings = Settings::load_or_create(&self.paths)?;
        Ok((records, settings))
    }

    fn save_expenses(&mut self, records: &[ExpenseRecord]) -> SpendGuardResult<()> {
        self.expenses.save(records)
    }

    fn save_settings(&mut self, settings: &Settings) -> SpendGuardResult<()> {
        settings.save(&self.paths)
    }
}

/// In-memory backend for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Vec<ExpenseRecord>,
    settings: Settings,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(records: Vec<ExpenseRecord>, settings: Settings) -> Self {
        Self {
            records,
            settings,
            ..Self::default()
        }
    }

    /// Make every subsequent save fail
    pub fn fail_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }

    fn check_writable(&self) -> SpendGuardResult<()> {
        if self.fail_saves {
            Err(SpendGuardError::Storage("memory storage is read-only".into()))
        } else {
            Ok(())
        }
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> SpendGuardResult<(Vec<ExpenseRecord>, Settings)> {
        Ok((self.records.clone(), self.settings.clone()))
    }

    fn save_expenses(&mut self, records: &[ExpenseRecord]) -> SpendGuardResult<()> {
        self.check_writable()?;
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn save_settings(&mut self, settings: &Settings) -> SpendGuardResult<()> {
        self.check_writable()?;
        self.settings = settings.clone();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::EnforcementPolicy;
    use crate::models::{DateKey, Money, NewExpense};
    use tempfile::TempDir;

    #[test]
    fn test_json_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendGuardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = JsonStorage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        let (records, settings) = storage.load().unwrap();
        assert!(records.is_empty());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendGuardPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = JsonStorage::new(paths.clone()).unwrap();

        let record = ExpenseRecord::from_new(NewExpense::new(
            Money::from_units(75),
            DateKey::parse("2026-02-03").unwrap(),
            "Transport",
        ));
        let mut settings = Settings::default();
        settings.enforcement = EnforcementPolicy::Hard;

        storage.save_expenses(std::slice::from_ref(&record)).unwrap();
        storage.save_settings(&settings).unwrap();

        let reopened = JsonStorage::new(paths).unwrap();
        let (records, loaded_settings) = reopened.load().unwrap();
        assert_eq!(records, vec![record]);
        assert_eq!(loaded_settings, settings);
    }

    #[test]
    fn test_memory_storage_failure_mode() {
        let mut storage = MemoryStorage::new().fail_saves();
        assert!(storage.save_settings(&Settings::default()).is_err());
        assert_eq!(storage.save_count(), 0);
    }
}
