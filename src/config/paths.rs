//! Path management for SpendGuard
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDGUARD_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/spendguard` on Linux,
//!    `~/Library/Application Support/spendguard` on macOS, `%APPDATA%` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SpendGuardError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SPENDGUARD_DATA_DIR";

/// Manages all paths used by SpendGuard
#[derive(Debug, Clone)]
pub struct SpendGuardPaths {
    base_dir: PathBuf,
}

impl SpendGuardPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SpendGuardError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the expense data file
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Default directory for exports
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SpendGuardError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendGuardError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SpendGuardError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if settings have ever been saved
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SpendGuardError> {
    ProjectDirs::from("", "", "spendguard")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SpendGuardError::Config("Could not determine a home directory".into()))
}
