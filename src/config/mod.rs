//! Configuration module for SpendGuard
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings (limits, enforcement policy, category catalog)

pub mod paths;
pub mod settings;

pub use paths::SpendGuardPaths;
pub use settings::{EnforcementPolicy, Settings, SettingsPatch};
