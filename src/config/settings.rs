//! User settings for SpendGuard
//!
//! Settings carry the spending limits the allowance engine enforces, the
//! enforcement policy, and the category catalog. They can change at any time;
//! a change applies to the next query and never re-evaluates past expenses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::paths::SpendGuardPaths;
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::{Category, Money};
use crate::storage::file_io::{read_json_required, write_json_atomic};

/// How the engine treats an expense that goes over a limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementPolicy {
    /// Always accept; warn when the rolling daily allowance goes negative
    #[default]
    Soft,
    /// Reject expenses over the daily or monthly remaining; warn near a limit
    Hard,
}

impl fmt::Display for EnforcementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnforcementPolicy::Soft => write!(f, "soft"),
            EnforcementPolicy::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for EnforcementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soft" => Ok(EnforcementPolicy::Soft),
            "hard" => Ok(EnforcementPolicy::Hard),
            other => Err(format!("Unknown policy '{}'. Use soft or hard", other)),
        }
    }
}

/// User settings for SpendGuard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Nominal per-day budget
    #[serde(default = "default_daily_limit")]
    pub daily_limit: Money,

    /// Ceiling for a calendar month
    #[serde(default = "default_monthly_limit")]
    pub monthly_limit: Money,

    /// Display-only currency label
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Display name of the user
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub enforcement: EnforcementPolicy,

    /// Hard policy: warn when remaining-after is at most this percent of the limit
    #[serde(default = "default_near_limit_percent")]
    pub near_limit_percent: u8,

    /// Allowed categories
    #[serde(default = "Category::defaults")]
    pub categories: Vec<Category>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_daily_limit() -> Money {
    Money::from_units(500)
}

fn default_monthly_limit() -> Money {
    Money::from_units(15_000)
}

fn default_currency() -> String {
    "Rs.".to_string()
}

fn default_near_limit_percent() -> u8 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            daily_limit: default_daily_limit(),
            monthly_limit: default_monthly_limit(),
            currency: default_currency(),
            name: String::new(),
            enforcement: EnforcementPolicy::default(),
            near_limit_percent: default_near_limit_percent(),
            categories: Category::defaults(),
        }
    }
}

impl Settings {
    /// Check limits, threshold and catalog
    pub fn validate(&self) -> SpendGuardResult<()> {
        if !self.daily_limit.is_positive() {
            return Err(SpendGuardError::Validation(format!(
                "Daily limit must be greater than zero (got {})",
                self.daily_limit
            )));
        }
        if !self.monthly_limit.is_positive() {
            return Err(SpendGuardError::Validation(format!(
                "Monthly limit must be greater than zero (got {})",
                self.monthly_limit
            )));
        }
        if self.daily_limit.exceeds_max() || self.monthly_limit.exceeds_max() {
            return Err(SpendGuardError::Validation(format!(
                "Limits cannot exceed {}",
                Money::MAX
            )));
        }
        if self.near_limit_percent > 100 {
            return Err(SpendGuardError::Validation(format!(
                "Near-limit percent must be between 0 and 100 (got {})",
                self.near_limit_percent
            )));
        }
        if self.categories.is_empty() {
            return Err(SpendGuardError::Validation(
                "At least one category is required".into(),
            ));
        }
        if self.categories.iter().any(|c| c.name().is_empty()) {
            return Err(SpendGuardError::Validation(
                "Category names cannot be blank".into(),
            ));
        }
        Ok(())
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendGuardPaths) -> SpendGuardResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let settings: Settings = read_json_required(&settings_path).map_err(|e| {
            SpendGuardError::Config(format!("Failed to read settings file: {}", e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendGuardPaths) -> SpendGuardResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

/// A partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<EnforcementPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub near_limit_percent: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }

    /// Merge onto `current`, returning the validated result
    ///
    /// `current` is left untouched, so a rejected patch changes nothing.
    pub fn apply(&self, current: &Settings) -> SpendGuardResult<Settings> {
        let mut next = current.clone();
        if let Some(daily_limit) = self.daily_limit {
            next.daily_limit = daily_limit;
        }
        if let Some(monthly_limit) = self.monthly_limit {
            next.monthly_limit = monthly_limit;
        }
        if let Some(currency) = &self.currency {
            next.currency = currency.clone();
        }
        if let Some(name) = &self.name {
            next.name = name.clone();
        }
        if let Some(enforcement) = self.enforcement {
            next.enforcement = enforcement;
        }
        if let Some(percent) = self.near_limit_percent {
            next.near_limit_percent = percent;
        }
        if let Some(categories) = &self.categories {
            let mut deduped: Vec<Category> = Vec::with_capacity(categories.len());
            for category in categories {
                if !deduped.contains(category) {
                    deduped.push(category.clone());
                }
            }
            next.categories = deduped;
        }
        next.validate()?;
        Ok(next)
    }
}
