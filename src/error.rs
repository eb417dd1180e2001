//! Custom error types for SpendGuard
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::{ExpenseValidationError, LimitScope, Money};

/// The main error type for SpendGuard operations
#[derive(Error, Debug)]
pub enum SpendGuardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed expense or settings values
    #[error("Validation error: {0}")]
    Validation(String),

    /// An expense was rejected by the hard enforcement policy
    #[error("{scope} limit exceeded: expense of {amount} but only {remaining} remaining")]
    LimitExceeded {
        scope: LimitScope,
        amount: Money,
        remaining: Money,
    },

    /// Malformed import payload
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SpendGuardError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a hard-policy rejection
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, Self::LimitExceeded { .. })
    }

    /// Check if this is an import payload error
    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import(_))
    }

    /// The scope of a limit rejection, if this is one
    pub fn limit_scope(&self) -> Option<LimitScope> {
        match self {
            Self::LimitExceeded { scope, .. } => Some(*scope),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SpendGuardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendGuardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<ExpenseValidationError> for SpendGuardError {
    fn from(err: ExpenseValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for SpendGuard operations
pub type SpendGuardResult<T> = Result<T, SpendGuardError>;
