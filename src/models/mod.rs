//! Core data models for SpendGuard
//!
//! This module contains the data structures of the expense domain: money,
//! calendar keys, expense records, categories, and limit outcomes.

pub mod category;
pub mod expense;
pub mod ids;
pub mod keys;
pub mod limit;
pub mod money;

pub use category::{Category, PaymentMethod, DEFAULT_CATEGORIES};
pub use expense::{ExpenseRecord, ExpenseRecordData, ExpenseValidationError, NewExpense};
pub use ids::ExpenseId;
pub use keys::{DateKey, KeyParseError, MonthKey};
pub use limit::{LimitScope, SpendWarning};
pub use money::{Money, MoneyParseError};
