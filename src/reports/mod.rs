//! Reports module for SpendGuard
//!
//! Provides the monthly spending summary and per-day spending series.

pub mod spending;

pub use spending::{daily_series, CategorySpending, MonthlyReport};
