//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, allowance status and reports
//! for terminal display.

pub mod expense;
pub mod report;
pub mod status;

pub use expense::{format_expense_details, format_expense_register, format_expense_row};
pub use report::{format_category_table, format_daily_series, format_monthly_report};
pub use status::{format_outcome, format_status};
