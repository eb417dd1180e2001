//! Service layer for SpendGuard
//!
//! The service layer holds the core logic: the expense ledger, the allowance
//! engine that decides on new expenses, and demo data generation.

pub mod allowance;
pub mod ledger;
pub mod seed;

pub use allowance::{AddOutcome, AllowanceEngine, AllowanceStatus};
pub use ledger::{ExpenseFilter, ExpenseLedger};
pub use seed::generate_demo_expenses;
