//! SpendGuard - rolling daily allowance expense tracker
//!
//! This library provides the core functionality for the SpendGuard command
//! line tool. Expenses are checked against a daily limit that rolls: unspent
//! budget from earlier days of the month is carried into today's allowance,
//! and overspending is taken out of it. A monthly ceiling caps the total.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, date keys, expenses, categories)
//! - `storage`: JSON file storage and the persistence contract
//! - `services`: Expense ledger, allowance engine, demo data
//! - `reports`: Monthly spending reports
//! - `export`: JSON and CSV export, JSON import
//! - `session`: Application state loaded from and flushed to storage
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust
//! use spendguard::models::{DateKey, Money, NewExpense};
//! use spendguard::session::Session;
//! use spendguard::storage::MemoryStorage;
//!
//! let mut session = Session::open(MemoryStorage::new())?;
//! let today = DateKey::parse("2026-02-01")?;
//! let outcome = session.add_expense(NewExpense::new(Money::from_units(120), today, "Food"))?;
//! assert!(outcome.accepted);
//! assert_eq!(session.status(today).remaining_daily, Money::from_units(380));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;
pub mod storage;

pub use error::{SpendGuardError, SpendGuardResult};
