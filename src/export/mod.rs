//! Export module for SpendGuard
//!
//! Provides data export and import:
//! - JSON: the full payload (settings plus expenses), also the import format
//! - CSV: the expense ledger, spreadsheet-compatible

pub mod csv;
pub mod json;

pub use self::csv::export_expenses_csv;
pub use json::{parse_import, ExportPayload, ImportPayload, EXPORT_VERSION};
