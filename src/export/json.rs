//! JSON export and import
//!
//! The export payload carries the settings and every expense. Importing reads
//! the same shape back; its expenses replace the ledger and its settings are
//! merged over the current ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

use crate::config::settings::{Settings, SettingsPatch};
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::{ExpenseRecord, ExpenseRecordData};

/// Current export payload version
pub const EXPORT_VERSION: u32 = 1;

/// Full data export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub version: u32,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    pub settings: Settings,

    /// Newest first
    pub expenses: Vec<ExpenseRecord>,
}

impl ExportPayload {
    pub fn new(settings: &Settings, expenses: &[ExpenseRecord]) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            app_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            settings: settings.clone(),
            expenses: expenses.to_vec(),
        }
    }

    /// Write the payload as JSON
    pub fn write_to<W: Write>(&self, writer: W, pretty: bool) -> SpendGuardResult<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)
        } else {
            serde_json::to_writer(writer, self)
        }
        .map_err(|e| SpendGuardError::Export(e.to_string()))
    }

    pub fn to_json(&self, pretty: bool) -> SpendGuardResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, pretty)?;
        String::from_utf8(buffer).map_err(|e| SpendGuardError::Export(e.to_string()))
    }
}

/// An import payload that has passed the shape checks
///
/// Expense entries are still raw; they are validated when they replace the
/// ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPayload {
    pub version: Option<u64>,
    pub settings: SettingsPatch,
    pub expenses: Vec<ExpenseRecordData>,
}

/// Parse and shape-check an import payload
///
/// # Errors
///
/// Returns an import error if the text is not a JSON object, if `expenses` is
/// not an array, or if `settings` is not an object.
pub fn parse_import(json: &str) -> SpendGuardResult<ImportPayload> {
    let parsed: Value = serde_json::from_str(json)
        .map_err(|_| SpendGuardError::Import("Invalid data format".into()))?;

    let object = parsed
        .as_object()
        .ok_or_else(|| SpendGuardError::Import("Invalid data format".into()))?;

    let expenses = match object.get("expenses") {
        Some(Value::Array(entries)) => entries,
        _ => return Err(SpendGuardError::Import("Expenses are missing".into())),
    };

    let settings = match object.get("settings") {
        Some(settings @ Value::Object(_)) => settings,
        _ => return Err(SpendGuardError::Import("Settings are missing".into())),
    };

    let settings = SettingsPatch::deserialize(settings)
        .map_err(|e| SpendGuardError::Import(format!("Invalid settings: {}", e)))?;

    let expenses = expenses
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            ExpenseRecordData::deserialize(entry).map_err(|e| {
                SpendGuardError::Import(format!("expense #{}: {}", index + 1, e))
            })
        })
        .collect::<SpendGuardResult<Vec<_>>>()?;

    Ok(ImportPayload {
        version: object.get("version").and_then(Value::as_u64),
        settings,
        expenses,
    })
}
