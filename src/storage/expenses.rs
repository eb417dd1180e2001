//! Expense repository for JSON storage
//!
//! Manages loading and saving the ledger to `data/expenses.json`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::SpendGuardResult;
use crate::models::ExpenseRecord;

use super::file_io::{read_json, write_json_atomic};

const FILE_VERSION: u32 = 1;

/// On-disk layout of the expense file
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ExpenseFile {
    Versioned {
        version: u32,
        expenses: Vec<ExpenseRecord>,
    },
    /// Older files held a bare array of records
    Bare(Vec<ExpenseRecord>),
}

impl Default for ExpenseFile {
    fn default() -> Self {
        ExpenseFile::Bare(Vec::new())
    }
}

/// Repository for the expense list, stored newest first
pub struct ExpenseRepository {
    path: PathBuf,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load all records; a missing file is an empty ledger
    pub fn load(&self) -> SpendGuardResult<Vec<ExpenseRecord>> {
        let file: ExpenseFile = read_json(&self.path)?;
        Ok(match file {
            ExpenseFile::Versioned { expenses, .. } => expenses,
            ExpenseFile::Bare(expenses) => expenses,
        })
    }

    /// Replace the file with the given records
    pub fn save(&self, records: &[ExpenseRecord]) -> SpendGuardResult<()> {
        #[derive(Serialize)]
        struct Out<'a> {
            version: u32,
            expenses: &'a [ExpenseRecord],
        }

        write_json_atomic(
            &self.path,
            &Out {
                version: FILE_VERSION,
                expenses: records,
            },
        )
    }
}
