//! Application session
//!
//! The session owns the settings, the ledger and the storage backend for one
//! run of the program. It loads both on open, and every mutation is written
//! through the backend before it becomes visible: a change is applied to a
//! copy, persisted, and only then swapped in.

use rand::Rng;
use std::io::Write;
use tracing::info;

use crate::config::settings::{Settings, SettingsPatch};
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::export::{export_expenses_csv, parse_import, ExportPayload};
use crate::models::{DateKey, MonthKey, NewExpense};
use crate::reports::MonthlyReport;
use crate::services::{
    generate_demo_expenses, AddOutcome, AllowanceEngine, AllowanceStatus, ExpenseLedger,
};
use crate::storage::Persistence;

/// Summary of a completed import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub expenses: usize,
    pub replaced: usize,
}

/// Loaded application state plus the backend it is flushed to
pub struct Session<P: Persistence> {
    store: P,
    settings: Settings,
    ledger: ExpenseLedger,
}

impl<P: Persistence> Session<P> {
    /// Load settings and expenses from the backend
    pub fn open(store: P) -> SpendGuardResult<Self> {
        let (records, settings) = store.load()?;
        settings.validate()?;
        info!("Loaded {} expenses", records.len());

        Ok(Self {
            store,
            settings,
            ledger: ExpenseLedger::from_records(records),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ledger(&self) -> &ExpenseLedger {
        &self.ledger
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn engine(&self) -> AllowanceEngine<'_> {
        AllowanceEngine::new(&self.settings)
    }

    pub fn status(&self, today: DateKey) -> AllowanceStatus {
        self.engine().status(&self.ledger, today)
    }

    pub fn report(&self, month: MonthKey, today: DateKey) -> MonthlyReport {
        MonthlyReport::generate(&self.ledger, &self.settings, month, today)
    }

    /// Offer an expense to the allowance engine, persisting it if accepted
    ///
    /// A rejection under the hard policy is an `Ok` outcome with
    /// `accepted == false`; use [`AddOutcome::into_record`] to turn it into an
    /// error.
    pub fn add_expense(&mut self, expense: NewExpense) -> SpendGuardResult<AddOutcome> {
        let mut next = self.ledger.clone();
        let outcome = AllowanceEngine::new(&self.settings).add_expense(&mut next, expense)?;

        if outcome.accepted {
            self.store.save_expenses(next.records())?;
            self.ledger = next;
        }
        Ok(outcome)
    }

    /// Merge a settings patch and persist it
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> SpendGuardResult<&Settings> {
        let next = patch.apply(&self.settings)?;
        self.store.save_settings(&next)?;
        self.settings = next;
        info!("Settings updated");
        Ok(&self.settings)
    }

    /// Replace the ledger and merge settings from an exported payload
    ///
    /// Nothing changes unless the payload shape, the merged settings and every
    /// expense entry are all valid.
    pub fn import_json(&mut self, json: &str) -> SpendGuardResult<ImportSummary> {
        let payload = parse_import(json)?;
        let next_settings = payload.settings.apply(&self.settings)?;

        let mut next_ledger = self.ledger.clone();
        next_ledger.replace_all(payload.expenses, &next_settings)?;

        self.store.save_settings(&next_settings)?;
        self.store.save_expenses(next_ledger.records())?;

        let summary = ImportSummary {
            expenses: next_ledger.len(),
            replaced: self.ledger.len(),
        };
        self.settings = next_settings;
        self.ledger = next_ledger;
        info!(
            "Imported {} expenses, replacing {}",
            summary.expenses, summary.replaced
        );
        Ok(summary)
    }

    /// Fill the ledger with demo data for the `days` days ending at `today`
    ///
    /// Refuses to touch a ledger that already has expenses unless `force` is set.
    pub fn seed_demo<R: Rng>(
        &mut self,
        days: u32,
        today: DateKey,
        force: bool,
        rng: &mut R,
    ) -> SpendGuardResult<usize> {
        if !self.ledger.is_empty() && !force {
            return Err(SpendGuardError::Validation(format!(
                "Ledger already has {} expenses; use --force to replace them",
                self.ledger.len()
            )));
        }

        let records = generate_demo_expenses(days, today, rng);
        let mut next = ExpenseLedger::new();
        next.replace_records(records, &self.settings)?;

        self.store.save_expenses(next.records())?;
        self.ledger = next;
        info!("Seeded {} demo expenses over {} days", self.ledger.len(), days);
        Ok(self.ledger.len())
    }

    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload::new(&self.settings, self.ledger.records())
    }

    pub fn export_json(&self, pretty: bool) -> SpendGuardResult<String> {
        self.export_payload().to_json(pretty)
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> SpendGuardResult<usize> {
        export_expenses_csv(self.ledger.records(), writer)
    }
}
