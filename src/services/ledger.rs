//! Expense ledger
//!
//! Holds the accepted expense records, newest first, and answers the aggregate
//! queries the allowance engine and reports are built on. The ledger never
//! persists itself; the session flushes it after every mutation.

use std::collections::BTreeMap;

use crate::config::settings::Settings;
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::{
    Category, DateKey, ExpenseRecord, ExpenseRecordData, Money, MonthKey, NewExpense,
    PaymentMethod,
};

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by calendar month
    pub month: Option<MonthKey>,
    /// Filter by date range start (inclusive)
    pub start_date: Option<DateKey>,
    /// Filter by date range end (inclusive)
    pub end_date: Option<DateKey>,
    /// Filter by payment method
    pub payment_method: Option<PaymentMethod>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: DateKey, end: DateKey) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Only expenses on or after `start`
    pub fn since(mut self, start: DateKey) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Only expenses on or before `end`
    pub fn until(mut self, end: DateKey) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, record: &ExpenseRecord) -> bool {
        if let Some(category) = &self.category {
            if record.category() != category {
                return false;
            }
        }
        if let Some(month) = self.month {
            if record.month_key() != month {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if record.date() < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if record.date() > end {
                return false;
            }
        }
        if let Some(method) = self.payment_method {
            if record.payment_method() != method {
                return false;
            }
        }
        true
    }
}

/// The collection of accepted expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseLedger {
    records: Vec<ExpenseRecord>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-validated records, kept in the given order
    pub fn from_records(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    /// All records, newest first
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseRecord> {
        self.records.iter()
    }

    /// Total spent on a single day
    pub fn spent_on(&self, date: DateKey) -> Money {
        self.sum_where(|r| r.date_key() == date)
    }

    /// Total spent in a calendar month
    pub fn spent_in_month(&self, month: MonthKey) -> Money {
        self.sum_where(|r| r.month_key() == month)
    }

    /// Total spent in `month` on days strictly before `date`
    pub fn spent_in_month_before(&self, month: MonthKey, date: DateKey) -> Money {
        self.sum_where(|r| r.month_key() == month && r.date_key() < date)
    }

    /// Total spent between two dates, both inclusive
    pub fn spent_between(&self, start: DateKey, end: DateKey) -> Money {
        self.sum_where(|r| r.date() >= start && r.date() <= end)
    }

    /// Per-category totals for a month; categories with no spend are absent
    pub fn category_totals(&self, month: MonthKey) -> BTreeMap<Category, Money> {
        let mut totals: BTreeMap<Category, Money> = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.month_key() == month) {
            *totals.entry(record.category().clone()).or_default() += record.amount();
        }
        totals.retain(|_, amount| !amount.is_zero());
        totals
    }

    /// Per-day totals for a month, ascending, days with spend only
    pub fn daily_totals(&self, month: MonthKey) -> Vec<(DateKey, Money)> {
        let mut totals: BTreeMap<DateKey, Money> = BTreeMap::new();
        for record in self.records.iter().filter(|r| r.month_key() == month) {
            *totals.entry(record.date_key()).or_default() += record.amount();
        }
        totals.into_iter().collect()
    }

    /// Records matching a filter, newest first
    pub fn filter(&self, filter: &ExpenseFilter) -> Vec<&ExpenseRecord> {
        let matching = self.records.iter().filter(|r| filter.matches(r));
        match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }

    /// Add an accepted expense at the front of the ledger
    ///
    /// The caller is responsible for validating the candidate first; the id and
    /// the date projections are fixed here.
    pub fn append(&mut self, expense: NewExpense) -> ExpenseRecord {
        let record = ExpenseRecord::from_new(expense);
        self.records.insert(0, record.clone());
        record
    }

    /// Replace every record with imported data
    ///
    /// Every entry is validated against `settings` before anything changes. On
    /// the first bad entry the ledger is left exactly as it was.
    pub fn replace_all(
        &mut self,
        data: Vec<ExpenseRecordData>,
        settings: &Settings,
    ) -> SpendGuardResult<()> {
        let mut records = Vec::with_capacity(data.len());
        for (index, entry) in data.into_iter().enumerate() {
            let record = ExpenseRecord::try_from(entry)
                .map_err(|e| invalid_entry(index, &e.to_string()))?;
            records.push(record);
        }
        self.replace_records(records, settings)
    }

    /// Replace every record with already-built records, checking categories
    pub fn replace_records(
        &mut self,
        records: Vec<ExpenseRecord>,
        settings: &Settings,
    ) -> SpendGuardResult<()> {
        for (index, record) in records.iter().enumerate() {
            record
                .check_category(&settings.categories)
                .map_err(|e| invalid_entry(index, &e.to_string()))?;
        }
        self.records = records;
        Ok(())
    }

    fn sum_where<F>(&self, predicate: F) -> Money
    where
        F: Fn(&ExpenseRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .map(|r| r.amount())
            .sum()
    }
}

fn invalid_entry(index: usize, reason: &str) -> SpendGuardError {
    SpendGuardError::Validation(format!("expense #{}: {}", index + 1, reason))
}
