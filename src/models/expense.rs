//! Expense model
//!
//! An `ExpenseRecord` is immutable once created. Its `dateKey` and `month`
//! projections are computed from the record's date on demand and are only
//! written out for compatibility with exported payloads; values read back from
//! a payload are never trusted.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, PaymentMethod};
use super::ids::ExpenseId;
use super::keys::{DateKey, MonthKey};
use super::money::Money;

/// A candidate expense, before it has been accepted into the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Money,
    pub date: DateKey,
    pub category: Category,
    pub payment_method: PaymentMethod,
    pub description: Option<String>,
}

impl NewExpense {
    pub fn new(amount: Money, date: DateKey, category: impl Into<Category>) -> Self {
        Self {
            amount,
            date,
            category: category.into(),
            payment_method: PaymentMethod::default(),
            description: None,
        }
    }

    pub fn with_payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_description(Some(description.into()));
        self
    }

    /// Validate the candidate against the allowed category catalog
    pub fn validate(&self, categories: &[Category]) -> Result<(), ExpenseValidationError> {
        check_amount(self.amount)?;
        check_category(&self.category, categories)
    }
}

/// An accepted expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ExpenseRecordData", try_from = "ExpenseRecordData")]
pub struct ExpenseRecord {
    id: ExpenseId,
    amount: Money,
    date: DateKey,
    category: Category,
    payment_method: PaymentMethod,
    description: Option<String>,
}

impl ExpenseRecord {
    /// Create a record from an accepted candidate, assigning a fresh id
    pub fn from_new(expense: NewExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            amount: expense.amount,
            date: expense.date,
            category: expense.category,
            payment_method: expense.payment_method,
            description: normalize_description(expense.description),
        }
    }

    /// Create a record with a caller-chosen id (seeding, tests)
    pub fn with_id(id: ExpenseId, expense: NewExpense) -> Self {
        Self {
            id,
            ..Self::from_new(expense)
        }
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> DateKey {
        self.date
    }

    /// `YYYY-MM-DD` projection of the date
    pub fn date_key(&self) -> DateKey {
        self.date
    }

    /// `YYYY-MM` projection of the date
    pub fn month_key(&self) -> MonthKey {
        self.date.month_key()
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Check the record's category against an allowed catalog
    pub fn check_category(&self, categories: &[Category]) -> Result<(), ExpenseValidationError> {
        check_category(&self.category, categories)
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}

/// Wire shape of an expense record, as found in exports and the data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecordData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub amount: Money,

    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Derived; only used when `date` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_key: Option<String>,

    /// Derived; ignored on read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,

    pub category: String,

    pub payment_method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<ExpenseRecord> for ExpenseRecordData {
    fn from(record: ExpenseRecord) -> Self {
        let date = record.date.to_string();
        Self {
            id: Some(record.id.to_string()),
            amount: record.amount,
            date_key: Some(date.clone()),
            month: Some(record.month_key().to_string()),
            date: Some(date),
            category: record.category.name().to_string(),
            payment_method: record.payment_method.name().to_string(),
            description: record.description,
        }
    }
}

impl TryFrom<ExpenseRecordData> for ExpenseRecord {
    type Error = ExpenseValidationError;

    fn try_from(data: ExpenseRecordData) -> Result<Self, Self::Error> {
        let id = match data.id {
            Some(raw) => ExpenseId::parse(&raw).ok_or(ExpenseValidationError::BlankId)?,
            None => ExpenseId::new(),
        };

        check_amount(data.amount)?;

        let date = match (data.date.as_deref(), data.date_key.as_deref()) {
            (Some(raw), _) => parse_wire_date(raw)?,
            (None, Some(raw)) => DateKey::parse(raw)
                .map_err(|_| ExpenseValidationError::InvalidDate(raw.to_string()))?,
            (None, None) => return Err(ExpenseValidationError::MissingDate),
        };

        let category = Category::new(data.category);
        if category.name().is_empty() {
            return Err(ExpenseValidationError::BlankCategory);
        }

        let payment_method = data
            .payment_method
            .parse::<PaymentMethod>()
            .map_err(|_| ExpenseValidationError::UnknownPaymentMethod(data.payment_method))?;

        Ok(Self {
            id,
            amount: data.amount,
            date,
            category,
            payment_method,
            description: normalize_description(data.description),
        })
    }
}

fn check_amount(amount: Money) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    if amount.exceeds_max() {
        return Err(ExpenseValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

/// Parse a wire date: a plain key, or the calendar date of a timestamp in its
/// own offset
fn parse_wire_date(raw: &str) -> Result<DateKey, ExpenseValidationError> {
    if let Ok(key) = DateKey::parse(raw) {
        return Ok(key);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Ok(DateKey::new(timestamp.date_naive()));
    }
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| DateKey::new(dt.date()))
        .map_err(|_| ExpenseValidationError::InvalidDate(raw.to_string()))
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

fn check_category(
    category: &Category,
    categories: &[Category],
) -> Result<(), ExpenseValidationError> {
    if categories.contains(category) {
        Ok(())
    } else {
        Err(ExpenseValidationError::UnknownCategory(
            category.name().to_string(),
        ))
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    InvalidDate(String),
    MissingDate,
    BlankId,
    BlankCategory,
    UnknownCategory(String),
    UnknownPaymentMethod(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount cannot exceed {} (got {})", Money::MAX, amount)
            }
            Self::InvalidDate(raw) => write!(f, "Invalid date '{}'", raw),
            Self::MissingDate => write!(f, "Expense has no date"),
            Self::BlankId => write!(f, "Expense id cannot be blank"),
            Self::BlankCategory => write!(f, "Category cannot be blank"),
            Self::UnknownCategory(name) => write!(f, "Unknown category '{}'", name),
            Self::UnknownPaymentMethod(name) => write!(f, "Unknown payment method '{}'", name),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    fn data(amount: i64, date: &str) -> ExpenseRecordData {
        ExpenseRecordData {
            id: Some("e1".into()),
            amount: Money::from_units(amount),
            date: Some(date.into()),
            category: "Food".into(),
            payment_method: "Cash".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_expense_validation() {
        let catalog = Category::defaults();
        let ok = NewExpense::new(Money::from_units(100), date("2026-02-03"), "Food");
        assert!(ok.validate(&catalog).is_ok());

        let zero = NewExpense::new(Money::zero(), date("2026-02-03"), "Food");
        assert_eq!(
            zero.validate(&catalog),
            Err(ExpenseValidationError::NonPositiveAmount(Money::zero()))
        );

        let huge = NewExpense::new(Money::MAX + Money::from_cents(1), date("2026-02-03"), "Food");
        assert!(matches!(
            huge.validate(&catalog),
            Err(ExpenseValidationError::AmountTooLarge(_))
        ));

        let unknown = NewExpense::new(Money::from_units(1), date("2026-02-03"), "Travel");
        assert!(matches!(
            unknown.validate(&catalog),
            Err(ExpenseValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_record_projections() {
        let record = ExpenseRecord::from_new(
            NewExpense::new(Money::from_units(120), date("2026-02-03"), "Food")
                .with_payment_method(PaymentMethod::Online)
                .with_description("  lunch "),
        );
        assert_eq!(record.date_key().to_string(), "2026-02-03");
        assert_eq!(record.month_key().to_string(), "2026-02");
        assert_eq!(record.description(), Some("lunch"));
        assert_eq!(record.payment_method(), PaymentMethod::Online);
    }

    #[test]
    fn test_serialized_shape() {
        let record = ExpenseRecord::with_id(
            ExpenseId::parse("abc").unwrap(),
            NewExpense::new(Money::from_cents(1250), date("2026-02-03"), "Transport"),
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["amount"], 12.5);
        assert_eq!(value["date"], "2026-02-03");
        assert_eq!(value["dateKey"], "2026-02-03");
        assert_eq!(value["month"], "2026-02");
        assert_eq!(value["paymentMethod"], "Cash");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_stale_derived_keys_are_recomputed() {
        let json = r#"{
            "id": "x", "amount": 50, "date": "2026-03-05",
            "dateKey": "1999-01-01", "month": "1999-01",
            "category": "Food", "paymentMethod": "Cash"
        }"#;
        let record: ExpenseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date_key().to_string(), "2026-03-05");
        assert_eq!(record.month_key().to_string(), "2026-03");
    }

    #[test]
    fn test_timestamp_dates() {
        let record = ExpenseRecord::try_from(data(10, "2026-02-03T18:30:00.000Z")).unwrap();
        assert_eq!(record.date(), date("2026-02-03"));

        let offset = ExpenseRecord::try_from(data(10, "2026-02-03T23:30:00-05:00")).unwrap();
        assert_eq!(offset.date(), date("2026-02-03"));
    }

    #[test]
    fn test_date_key_fallback() {
        let mut raw = data(10, "ignored");
        raw.date = None;
        raw.date_key = Some("2026-01-09".into());
        assert_eq!(ExpenseRecord::try_from(raw).unwrap().date(), date("2026-01-09"));
    }

    #[test]
    fn test_wire_validation_errors() {
        assert!(matches!(
            ExpenseRecord::try_from(data(0, "2026-02-03")),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));
        assert!(matches!(
            ExpenseRecord::try_from(data(500_000_000_000_000, "2026-02-03")),
            Err(ExpenseValidationError::AmountTooLarge(_))
        ));
        assert!(matches!(
            ExpenseRecord::try_from(data(5, "yesterday")),
            Err(ExpenseValidationError::InvalidDate(_))
        ));

        let mut no_date = data(5, "2026-02-03");
        no_date.date = None;
        assert_eq!(
            ExpenseRecord::try_from(no_date),
            Err(ExpenseValidationError::MissingDate)
        );

        let mut card = data(5, "2026-02-03");
        card.payment_method = "Card".into();
        assert!(matches!(
            ExpenseRecord::try_from(card),
            Err(ExpenseValidationError::UnknownPaymentMethod(_))
        ));

        let mut blank_id = data(5, "2026-02-03");
        blank_id.id = Some(" ".into());
        assert_eq!(
            ExpenseRecord::try_from(blank_id),
            Err(ExpenseValidationError::BlankId)
        );
    }

    #[test]
    fn test_missing_id_gets_fresh_one() {
        let mut raw = data(5, "2026-02-03");
        raw.id = None;
        let record = ExpenseRecord::try_from(raw).unwrap();
        assert!(!record.id().as_str().is_empty());
    }
}
