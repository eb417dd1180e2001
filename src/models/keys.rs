//! Calendar keys used for querying the ledger
//!
//! `DateKey` is a day (`YYYY-MM-DD`) and `MonthKey` a calendar month (`YYYY-MM`).
//! Both always render zero-padded, and both compare by calendar order rather
//! than by their string form.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year/month/day, if the date exists
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date on the local clock
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` key
    ///
    /// The month and day must be two digits, so every accepted key renders
    /// back to exactly the input string.
    pub fn parse(s: &str) -> Result<Self, KeyParseError> {
        let s = s.trim();
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(KeyParseError::InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| KeyParseError::InvalidDate(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Day of month, 1-based
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The month this day belongs to
    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.0.year(),
            month: self.0.month(),
        }
    }

    /// The following calendar day
    pub fn succ(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }

    /// The preceding calendar day
    pub fn pred(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }

    /// Shift by a signed number of days
    pub fn offset_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, KeyParseError> {
        if !(1..=12).contains(&month) {
            return Err(KeyParseError::InvalidMonth(month));
        }
        // Years chrono can't represent would make first_day() impossible
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(KeyParseError::InvalidFormat(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// Parse a `YYYY-MM` key
    pub fn parse(s: &str) -> Result<Self, KeyParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| KeyParseError::InvalidFormat(s.to_string()))?;

        if year.len() != 4 || month.len() != 2 {
            return Err(KeyParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| KeyParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| KeyParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> DateKey {
        DateKey(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN))
    }

    /// Last day of the month
    pub fn last_day(&self) -> DateKey {
        self.next().first_day().pred()
    }

    /// Number of days in the month
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Check if a day falls within this month
    pub fn contains(&self, date: DateKey) -> bool {
        date.month_key() == *self
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Error type for key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    InvalidDate(String),
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParseError::InvalidDate(s) => {
                write!(f, "Invalid date '{}': expected YYYY-MM-DD", s)
            }
            KeyParseError::InvalidFormat(s) => {
                write!(f, "Invalid month '{}': expected YYYY-MM", s)
            }
            KeyParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for KeyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateKey {
        DateKey::parse(s).unwrap()
    }

    #[test]
    fn test_date_key_round_trip() {
        let key = date("2026-02-03");
        assert_eq!(key.to_string(), "2026-02-03");
        assert_eq!(key.day(), 3);
        assert_eq!(key.month_key().to_string(), "2026-02");
    }

    #[test]
    fn test_date_key_rejects_unpadded_and_invalid() {
        assert!(DateKey::parse("2026-2-3").is_err());
        assert!(DateKey::parse("2026-02-30").is_err());
        assert!(DateKey::parse("not a date").is_err());
        assert!(DateKey::parse("").is_err());
    }

    #[test]
    fn test_date_ordering_matches_calendar() {
        assert!(date("2026-02-09") < date("2026-02-10"));
        assert!(date("2025-12-31") < date("2026-01-01"));
    }

    #[test]
    fn test_succ_crosses_month_and_year() {
        assert_eq!(date("2026-01-31").succ(), date("2026-02-01"));
        assert_eq!(date("2025-12-31").succ(), date("2026-01-01"));
        assert_eq!(date("2026-03-01").pred(), date("2026-02-28"));
    }

    #[test]
    fn test_month_key_parse() {
        let month = MonthKey::parse("2026-02").unwrap();
        assert_eq!(month.year(), 2026);
        assert_eq!(month.month(), 2);
        assert_eq!(month.to_string(), "2026-02");

        assert_eq!(MonthKey::parse("2026-13"), Err(KeyParseError::InvalidMonth(13)));
        assert!(MonthKey::parse("2026-2").is_err());
        assert!(MonthKey::parse("202602").is_err());
    }

    #[test]
    fn test_month_navigation() {
        let jan = MonthKey::new(2026, 1).unwrap();
        assert_eq!(jan.previous(), MonthKey::new(2025, 12).unwrap());
        assert_eq!(jan.next(), MonthKey::new(2026, 2).unwrap());
        assert_eq!(MonthKey::new(2025, 12).unwrap().next(), jan);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(MonthKey::new(2026, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthKey::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthKey::new(2026, 12).unwrap().days_in_month(), 31);
        assert_eq!(MonthKey::new(2026, 4).unwrap().last_day(), date("2026-04-30"));
    }

    #[test]
    fn test_contains() {
        let feb = MonthKey::new(2026, 2).unwrap();
        assert!(feb.contains(date("2026-02-28")));
        assert!(!feb.contains(date("2026-03-01")));
    }

    #[test]
    fn test_serialization() {
        let key = date("2026-02-03");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2026-02-03\"");
        let back: DateKey = serde_json::from_str("\"2026-02-03\"").unwrap();
        assert_eq!(back, key);

        let month: MonthKey = serde_json::from_str("\"2026-02\"").unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2026-02\"");
    }
}
