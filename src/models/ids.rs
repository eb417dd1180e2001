//! Expense identifiers
//!
//! New expenses get a UUID v4. Identifiers read back from an import are kept
//! verbatim, since older exports used their own id scheme.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::keys::DateKey;

/// Opaque, immutable identifier of an expense record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier; blank identifiers are rejected
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(Self(s.to_string()))
        }
    }

    /// Deterministic id for the `index`th demo expense of a day
    pub fn demo(date: DateKey, index: usize) -> Self {
        Self(format!("demo-{}-{}", date, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for tables: the first 8 characters
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_uuids() {
        let id = ExpenseId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, ExpenseId::new());
    }

    #[test]
    fn test_parse_keeps_foreign_ids() {
        let id = ExpenseId::parse("demo-2026-02-03-0").unwrap();
        assert_eq!(id.as_str(), "demo-2026-02-03-0");
        assert!(ExpenseId::parse("   ").is_none());
    }

    #[test]
    fn test_short() {
        let id = ExpenseId::parse("1700000000000-abc").unwrap();
        assert_eq!(id.short(), "17000000");
        assert_eq!(ExpenseId::parse("abc").unwrap().short(), "abc");
    }

    #[test]
    fn test_serialization() {
        let id = ExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
