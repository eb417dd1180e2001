//! Expense categories and payment methods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories offered out of the box
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Entertainment",
    "Bills",
    "Shopping",
    "Health",
    "Other",
];

/// A spending category
///
/// Categories are plain names. Which names are allowed is decided by the
/// catalog in the settings, so users can extend the default list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// The default catalog
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES.iter().map(|c| Category::new(*c)).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// How an expense was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
}

impl PaymentMethod {
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::Cash, PaymentMethod::Online]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Online => "Online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "online" => Ok(PaymentMethod::Online),
            other => Err(format!(
                "Unknown payment method '{}'. Use Cash or Online",
                other
            )),
        }
    }
}
