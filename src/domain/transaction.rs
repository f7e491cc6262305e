use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::{
    validate_amount, validate_description, Displayable, DisplayStamp, Identifiable, SearchField,
    Searchable, Timestamped,
};
use crate::errors::{LedgerError, Result};

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Income)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::validation(format!(
                "unknown transaction type `{other}` (expected income or expense)"
            ))),
        }
    }
}

/// A single money flow. Serialized with the field names of the stored blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub timestamp: i64,
    pub desc: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Maps a blank category to [`DEFAULT_CATEGORY`].
pub fn normalize_category(category: &str) -> String {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        default_category()
    } else {
        trimmed.to_string()
    }
}

impl Transaction {
    /// Builds a validated transaction. `id` and `timestamp` come from the store.
    pub fn new(
        id: i64,
        timestamp: i64,
        stamp: DisplayStamp,
        desc: &str,
        amount: f64,
        kind: TransactionKind,
        category: &str,
    ) -> Result<Self> {
        let desc = validate_description(desc)?;
        validate_amount(amount)?;
        Ok(Self {
            id,
            timestamp,
            desc,
            amount,
            kind,
            category: normalize_category(category),
            date: stamp.date,
            time: stamp.time,
        })
    }

    /// Category used for grouping; blank values written by older data fall back to the default.
    pub fn category_or_default(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            DEFAULT_CATEGORY
        } else {
            trimmed
        }
    }

    /// Signed contribution to the running balance.
    pub fn signed_amount(&self) -> f64 {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }

    /// Applies the patch to a copy and validates the result.
    pub fn patched(&self, patch: &TransactionPatch) -> Result<Self> {
        let mut updated = self.clone();
        if let Some(desc) = &patch.desc {
            updated.desc = validate_description(desc)?;
        }
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
            updated.amount = amount;
        }
        if let Some(kind) = patch.kind {
            updated.kind = kind;
        }
        if let Some(category) = &patch.category {
            updated.category = normalize_category(category);
        }
        Ok(updated)
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Timestamped for Transaction {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Searchable for Transaction {
    fn field_text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Description => Some(&self.desc),
            SearchField::Category => Some(&self.category),
        }
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{}] {}", self.id, self.kind, self.desc)
    }
}

/// Editable fields of a transaction. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub desc: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.desc.is_none() && self.amount.is_none() && self.kind.is_none() && self.category.is_none()
    }
}
