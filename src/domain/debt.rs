use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::{
    validate_amount, validate_description, Displayable, DisplayStamp, Identifiable, SearchField,
    Searchable, Timestamped,
};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    /// Money the user handed out and expects back.
    Lent,
    /// Money the user owes.
    Borrowed,
}

impl DebtKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtKind::Lent => "lent",
            DebtKind::Borrowed => "borrowed",
        }
    }
}

impl fmt::Display for DebtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebtKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lent" => Ok(DebtKind::Lent),
            "borrowed" => Ok(DebtKind::Borrowed),
            other => Err(LedgerError::validation(format!(
                "unknown debt type `{other}` (expected lent or borrowed)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
    pub id: i64,
    pub timestamp: i64,
    pub desc: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: DebtKind,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

impl Debt {
    pub fn new(
        id: i64,
        timestamp: i64,
        stamp: DisplayStamp,
        desc: &str,
        amount: f64,
        kind: DebtKind,
    ) -> Result<Self> {
        let desc = validate_description(desc)?;
        validate_amount(amount)?;
        Ok(Self {
            id,
            timestamp,
            desc,
            amount,
            kind,
            date: stamp.date,
            time: stamp.time,
        })
    }
}

impl Identifiable for Debt {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Timestamped for Debt {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Searchable for Debt {
    fn field_text(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Description => Some(&self.desc),
            SearchField::Category => None,
        }
    }
}

impl Displayable for Debt {
    fn display_label(&self) -> String {
        format!("debt:{} [{}] {}", self.id, self.kind, self.desc)
    }
}
