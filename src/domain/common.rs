use std::fmt;

use chrono::{DateTime, Local, Utc};

use crate::errors::{LedgerError, Result};

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> i64;
}

/// Entities stamped with their creation instant in epoch milliseconds.
pub trait Timestamped {
    fn timestamp(&self) -> i64;
}

/// Text fields that list views can search over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Description,
    Category,
}

/// Exposes searchable text. Returns `None` when the entity has no such field.
pub trait Searchable {
    fn field_text(&self, field: SearchField) -> Option<&str>;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Display strings folded into every entry at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStamp {
    pub date: String,
    pub time: String,
}

impl DisplayStamp {
    /// Formats `at` in local time as `Oct 16, 2026` / `03:45 PM`.
    pub fn from_instant(at: DateTime<Utc>) -> Self {
        let local = at.with_timezone(&Local);
        Self {
            date: local.format("%b %-d, %Y").to_string(),
            time: local.format("%I:%M %p").to_string(),
        }
    }
}

impl fmt::Display for DisplayStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} • {}", self.date, self.time)
    }
}

/// Parses a user-entered amount. Must be a finite number greater than zero.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        LedgerError::validation(format!("`{trimmed}` is not a valid amount"))
    })?;
    validate_amount(value)?;
    Ok(value)
}

pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::validation(
            "amount must be a positive number",
        ));
    }
    Ok(())
}

pub(crate) fn validate_description(desc: &str) -> Result<String> {
    let trimmed = desc.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(
            "description must not be empty",
        ));
    }
    Ok(trimmed.to_string())
}
