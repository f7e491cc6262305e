use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

pub const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Trailing time range ending at "now".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "7days")]
    Last7Days,
    #[serde(rename = "30days")]
    Last30Days,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 3] = [TimeWindow::All, TimeWindow::Last7Days, TimeWindow::Last30Days];

    /// Width of the window in milliseconds, `None` for the unbounded window.
    pub fn millis(&self) -> Option<i64> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Last7Days => Some(7 * DAY_MILLIS),
            TimeWindow::Last30Days => Some(30 * DAY_MILLIS),
        }
    }

    /// An item stamped at `timestamp` is inside when `now - timestamp <= width`.
    pub fn contains(&self, timestamp: i64, now: i64) -> bool {
        match self.millis() {
            None => true,
            Some(limit) => now.saturating_sub(timestamp) <= limit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Last7Days => "7days",
            TimeWindow::Last30Days => "30days",
        }
    }

    /// Upper-case period label printed on statements.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TimeWindow::All),
            "7days" => Ok(TimeWindow::Last7Days),
            "30days" => Ok(TimeWindow::Last30Days),
            other => Err(LedgerError::validation(format!(
                "unknown window `{other}` (expected all, 7days or 30days)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        let now = 100 * DAY_MILLIS;
        assert!(TimeWindow::Last7Days.contains(now - 7 * DAY_MILLIS, now));
        assert!(!TimeWindow::Last7Days.contains(now - 7 * DAY_MILLIS - 1, now));
    }

    #[test]
    fn parses_labels_in_any_case() {
        assert_eq!("30DAYS".parse::<TimeWindow>().unwrap(), TimeWindow::Last30Days);
        assert!("yesterday".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_string(&TimeWindow::Last7Days).unwrap();
        assert_eq!(json, "\"7days\"");
    }
}
