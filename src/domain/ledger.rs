use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{card::Card, common::Identifiable, debt::Debt, transaction::Transaction};
use crate::errors::{LedgerError, Result};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

fn default_schema_version() -> u8 {
    CURRENT_SCHEMA_VERSION
}

/// The whole durable state: transactions and debts (newest first) plus the card profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default, deserialize_with = "card_or_default")]
    pub card: Card,
}

/// A stored `"card": null` falls back to the default profile.
fn card_or_default<'de, D>(deserializer: D) -> std::result::Result<Card, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Card>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            debts: Vec::new(),
            card: Card::default(),
        }
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: i64) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    /// Largest id issued to any entry, used to seed the id generator.
    pub fn max_id(&self) -> Option<i64> {
        self.transactions
            .iter()
            .map(Identifiable::id)
            .chain(self.debts.iter().map(Identifiable::id))
            .max()
    }

    /// Drops the entry with `id` from the chosen list. Returns whether one matched.
    pub fn remove(&mut self, kind: ListKind, id: i64) -> bool {
        match kind {
            ListKind::Transactions => remove_by_id(&mut self.transactions, id),
            ListKind::Debts => remove_by_id(&mut self.debts, id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.debts.is_empty()
    }
}

fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: i64) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// The two entry sequences a delete can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Transactions,
    Debts,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Transactions => "transactions",
            ListKind::Debts => "debts",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "transactions" | "transaction" | "tx" => Ok(ListKind::Transactions),
            "debts" | "debt" => Ok(ListKind::Debts),
            other => Err(LedgerError::validation(format!(
                "unknown list `{other}` (expected transactions or debts)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_blob_without_schema_version_loads() {
        let json = r#"{
            "transactions": [
                {"id": 20, "timestamp": 20, "desc": "Salary", "amount": 1000, "type": "income",
                 "category": "Work", "date": "Jan 2, 2026", "time": "10:00 AM"}
            ],
            "debts": [
                {"id": 30, "timestamp": 30, "desc": "Sam", "amount": 50, "type": "lent",
                 "date": "Jan 3, 2026", "time": "11:00 AM"}
            ],
            "card": {"holder": "ADA", "number": "4111 1111 1111 1111", "expiry": "01/30", "cvv": "123"}
        }"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.max_id(), Some(30));
        assert_eq!(ledger.card.holder, "ADA");
    }

    #[test]
    fn missing_card_uses_default_profile() {
        let ledger: Ledger = serde_json::from_str(r#"{"transactions": [], "debts": []}"#).unwrap();
        assert_eq!(ledger.card, Card::default());
        assert!(ledger.is_empty());
    }

    #[test]
    fn null_card_keeps_entries_and_uses_default_profile() {
        let json = r#"{
            "transactions": [
                {"id": 1, "timestamp": 1, "desc": "Salary", "amount": 1000, "type": "income",
                 "date": "", "time": ""}
            ],
            "debts": [],
            "card": null
        }"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.card, Card::default());
    }

    #[test]
    fn remove_reports_whether_an_entry_matched() {
        let json = r#"{
            "transactions": [
                {"id": 2, "timestamp": 2, "desc": "Rent", "amount": 300, "type": "expense",
                 "date": "", "time": ""},
                {"id": 1, "timestamp": 1, "desc": "Salary", "amount": 1000, "type": "income",
                 "date": "", "time": ""}
            ],
            "debts": []
        }"#;
        let mut ledger: Ledger = serde_json::from_str(json).unwrap();
        assert!(!ledger.remove(ListKind::Debts, 2));
        assert!(ledger.remove(ListKind::Transactions, 2));
        assert!(!ledger.remove(ListKind::Transactions, 2));
        assert_eq!(ledger.transactions.len(), 1);
        assert_eq!(ledger.transactions[0].id, 1);
    }

    #[test]
    fn list_kind_accepts_singular_forms() {
        assert_eq!("debt".parse::<ListKind>().unwrap(), ListKind::Debts);
        assert!("cards".parse::<ListKind>().is_err());
    }
}
