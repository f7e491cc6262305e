//! Statement reconciliation for a trailing time window.
//!
//! The closing balance is the balance over the whole ledger as of now. The
//! opening balance is recovered by subtracting the window's net flow from it,
//! which is exact only because every window ends at "now". A window with an
//! arbitrary end date would have to sum the entries before its start instead.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::core::services::{FilterService, SummaryService};
use crate::domain::{Card, Ledger, TimeWindow, Transaction};

const FALLBACK_HOLDER: &str = "Authorized User";
const FALLBACK_NUMBER: &str = "XXXX XXXX XXXX XXXX";
pub const EMPTY_PERIOD_MESSAGE: &str = "No transactions found in this period.";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatementHeader {
    pub holder: String,
    pub card_number: String,
    pub issued_on: String,
    pub period: String,
}

impl StatementHeader {
    fn new(card: &Card, window: TimeWindow, issued_at: DateTime<Utc>) -> Self {
        let holder = card.holder.trim();
        let number = card.number.trim();
        Self {
            holder: if holder.is_empty() {
                FALLBACK_HOLDER.to_string()
            } else {
                holder.to_string()
            },
            card_number: if number.is_empty() {
                FALLBACK_NUMBER.to_string()
            } else {
                number.to_string()
            },
            issued_on: issued_at.with_timezone(&Local).format("%m/%d/%Y").to_string(),
            period: window.label(),
        }
    }
}

/// One transaction line with the balance after it was applied.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatementEntry {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    /// Last four digits of the id.
    pub reference: String,
    pub debit: Option<f64>,
    pub credit: Option<f64>,
    pub balance: f64,
}

impl StatementEntry {
    pub fn reference_label(&self) -> String {
        format!("TX#{}", self.reference)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementRow {
    Entry(StatementEntry),
    NoTransactions { message: String },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Statement {
    pub window: TimeWindow,
    pub header: StatementHeader,
    pub opening_balance: f64,
    pub period_credit: f64,
    pub period_debit: f64,
    pub period_net: f64,
    pub closing_balance: f64,
    pub rows: Vec<StatementRow>,
}

impl Statement {
    pub fn entries(&self) -> impl Iterator<Item = &StatementEntry> {
        self.rows.iter().filter_map(|row| match row {
            StatementRow::Entry(entry) => Some(entry),
            StatementRow::NoTransactions { .. } => None,
        })
    }

    /// Running balance after the last row, or the opening balance when the period is empty.
    pub fn final_balance(&self) -> f64 {
        self.entries()
            .last()
            .map(|entry| entry.balance)
            .unwrap_or(self.opening_balance)
    }
}

pub struct StatementService;

impl StatementService {
    pub fn generate(ledger: &Ledger, window: TimeWindow, now: DateTime<Utc>) -> Statement {
        let mut period: Vec<&Transaction> =
            FilterService::by_time(&ledger.transactions, window, now.timestamp_millis());
        // Ids grow with creation order, so they break same-millisecond ties.
        period.sort_by_key(|txn| (txn.timestamp, txn.id));

        let period_totals = SummaryService::transaction_totals(period.iter().copied());
        let closing_balance = SummaryService::transaction_totals(&ledger.transactions).balance;
        let opening_balance = closing_balance - period_totals.balance;

        let rows = if period.is_empty() {
            vec![StatementRow::NoTransactions {
                message: EMPTY_PERIOD_MESSAGE.to_string(),
            }]
        } else {
            let mut running = opening_balance;
            period
                .iter()
                .map(|txn| {
                    running += txn.signed_amount();
                    let credit = txn.kind.is_credit();
                    StatementRow::Entry(StatementEntry {
                        id: txn.id,
                        date: txn.date.clone(),
                        description: txn.desc.clone(),
                        category: txn.category_or_default().to_string(),
                        reference: short_reference(txn.id),
                        debit: (!credit).then_some(txn.amount),
                        credit: credit.then_some(txn.amount),
                        balance: running,
                    })
                })
                .collect()
        };

        Statement {
            window,
            header: StatementHeader::new(&ledger.card, window, now),
            opening_balance,
            period_credit: period_totals.income,
            period_debit: period_totals.expense,
            period_net: period_totals.balance,
            closing_balance,
            rows,
        }
    }
}

fn short_reference(id: i64) -> String {
    let digits = id.to_string();
    let start = digits.len().saturating_sub(4);
    digits[start..].to_string()
}
