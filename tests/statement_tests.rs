mod common;

use aether_ledger::{
    core::services::{Statement, StatementRow, StatementService, EMPTY_PERIOD_MESSAGE},
    domain::{Ledger, TimeWindow, TransactionKind},
};
use chrono::{DateTime, TimeZone, Utc};
use common::{aged_txn, memory_harness, NOW};

fn now() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(NOW).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn all_window_statement_for_salary_and_rent() {
    let mut harness = memory_harness();
    harness
        .manager
        .add_transaction("Salary", 1000.0, TransactionKind::Income, "Work")
        .unwrap();
    harness
        .manager
        .add_transaction("Rent", 300.0, TransactionKind::Expense, "Housing")
        .unwrap();

    let statement = harness.manager.statement(TimeWindow::All);
    assert_eq!(statement.opening_balance, 0.0);
    assert_eq!(statement.closing_balance, 700.0);
    assert_eq!(statement.period_debit, 300.0);
    assert_eq!(statement.period_credit, 1000.0);

    let entries: Vec<_> = statement.entries().collect();
    assert_eq!(entries.len(), 2);
    // Both entries share a millisecond; creation order still wins.
    assert_eq!(entries[0].description, "Salary");
    assert_eq!(entries[0].credit, Some(1000.0));
    assert_eq!(entries[0].balance, 1000.0);
    assert_eq!(entries[1].description, "Rent");
    assert_eq!(entries[1].debit, Some(300.0));
    assert_eq!(entries[1].credit, None);
    assert_eq!(entries[1].balance, 700.0);
    assert_eq!(statement.header.period, "ALL");
    assert_eq!(statement.header.holder, "AETHER DRIFT");
}

fn row_summary(statement: &Statement) -> Vec<(String, Option<f64>, Option<f64>, f64)> {
    statement
        .entries()
        .map(|entry| (entry.description.clone(), entry.debit, entry.credit, entry.balance))
        .collect()
}

#[test]
fn running_balance_follows_creation_order() {
    let expected = vec![
        ("Salary".to_string(), None, Some(1000.0), 1000.0),
        ("Rent".to_string(), Some(300.0), None, 700.0),
        ("Groceries".to_string(), Some(120.0), None, 580.0),
    ];

    // Same millisecond for every entry.
    let mut frozen = memory_harness();
    // Clock advances between entries.
    let mut ticking = memory_harness();
    for (desc, amount, kind) in [
        ("Salary", 1000.0, TransactionKind::Income),
        ("Rent", 300.0, TransactionKind::Expense),
        ("Groceries", 120.0, TransactionKind::Expense),
    ] {
        frozen.manager.add_transaction(desc, amount, kind, "").unwrap();
        ticking.manager.add_transaction(desc, amount, kind, "").unwrap();
        ticking.clock.advance_millis(1_000);
    }

    for harness in [&frozen, &ticking] {
        let statement = harness.manager.statement(TimeWindow::All);
        assert_eq!(row_summary(&statement), expected);
        assert_eq!(statement.closing_balance, 580.0);
    }
}

#[test]
fn reconciliation_holds_for_every_window() {
    let mut ledger = Ledger::new();
    ledger.transactions = vec![
        aged_txn(90_001, 1, TransactionKind::Expense, 42.5, "Food"),
        aged_txn(90_002, 5, TransactionKind::Income, 250.0, "Work"),
        aged_txn(90_003, 12, TransactionKind::Expense, 80.0, "Travel"),
        aged_txn(90_004, 29, TransactionKind::Income, 19.99, "Refund"),
        aged_txn(90_005, 45, TransactionKind::Expense, 300.0, "Rent"),
        aged_txn(90_006, 200, TransactionKind::Income, 1200.0, "Work"),
    ];

    for window in TimeWindow::ALL {
        let statement = StatementService::generate(&ledger, window, now());
        assert!(
            close(
                statement.opening_balance + statement.period_credit - statement.period_debit,
                statement.closing_balance
            ),
            "{window}: reconciliation failed"
        );
        assert!(
            close(statement.final_balance(), statement.closing_balance),
            "{window}: running balance does not end at closing"
        );
        let timestamps: Vec<i64> = statement
            .entries()
            .map(|entry| ledger.transaction(entry.id).unwrap().timestamp)
            .collect();
        assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

#[test]
fn references_use_last_four_id_digits() {
    let mut ledger = Ledger::new();
    ledger.transactions = vec![aged_txn(1_767_225_604_321, 0, TransactionKind::Income, 5.0, "Tips")];
    let statement = StatementService::generate(&ledger, TimeWindow::Last7Days, now());
    let entry = statement.entries().next().unwrap();
    assert_eq!(entry.reference, "4321");
    assert_eq!(entry.reference_label(), "TX#4321");
}

#[test]
fn empty_period_has_placeholder_and_flat_balance() {
    let mut ledger = Ledger::new();
    ledger.transactions = vec![aged_txn(1, 90, TransactionKind::Income, 100.0, "Work")];
    let statement = StatementService::generate(&ledger, TimeWindow::Last30Days, now());

    assert_eq!(statement.opening_balance, 100.0);
    assert_eq!(statement.closing_balance, 100.0);
    assert_eq!(statement.period_net, 0.0);
    assert_eq!(
        statement.rows,
        vec![StatementRow::NoTransactions {
            message: EMPTY_PERIOD_MESSAGE.to_string()
        }]
    );
}

#[test]
fn statement_serialises_for_print_hosts() {
    let mut ledger = Ledger::new();
    ledger.transactions = vec![aged_txn(7, 2, TransactionKind::Expense, 9.5, "Food")];
    let statement = StatementService::generate(&ledger, TimeWindow::Last7Days, now());
    let json = serde_json::to_value(&statement).unwrap();
    assert_eq!(json["window"], "7days");
    assert_eq!(json["header"]["period"], "7DAYS");
    assert_eq!(json["rows"][0]["kind"], "entry");
    assert_eq!(json["rows"][0]["debit"], 9.5);
}
