mod common;

use aether_ledger::{
    core::services::{FilterService, SummaryService},
    domain::{window::DAY_MILLIS, DebtKind, SearchField, TimeWindow, TransactionKind},
};
use common::{aged_txn, memory_harness, NOW};

#[test]
fn windows_nest_inside_each_other() {
    let items = vec![
        aged_txn(6, 0, TransactionKind::Expense, 1.0, "A"),
        aged_txn(5, 7, TransactionKind::Expense, 1.0, "A"),
        aged_txn(4, 8, TransactionKind::Expense, 1.0, "A"),
        aged_txn(3, 30, TransactionKind::Expense, 1.0, "A"),
        aged_txn(2, 31, TransactionKind::Expense, 1.0, "A"),
        aged_txn(1, 365, TransactionKind::Expense, 1.0, "A"),
    ];
    let ids = |window| -> Vec<i64> {
        FilterService::by_time(&items, window, NOW)
            .iter()
            .map(|txn| txn.id)
            .collect()
    };

    let week = ids(TimeWindow::Last7Days);
    let month = ids(TimeWindow::Last30Days);
    let all = ids(TimeWindow::All);
    assert_eq!(week, vec![6, 5], "boundary day is included");
    assert_eq!(month, vec![6, 5, 4, 3]);
    assert_eq!(all.len(), items.len());
    assert!(week.iter().all(|id| month.contains(id)));
}

#[test]
fn one_millisecond_past_the_boundary_is_excluded() {
    let mut edge = aged_txn(1, 7, TransactionKind::Income, 1.0, "A");
    edge.timestamp = NOW - 7 * DAY_MILLIS - 1;
    assert!(FilterService::by_time(&[edge], TimeWindow::Last7Days, NOW).is_empty());
}

#[test]
fn filters_compose_without_touching_totals() {
    let mut harness = memory_harness();
    let manager = &mut harness.manager;
    manager
        .add_transaction("Salary", 1000.0, TransactionKind::Income, "Work")
        .unwrap();
    manager
        .add_transaction("Coffee beans", 12.0, TransactionKind::Expense, "Food")
        .unwrap();
    manager
        .add_transaction("Train", 30.0, TransactionKind::Expense, "Travel")
        .unwrap();
    manager.add_debt("Lunch with Sam", 20.0, DebtKind::Lent).unwrap();
    manager.add_debt("Alex rent share", 50.0, DebtKind::Borrowed).unwrap();

    let food = manager.transaction_feed(TimeWindow::Last7Days, "FOOD");
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].desc, "Coffee beans");

    // Debt search covers descriptions only.
    assert_eq!(manager.debt_feed("sam").len(), 1);
    assert!(manager.debt_feed("Travel").is_empty());

    let summary = manager.dashboard(6);
    assert_eq!(summary.totals.income, 1000.0);
    assert_eq!(summary.totals.expense, 42.0);
    assert_eq!(
        summary.totals.balance,
        summary.totals.income - summary.totals.expense
    );
    assert_eq!(summary.debts.net, -30.0);
}

#[test]
fn text_filter_never_matches_missing_fields() {
    let mut harness = memory_harness();
    harness
        .manager
        .add_debt("Borrowed for books", 15.0, DebtKind::Borrowed)
        .unwrap();
    let debts = &harness.manager.ledger().debts;
    let hits = FilterService::by_text(debts, "General", &[SearchField::Category]);
    assert!(hits.is_empty());
}

#[test]
fn category_percentages_sum_to_about_one_hundred() {
    let txns = vec![
        aged_txn(4, 1, TransactionKind::Expense, 10.0, "Food"),
        aged_txn(3, 1, TransactionKind::Expense, 10.0, "Rent"),
        aged_txn(2, 1, TransactionKind::Expense, 10.0, "Travel"),
        aged_txn(1, 1, TransactionKind::Income, 500.0, "Work"),
    ];
    let shares = SummaryService::category_breakdown(&txns);
    let categories: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(categories, vec!["Food", "Rent", "Travel"]);
    let sum: u32 = shares.iter().map(|share| share.percentage).sum();
    assert!((99..=101).contains(&sum), "sum was {sum}");
}

#[test]
fn recent_feed_respects_limit_and_id_order() {
    let mut harness = memory_harness();
    for idx in 0..8 {
        harness
            .manager
            .add_transaction(&format!("entry {idx}"), 1.0, TransactionKind::Expense, "Misc")
            .unwrap();
    }
    let summary = harness.manager.dashboard(6);
    assert_eq!(summary.recent.len(), 6);
    assert_eq!(summary.recent[0].desc, "entry 7");
    assert!(summary.recent.windows(2).all(|pair| pair[0].id > pair[1].id));
}
