use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Debt, DebtKind, Ledger, Transaction, TransactionKind};

/// Income/expense totals over a transaction set.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct TransactionTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Lent/borrowed totals. A positive `net` is owed to the user.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct DebtTotals {
    pub lent: f64,
    pub borrowed: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Whole-number share of total expenses.
    pub percentage: u32,
}

/// Everything the dashboard shows, computed over the unfiltered ledger.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub totals: TransactionTotals,
    pub debts: DebtTotals,
    pub categories: Vec<CategoryShare>,
    pub recent: Vec<Transaction>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn transaction_totals<'a, I>(transactions: I) -> TransactionTotals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expense) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    TransactionKind::Income => (income + txn.amount, expense),
                    TransactionKind::Expense => (income, expense + txn.amount),
                });
        TransactionTotals {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn debt_totals<'a, I>(debts: I) -> DebtTotals
    where
        I: IntoIterator<Item = &'a Debt>,
    {
        let (lent, borrowed) = debts
            .into_iter()
            .fold((0.0, 0.0), |(lent, borrowed), debt| match debt.kind {
                DebtKind::Lent => (lent + debt.amount, borrowed),
                DebtKind::Borrowed => (lent, borrowed + debt.amount),
            });
        DebtTotals {
            lent,
            borrowed,
            net: lent - borrowed,
        }
    }

    /// Expense totals per category in first-appearance order. Empty when
    /// there are no expenses.
    pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
        let mut order: Vec<String> = Vec::new();
        let mut sums: HashMap<String, f64> = HashMap::new();
        let mut expense_total = 0.0;

        for txn in transactions
            .iter()
            .filter(|txn| txn.kind == TransactionKind::Expense)
        {
            let category = txn.category_or_default();
            expense_total += txn.amount;
            match sums.get_mut(category) {
                Some(sum) => *sum += txn.amount,
                None => {
                    order.push(category.to_string());
                    sums.insert(category.to_string(), txn.amount);
                }
            }
        }

        if expense_total <= 0.0 {
            return Vec::new();
        }

        order
            .into_iter()
            .map(|category| {
                let total = sums.get(&category).copied().unwrap_or_default();
                let percentage = (100.0 * total / expense_total).round() as u32;
                CategoryShare {
                    category,
                    total,
                    percentage,
                }
            })
            .collect()
    }

    /// The `limit` most recently created transactions, newest first.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.id.cmp(&a.id));
        sorted.into_iter().take(limit).cloned().collect()
    }

    pub fn dashboard(ledger: &Ledger, recent_limit: usize) -> DashboardSummary {
        DashboardSummary {
            totals: Self::transaction_totals(&ledger.transactions),
            debts: Self::debt_totals(&ledger.debts),
            categories: Self::category_breakdown(&ledger.transactions),
            recent: Self::recent(&ledger.transactions, recent_limit),
        }
    }
}
