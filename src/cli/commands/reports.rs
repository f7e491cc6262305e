//! Read-only views: dashboard, feeds, analytics, and statements.

use crate::cli::core::{take_flag, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{section as output_section, tint_amount};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{StatementRow, SummaryService};
use crate::domain::{DebtKind, TimeWindow, Transaction};

const DESCRIPTION_WIDTH: usize = 32;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Show balances, debt position, and recent activity",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "list",
            "List transactions in a time window, optionally searching",
            "list [all|7days|30days] [search text]",
            cmd_list,
        ),
        CommandEntry::new(
            "debts",
            "List debts, optionally searching descriptions",
            "debts [search text]",
            cmd_debts,
        ),
        CommandEntry::new(
            "analytics",
            "Break down expenses by category",
            "analytics",
            cmd_analytics,
        ),
        CommandEntry::new(
            "statement",
            "Print a reconciled statement for a time window",
            "statement [all|7days|30days] [--json]",
            cmd_statement,
        ),
    ]
}

/// Reads an optional leading window argument; everything after it is search text.
pub(crate) fn split_window(args: &[&str], default: TimeWindow) -> (TimeWindow, String) {
    match args.split_first() {
        Some((first, rest)) => match first.parse::<TimeWindow>() {
            Ok(window) => (window, rest.join(" ")),
            Err(_) => (default, args.join(" ")),
        },
        None => (default, String::new()),
    }
}

fn transaction_table(context: &ShellContext, items: &[&Transaction]) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
    ]);
    for txn in items {
        let amount = context.signed_money(txn.signed_amount());
        table.push_row(vec![
            txn.id.to_string(),
            txn.date.clone(),
            txn.desc.clone(),
            txn.category_or_default().to_string(),
            tint_amount(amount, txn.kind.is_credit()),
        ]);
    }
    table
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.ledger_manager.dashboard(context.config.recent_limit);

    output_section("Dashboard");
    io::print_info(format!("  Balance  : {}", context.money(summary.totals.balance)));
    io::print_info(format!("  Income   : {}", context.money(summary.totals.income)));
    io::print_info(format!("  Expenses : {}", context.money(summary.totals.expense)));
    io::print_info(format!(
        "  Debt net : {} (lent {}, borrowed {})",
        tint_amount(context.signed_money(summary.debts.net), summary.debts.net >= 0.0),
        context.money(summary.debts.lent),
        context.money(summary.debts.borrowed)
    ));

    output_section("Recent activity");
    if summary.recent.is_empty() {
        io::print_info("No transactions yet.");
    } else {
        let recent: Vec<&Transaction> = summary.recent.iter().collect();
        io::print_info(transaction_table(context, &recent).render());
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (window, query) = split_window(args, context.config.default_window);
    let feed = context.ledger_manager.transaction_feed(window, &query);
    let total = context.ledger_manager.ledger().transactions.len();

    output_section(format!("Transactions ({})", window.label()));
    if feed.is_empty() {
        io::print_info("No matching transactions.");
    } else {
        io::print_info(transaction_table(context, &feed).render());
    }
    io::print_hint(format!("{} of {} transactions shown.", feed.len(), total));
    Ok(())
}

fn cmd_debts(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let feed = context.ledger_manager.debt_feed(&query);

    output_section("Debts");
    if feed.is_empty() {
        io::print_info("No matching debts.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("ID"),
            TableColumn::left("Date"),
            TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
            TableColumn::left("Type"),
            TableColumn::right("Amount"),
        ]);
        for debt in &feed {
            let lent = debt.kind == DebtKind::Lent;
            let signed = if lent { debt.amount } else { -debt.amount };
            table.push_row(vec![
                debt.id.to_string(),
                debt.date.clone(),
                debt.desc.clone(),
                debt.kind.to_string(),
                tint_amount(context.signed_money(signed), lent),
            ]);
        }
        io::print_info(table.render());
    }

    let totals = SummaryService::debt_totals(&context.ledger_manager.ledger().debts);
    io::print_info(format!(
        "Lent {} / Borrowed {} / Net {}",
        context.money(totals.lent),
        context.money(totals.borrowed),
        context.signed_money(totals.net)
    ));
    Ok(())
}

fn cmd_analytics(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.ledger_manager.ledger();
    let shares = SummaryService::category_breakdown(&ledger.transactions);

    output_section("Spending by category");
    if shares.is_empty() {
        io::print_info("No expenses recorded yet.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Spent"),
        TableColumn::right("Share"),
    ]);
    for share in &shares {
        table.push_row(vec![
            share.category.clone(),
            context.money(share.total),
            format!("{}%", share.percentage),
        ]);
    }
    io::print_info(table.render());
    let totals = SummaryService::transaction_totals(&ledger.transactions);
    io::print_info(format!("Total expenses: {}", context.money(totals.expense)));
    Ok(())
}

fn cmd_statement(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (as_json, rest) = take_flag(args, "--json");
    let window = match rest.as_slice() {
        [] => context.config.default_window,
        [window] => window.parse()?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: statement [all|7days|30days] [--json]".into(),
            ))
        }
    };
    let statement = context.ledger_manager.statement(window);

    if as_json {
        io::print_info(serde_json::to_string_pretty(&statement)?);
        return Ok(());
    }

    let header = &statement.header;
    output_section("Account statement");
    io::print_info(format!("  Card holder : {}", header.holder));
    io::print_info(format!("  Card number : {}", header.card_number));
    io::print_info(format!("  Issued      : {}", header.issued_on));
    io::print_info(format!("  Period      : {}", header.period));
    io::print_info(format!(
        "  Opening {}  Credits +{}  Debits -{}  Closing {}",
        context.money(statement.opening_balance),
        context.money(statement.period_credit),
        context.money(statement.period_debit),
        context.money(statement.closing_balance)
    ));

    if let [StatementRow::NoTransactions { message }] = statement.rows.as_slice() {
        io::print_info(format!("  {message}"));
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
        TableColumn::left("Category"),
        TableColumn::left("Ref"),
        TableColumn::right("Debit"),
        TableColumn::right("Credit"),
        TableColumn::right("Balance"),
    ]);
    for entry in statement.entries() {
        table.push_row(vec![
            entry.date.clone(),
            entry.description.clone(),
            entry.category.clone(),
            entry.reference_label(),
            entry.debit.map(|v| context.money(v)).unwrap_or_else(|| "-".into()),
            entry.credit.map(|v| context.money(v)).unwrap_or_else(|| "-".into()),
            context.money(entry.balance),
        ]);
    }
    io::print_info(table.render());
    Ok(())
}
