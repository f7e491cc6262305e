//! Commands that write to the ledger.

use crate::cli::core::{parse_id, take_flag, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::{parse_amount, DebtKind, ListKind, TransactionKind, TransactionPatch, DEFAULT_CATEGORY};

const ADD_USAGE: &str = "add <income|expense> <amount> <description> [category]";
const EDIT_USAGE: &str = "edit <id> <field=value>... (fields: desc, amount, type, category)";
const DEBT_USAGE: &str = "debt <lent|borrowed> <amount> <description>";
const DELETE_USAGE: &str = "delete <transaction|debt> <id>";
const CARD_USAGE: &str = "card [show [--reveal] | set <holder> <number> <expiry> <cvv>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change fields of a transaction", EDIT_USAGE, cmd_edit),
        CommandEntry::new("debt", "Record money lent or borrowed", DEBT_USAGE, cmd_debt),
        CommandEntry::new("delete", "Remove a transaction or debt", DELETE_USAGE, cmd_delete),
        CommandEntry::new(
            "reset",
            "Erase all transactions and debts",
            "reset [--wipe-card]",
            cmd_reset,
        ),
        CommandEntry::new("card", "Show or replace the card profile", CARD_USAGE, cmd_card),
    ]
}

fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", text))
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, desc, rest @ ..] = args else {
        return Err(usage(ADD_USAGE));
    };
    if rest.len() > 1 {
        return Err(usage(ADD_USAGE));
    }
    let kind: TransactionKind = kind.parse()?;
    let amount = parse_amount(amount)?;
    let category = rest.first().copied().unwrap_or(DEFAULT_CATEGORY);

    let txn = context
        .ledger_manager
        .add_transaction(desc, amount, kind, category)?;
    io::print_success(format!(
        "Recorded {} of {} under {} (#{}).",
        txn.kind,
        context.money(txn.amount),
        txn.category,
        txn.id
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, fields)) = args.split_first() else {
        return Err(usage(EDIT_USAGE));
    };
    let id = parse_id(id)?;

    let mut patch = TransactionPatch::default();
    for field in fields {
        let (key, value) = field.split_once('=').ok_or_else(|| {
            CommandError::InvalidArguments(format!("expected field=value, got `{}`", field))
        })?;
        match key.trim().to_ascii_lowercase().as_str() {
            "desc" | "description" => patch.desc = Some(value.to_string()),
            "amount" => patch.amount = Some(parse_amount(value)?),
            "type" | "kind" => patch.kind = Some(value.parse()?),
            "category" => patch.category = Some(value.to_string()),
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown field `{}`",
                    other
                )))
            }
        }
    }
    if patch.is_empty() {
        return Err(usage(EDIT_USAGE));
    }

    let txn = context.ledger_manager.update_transaction(id, &patch)?;
    io::print_success(format!(
        "Updated #{}: {} {} ({}).",
        txn.id,
        txn.desc,
        context.money(txn.amount),
        txn.kind
    ));
    Ok(())
}

fn cmd_debt(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, desc] = args else {
        return Err(usage(DEBT_USAGE));
    };
    let kind: DebtKind = kind.parse()?;
    let amount = parse_amount(amount)?;

    let debt = context.ledger_manager.add_debt(desc, amount, kind)?;
    io::print_success(format!(
        "Recorded {} {} with {} (#{}).",
        debt.kind,
        context.money(debt.amount),
        debt.desc,
        debt.id
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, id] = args else {
        return Err(usage(DELETE_USAGE));
    };
    let kind: ListKind = kind.parse()?;
    let id = parse_id(id)?;

    if !context.confirm(&format!("Delete entry #{} from {}?", id, kind))? {
        io::print_info("Cancelled.");
        return Ok(());
    }
    if context.ledger_manager.delete_item(kind, id)? {
        io::print_success(format!("Deleted #{} from {}.", id, kind));
    } else {
        io::print_info(format!("No entry #{} in {}.", id, kind));
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (wipe_card, rest) = take_flag(args, "--wipe-card");
    if !rest.is_empty() {
        return Err(usage("reset [--wipe-card]"));
    }
    if !context.confirm("Erase every transaction and debt? This cannot be undone.")? {
        io::print_info("Cancelled.");
        return Ok(());
    }
    context.ledger_manager.reset_all(!wipe_card)?;
    if wipe_card {
        io::print_success("Ledger cleared and card restored to defaults.");
    } else {
        io::print_success("Ledger cleared. Card profile kept.");
    }
    Ok(())
}

fn cmd_card(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (reveal, rest) = take_flag(args, "--reveal");
    match rest.as_slice() {
        [] | ["show"] => {
            show_card(context, reveal);
            Ok(())
        }
        ["set", holder, number, expiry, cvv] => {
            let card = context
                .ledger_manager
                .set_card(holder, number, expiry, cvv)?;
            io::print_success(format!(
                "Card updated for {} ({}).",
                card.holder,
                card.masked_number()
            ));
            Ok(())
        }
        _ => Err(usage(CARD_USAGE)),
    }
}

fn show_card(context: &ShellContext, reveal: bool) {
    let card = &context.ledger_manager.ledger().card;
    output_section("Card");
    io::print_info(format!("  Holder : {}", card.holder));
    if reveal {
        io::print_info(format!("  Number : {}", card.number));
        io::print_info(format!("  Expiry : {}", card.expiry));
        io::print_info(format!("  CVV    : {}", card.cvv));
    } else {
        io::print_info(format!("  Number : {}", card.masked_number()));
        io::print_info(format!("  Expiry : {}", card.expiry));
        io::print_hint("Use `card show --reveal` to print the full number.");
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::core::test_support::{run, script_context};
    use crate::domain::{Card, TransactionKind};

    #[test]
    fn edit_merges_fields_and_keeps_identity() {
        let (mut context, _temp) = script_context();
        run(&mut context, &["add expense 40 Lunch Food"]);
        let original = context.ledger_manager.ledger().transactions[0].clone();

        let line = format!("edit {} amount=55.5 type=income category=Refund", original.id);
        run(&mut context, &[line.as_str()]);

        let updated = &context.ledger_manager.ledger().transactions[0];
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.timestamp, original.timestamp);
        assert_eq!(updated.amount, 55.5);
        assert_eq!(updated.kind, TransactionKind::Income);
        assert_eq!(updated.category, "Refund");
        assert_eq!(updated.desc, "Lunch");
    }

    #[test]
    fn invalid_amount_leaves_ledger_untouched() {
        let (mut context, _temp) = script_context();
        run(&mut context, &["add expense abc Lunch", "debt lent 0 Sam"]);
        assert!(context.ledger_manager.ledger().is_empty());
    }

    #[test]
    fn delete_and_reset_are_auto_confirmed_in_scripts() {
        let (mut context, _temp) = script_context();
        run(&mut context, &["debt borrowed 20 Alex", "add income 5 Tip"]);
        let debt_id = context.ledger_manager.ledger().debts[0].id;
        run(&mut context, &[format!("delete debt {}", debt_id).as_str()]);
        assert!(context.ledger_manager.ledger().debts.is_empty());

        run(&mut context, &["card set \"Jo Doe\" 4111111111111111 1230 123", "reset"]);
        let ledger = context.ledger_manager.ledger();
        assert!(ledger.transactions.is_empty());
        assert_eq!(ledger.card.holder, "Jo Doe");

        run(&mut context, &["reset --wipe-card"]);
        assert_eq!(context.ledger_manager.ledger().card, Card::default());
    }

    #[test]
    fn card_set_normalises_input() {
        let (mut context, _temp) = script_context();
        run(&mut context, &["card set Sam 4111-1111-1111-1111-99 1230 12345"]);
        let card = &context.ledger_manager.ledger().card;
        assert_eq!(card.number, "4111 1111 1111 1111");
        assert_eq!(card.expiry, "12/30");
        assert_eq!(card.cvv, "123");
    }
}
