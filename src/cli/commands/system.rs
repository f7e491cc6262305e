use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::CURRENT_SCHEMA_VERSION;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show or change preferences",
            "config [currency|recent_limit|default_window|ledger_file <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let config = &context.config;
            output_section("Configuration");
            io::print_info(format!("  currency       : {}", config.currency));
            io::print_info(format!("  recent_limit   : {}", config.recent_limit));
            io::print_info(format!("  default_window : {}", config.default_window));
            io::print_info(format!(
                "  ledger_file    : {}",
                context.config_manager.ledger_path(config).display()
            ));
            io::print_info(format!(
                "  config path    : {}",
                context.config_manager.path().display()
            ));
            Ok(())
        }
        [key, value] => {
            context.config.set_value(key, value)?;
            context.persist_config()?;
            io::print_success(format!("Updated `{}`.", key));
            if key.eq_ignore_ascii_case("ledger_file") {
                io::print_hint("The new ledger file is used from the next start.");
            }
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [<key> <value>]".into(),
        )),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Aether Ledger {}", meta.version));
    io::print_info(format!("  {:<12} : v{}", "Schema", CURRENT_SCHEMA_VERSION));
    for (label, value) in meta.rows().into_iter().skip(1) {
        io::print_info(format!("  {:<12} : {}", label, value));
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use crate::cli::core::test_support::{run, script_context};
    use crate::domain::TimeWindow;

    #[test]
    fn config_changes_are_persisted() {
        let (mut context, _temp) = script_context();
        run(
            &mut context,
            &["config currency usd", "config default_window 30days"],
        );
        assert_eq!(context.config.currency, "USD");
        let reloaded = context.config_manager.load().unwrap();
        assert_eq!(reloaded.default_window, TimeWindow::Last30Days);
    }

    #[test]
    fn invalid_config_value_keeps_previous_setting() {
        let (mut context, _temp) = script_context();
        run(&mut context, &["config recent_limit lots"]);
        assert_eq!(context.config.recent_limit, 6);
    }
}
