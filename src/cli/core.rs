//! Core CLI dispatch, error reporting, and shell context helpers.

use std::{io, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use tracing::debug;

use crate::{
    config::{Config, ConfigManager},
    core::{LedgerManager, SystemClock},
    currency::{format_currency_value, format_signed},
    errors::LedgerError,
    storage::JsonStorage,
};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Builds a context over the on-disk config and ledger in the app data dir.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(config_manager.ledger_path(&config));
        let ledger_manager = LedgerManager::open(Box::new(storage), Arc::new(SystemClock));
        Ok(Self::with_parts(mode, ledger_manager, config_manager, config))
    }

    pub fn with_parts(
        mode: CliMode,
        ledger_manager: LedgerManager,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let context = ShellContext {
            mode,
            registry,
            ledger_manager,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        };
        context.report_load();
        context
    }

    fn report_load(&self) {
        let meta = self.ledger_manager.load_metadata();
        if let Some(reason) = &meta.fallback_reason {
            cli_io::print_warning(format!(
                "Stored ledger at {} could not be read ({}). Starting with an empty ledger.",
                meta.location, reason
            ));
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let ledger = self.ledger_manager.ledger();
        format!(
            "aether [{} tx / {} debts]> ",
            ledger.transactions.len(),
            ledger.debts.len()
        )
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    /// Formats an amount in the configured currency.
    pub(crate) fn money(&self, amount: f64) -> String {
        format_currency_value(amount, &self.config.currency, &self.config.locale)
    }

    pub(crate) fn signed_money(&self, amount: f64) -> String {
        format_signed(amount, &self.config.currency, &self.config.locale)
    }

    /// Asks before destructive actions. Scripts are auto-approved.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());
        self.dispatch(&command, raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        Ok(self.confirm("Exit shell?")?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(err) if err.is_not_found() => {
                debug!(error = %err, "edit target missing, ignored");
            }
            CommandError::Core(LedgerError::Validation(message)) => {
                cli_io::print_error(message);
            }
            other => cli_io::print_error(other),
        }
        Ok(())
    }
}

/// Parses an entry id argument.
pub(crate) fn parse_id(raw: &str) -> Result<i64, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a valid id", raw)))
}

/// Splits off `--flag` style switches, returning whether `flag` was present and
/// the remaining positional arguments.
pub(crate) fn take_flag<'a>(args: &[&'a str], flag: &str) -> (bool, Vec<&'a str>) {
    let mut found = false;
    let rest = args
        .iter()
        .copied()
        .filter(|arg| {
            if arg.eq_ignore_ascii_case(flag) {
                found = true;
                false
            } else {
                true
            }
        })
        .collect();
    (found, rest)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Top-level shell failure.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::FixedClock;
    use crate::storage::MemoryStorage;
    use tempfile::TempDir;

    pub(crate) const NOW: i64 = 1_767_225_600_000;

    /// Script-mode context over in-memory storage. The TempDir must outlive the context.
    pub(crate) fn script_context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().unwrap();
        let config_manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let manager = LedgerManager::open(
            Box::new(MemoryStorage::new()),
            Arc::new(FixedClock::at_millis(NOW)),
        );
        let context =
            ShellContext::with_parts(CliMode::Script, manager, config_manager, Config::default());
        (context, temp)
    }

    pub(crate) fn run(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            match context.process_line(line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err).unwrap(),
            }
        }
    }
}
