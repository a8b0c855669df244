pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod runtime;
pub mod singleton;
pub mod sync;
#[cfg(test)]
mod test_support;

use std::io::Write;

use clap::Parser;

use crate::bootstrap::AppPaths;
use crate::cli::{Cli, Command};
use crate::config::{load_config, AppConfig};
use crate::error::AppResult;
use crate::runtime::{run_workers, Interrupt};
use crate::singleton::SingletonProvider;

trait CommandExecutor {
    fn run(&self, config: &AppConfig, json: bool) -> AppResult<()>;
    fn show_config(&self, config: &AppConfig) -> AppResult<()>;
}

struct DefaultCommandExecutor;

impl CommandExecutor for DefaultCommandExecutor {
    fn run(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        let interrupt = Interrupt::new();
        interrupt.install_ctrlc()?;

        let provider = SingletonProvider::global(&config.singleton);
        let summary = run_workers(provider, config, &interrupt)?;
        if summary.interrupted {
            tracing::warn!(
                unfinished = summary.unfinished.len(),
                "run interrupted; exiting without waiting for remaining workers"
            );
        }

        if json {
            let rendered = serde_json::to_string_pretty(&summary)?;
            writeln!(std::io::stdout().lock(), "{rendered}")?;
        }
        Ok(())
    }

    fn show_config(&self, config: &AppConfig) -> AppResult<()> {
        let rendered = toml::to_string_pretty(config)?;
        write!(std::io::stdout().lock(), "{rendered}")?;
        Ok(())
    }
}

fn execute_command<E: CommandExecutor>(
    command: Command,
    config: &AppConfig,
    executor: &E,
) -> AppResult<()> {
    match command {
        Command::Run { json } => executor.run(config, json),
        Command::Config => executor.show_config(config),
    }
}

pub fn run() -> AppResult<()> {
    let log_handle = logging::init();

    let cli = Cli::parse();

    let paths = AppPaths::resolve()?;
    let config = load_config(&paths, &cli.to_overrides())?;
    log_handle.apply_level(&config.diagnostics.log_level)?;

    execute_command(cli.command, &config, &DefaultCommandExecutor)
}
