use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CliOverrides;

#[derive(Debug, Parser)]
#[command(name = "lazy-singleton")]
#[command(about = "Race worker threads against a double-checked lazy singleton")]
pub struct Cli {
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub workers: Option<usize>,

    #[arg(long)]
    pub message_prefix: Option<String>,

    #[arg(long)]
    pub construction_delay_ms: Option<u64>,

    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Spawn the workers and wait for all of them.
    Run {
        /// Print the run summary as JSON after the console output.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

impl Cli {
    pub fn to_overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.config.clone(),
            workers: self.workers,
            message_prefix: self.message_prefix.clone(),
            construction_delay_ms: self.construction_delay_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}
