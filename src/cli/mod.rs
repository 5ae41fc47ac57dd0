//! Command-line interface for tabshift.
//!
//! This module handles CLI argument parsing and dispatch. The subcommand
//! implementations live in the [`commands`] submodule.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tabshift_config::{Config, ConfigStore, Direction, RawSettings, Scope};

/// tabshift - Slide the active tab next to the nearest pinned tab
#[derive(Parser)]
#[command(name = "tabshift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Direction argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DirectionArg {
    Left,
    Right,
    Auto,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Left => Direction::Left,
            DirectionArg::Right => Direction::Right,
            DirectionArg::Auto => Direction::Auto,
        }
    }
}

/// Inputs shared by every engine subcommand
#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// Session JSON describing the focused tab group
    #[arg(long, value_name = "FILE")]
    pub session: PathBuf,

    /// Configuration file (default: the user config, if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the configured direction
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Override the configured padding
    #[arg(long, value_name = "N")]
    pub padding: Option<i64>,

    /// Override the configured block-move filters (repeatable)
    #[arg(long = "filter", value_name = "TOKEN")]
    pub filters: Vec<String>,

    /// Force per-decision diagnostics on
    #[arg(long)]
    pub debug: bool,
}

impl EngineArgs {
    /// Settings given on the command line, layered over any config file
    pub fn overrides(&self) -> RawSettings {
        RawSettings {
            direction: self.direction.map(Into::into),
            padding: self.padding,
            block_move_filters: (!self.filters.is_empty()).then(|| self.filters.clone()),
            debug: self.debug.then_some(true),
            ..RawSettings::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute where the active tab goes and print the new order
    Position {
        #[command(flatten)]
        engine: EngineArgs,

        /// Write the repositioned session back to the session file
        #[arg(long)]
        write: bool,
    },

    /// List every tab with the filter that blocks it
    Explain {
        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Recompute the position whenever the config file changes
    Watch {
        #[command(flatten)]
        engine: EngineArgs,

        /// Exit after the specified number of seconds
        #[arg(long, value_name = "SECONDS")]
        exit_after: Option<f64>,
    },

    /// List filter keywords, pattern prefixes and path variables
    Filters,
}

/// Configuration file plus command-line overrides
#[derive(Debug, Clone)]
pub struct CliStore {
    pub config: Config,
    pub overrides: RawSettings,
}

impl ConfigStore for CliStore {
    fn settings(&self, scope: &Scope) -> RawSettings {
        self.config.settings(scope).overlay(&self.overrides)
    }
}

/// Parse command-line arguments
pub fn parse() -> Cli {
    Cli::parse()
}

/// Run the selected subcommand and return the process exit code
pub fn run(cli: Cli) -> i32 {
    let result = match cli.command {
        Commands::Position { engine, write } => commands::position_cli(&engine, write),
        Commands::Explain { engine } => commands::explain_cli(&engine),
        Commands::Watch { engine, exit_after } => commands::watch_cli(&engine, exit_after),
        Commands::Filters => {
            commands::filters_cli();
            Ok(())
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("tabshift: error: {e:#}");
            1
        }
    }
}
