//! Standards registry browser CLI.

use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::{ColorChoice, Parser};
use registry_cli::logging::{LogConfig, LogFormat, init_logging};
use registry_loader::{StandardsRegistry, registry_root};
use tracing::info_span;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_list, run_overview, run_search, run_show, run_table};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let root = registry_root(cli.registry.as_deref());
    let registry = StandardsRegistry::open(&root)
        .with_context(|| format!("open registry at {}", root.display()))?;
    match &cli.command {
        Command::Overview => info_span!("overview").in_scope(|| run_overview(&registry)),
        Command::List => info_span!("list").in_scope(|| run_list(&registry)),
        Command::Show(args) => {
            info_span!("show", id = %args.id).in_scope(|| run_show(&registry, args))
        }
        Command::Table(args) => {
            info_span!("table", id = %args.id).in_scope(|| run_table(&registry, args))
        }
        Command::Search(args) => info_span!("search", id = %args.id, query = %args.query)
            .in_scope(|| run_search(&registry, args)),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level(cli.verbosity.tracing_level_filter())
        .with_timestamps(cli.log_timestamps)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
