//! Lectern CLI - Ask questions answered only from one uploaded document.

use anyhow::Context;
use clap::Parser;
use lectern_cli::cli::{ConfigAction, ConfigArgs};
use lectern_cli::commands;
use lectern_cli::repl;
use lectern_cli::{Cli, Command, Config, Formatter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // `config init` may target a file that does not exist yet
    let mut config = match &cli.command {
        Some(Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        })) => Config::default(),
        _ => Config::load(cli.config.as_deref()).context("Failed to load configuration")?,
    };
    config.apply_overrides(cli.model.clone(), cli.endpoint.clone())?;

    let formatter = Formatter::new(!cli.no_color && config.cli.color);

    match cli.command {
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, cli.config.as_deref(), &formatter)?;
        }
        Some(Command::Extract(args)) => {
            commands::execute_extract(args, &config.pipeline, cli.skip_preflight, &formatter)?;
        }
        Some(Command::Ask(args)) => {
            let mut session = commands::start_session(&config, cli.skip_preflight, &formatter)?;
            commands::execute_ask(args, &mut session, &formatter)?;
        }
        Some(Command::Repl(args)) => {
            run_interactive(&config, cli.skip_preflight, &formatter, args.file)?;
        }
        None => {
            run_interactive(&config, cli.skip_preflight, &formatter, None)?;
        }
    }

    Ok(())
}

fn run_interactive(
    config: &Config,
    skip_preflight: bool,
    formatter: &Formatter,
    file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut session = commands::start_session(config, skip_preflight, formatter)?;
    if let Some(path) = file {
        println!("{}", formatter.upload(&session.upload(&path)));
    }
    repl::run_repl(&mut session, formatter, config.cli.history_size)?;
    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
