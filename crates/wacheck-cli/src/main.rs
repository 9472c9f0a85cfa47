mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{export, import, local, serve, Context};
use crate::error::{exit_code_for, report_error};
use wacheck_config as config;
use wacheck_store::{paths, ContactStore};

#[derive(Debug, Parser)]
#[command(name = "wacheck", version, about = "WhatsApp availability bot")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the Telegram bot (long polling)
    Serve,
    /// Look up a phone number
    Check(local::LocalArgs),
    /// Record a phone number: <phone> <status> [note...]
    Set(local::LocalArgs),
    /// Count stored numbers and those with WhatsApp
    Stats,
    /// Bulk-import `phone,status[,note]` lines
    Import(import::ImportArgs),
    /// Print all contacts as JSON
    Export,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose, matches!(cli.command, Command::Serve));
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        verbose: _,
        command,
    } = cli;

    let app_config = config::load(config_path).with_context(|| "load config")?;
    if matches!(command, Command::Serve) {
        app_config.require_token()?;
    }
    let db_path = paths::resolve_db_path(db_path.or_else(|| app_config.db_path.clone()))
        .with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store = ContactStore::open(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;

    let ctx = Context {
        store: &store,
        config: &app_config,
    };

    match command {
        Command::Serve => serve::serve(&ctx),
        Command::Check(args) => local::run(&ctx, "check", args),
        Command::Set(args) => local::run(&ctx, "set", args),
        Command::Stats => local::run(&ctx, "stats", local::LocalArgs { args: Vec::new() }),
        Command::Import(args) => import::import(&ctx, args),
        Command::Export => export::export(&ctx),
    }
}

fn init_logging(verbose: bool, serving: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = match (verbose, serving) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
