mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{assist, completions, drafts, form, notices, tui, Context};
use crate::error::{exit_code_for, report_error};
use docket_config as config;
use docket_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "docket", version, about = "docket contact-intake CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check form values without submitting
    Validate(form::FormArgs),
    /// Validate and submit the form
    Submit(form::SubmitArgs),
    #[command(subcommand)]
    Draft(drafts::DraftCommand),
    #[command(name = "format-phone")]
    FormatPhone(assist::FormatPhoneArgs),
    /// Characters still needed in the message field
    Counter(assist::CounterArgs),
    #[command(subcommand)]
    Notice(notices::NoticeCommand),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    Tui(tui::TuiArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

/// Commands that read or write local storage.
enum StoreCommand {
    Validate(form::FormArgs),
    Submit(form::SubmitArgs),
    Draft(drafts::DraftCommand),
    Notice(notices::NoticeCommand),
}

impl StoreCommand {
    fn run(self, ctx: &Context<'_>) -> Result<()> {
        match self {
            StoreCommand::Validate(args) => form::validate(ctx, args),
            StoreCommand::Submit(args) => form::submit(ctx, args),
            StoreCommand::Draft(drafts::DraftCommand::Set(args)) => drafts::set_draft(ctx, args),
            StoreCommand::Draft(drafts::DraftCommand::Show(args)) => drafts::show_drafts(ctx, args),
            StoreCommand::Draft(drafts::DraftCommand::Clear(args)) => {
                drafts::clear_drafts(ctx, args)
            }
            StoreCommand::Notice(notices::NoticeCommand::Status(args)) => notices::status(ctx, args),
            StoreCommand::Notice(notices::NoticeCommand::Accept(args)) => notices::accept(ctx, args),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose: _,
        command,
    } = cli;

    let command = match command {
        Command::Tui(args) => return tui::launch(db_path, config_path, args),
        Command::Completions(args) => return completions::emit(args),
        Command::FormatPhone(args) => return assist::format_phone(json, args),
        Command::Counter(args) => return assist::counter(json, args),
        Command::Validate(args) => StoreCommand::Validate(args),
        Command::Submit(args) => StoreCommand::Submit(args),
        Command::Draft(cmd) => StoreCommand::Draft(cmd),
        Command::Notice(cmd) => StoreCommand::Notice(cmd),
    };

    let app_config = load_config(config_path)?;
    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");
    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    command.run(&Context {
        store: &store,
        json,
        config: &app_config,
    })
}

fn load_config(config_path: Option<PathBuf>) -> Result<config::AppConfig> {
    match config::resolve_config_path(config_path.clone()) {
        Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
        Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
        Err(err) => debug!(error = %err, "config unavailable"),
    }
    config::load(config_path).with_context(|| "load config")
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
