mod actions;
mod app;
mod ui;
mod util;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent};
use ratatui::DefaultTerminal;

use crate::actions::Session;
use crate::app::{App, Settings};
use docket_config::validate_submit_delay;
use docket_store::{paths, Store};
use docket_submit::{build_runtime, Dispatcher, SimulatedSubmitter};

#[derive(Debug, Parser)]
#[command(name = "docket-tui", version, about = "docket contact form")]
struct Args {
    #[arg(long)]
    db_path: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured simulated latency
    #[arg(long)]
    delay_ms: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = docket_config::load(args.config).with_context(|| "load config")?;
    let delay_ms = match args.delay_ms {
        Some(value) => validate_submit_delay(value)?,
        None => config.submission.delay_ms,
    };

    let db_path = paths::resolve_db_path(args.db_path).with_context(|| "resolve database path")?;
    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let runtime = build_runtime()?;
    let dispatcher = Dispatcher::new(SimulatedSubmitter::new(Duration::from_millis(delay_ms)));
    let mut session = Session::new(&store, &runtime, dispatcher);

    let mut app = App::new(Settings {
        autosave: config.drafts.autosave,
        disclaimer: config.notices.disclaimer,
        cookies: config.notices.cookies,
    });

    let mut terminal = TerminalSession::start()?;
    run_app(&mut terminal.terminal, &mut session, &mut app)
}

const TICK: Duration = Duration::from_millis(200);

/// Redraws at least once per tick so a pending submission is picked up
/// without a keypress.
fn run_app(terminal: &mut DefaultTerminal, session: &mut Session<'_>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        while let Some(action) = app.next_action() {
            if let Err(err) = session.execute(app, action) {
                app.set_error(err.to_string());
            }
        }
        session.poll_submission(app);

        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(key) = next_key(TICK)? {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn next_key(timeout: Duration) -> Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Raw mode and the alternate screen for as long as this lives; ratatui
/// also restores the terminal from its panic hook.
struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    fn start() -> Result<Self> {
        let terminal = ratatui::try_init().with_context(|| "initialize terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
