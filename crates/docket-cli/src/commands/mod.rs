use anyhow::Result;
use docket_config::AppConfig;
use docket_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod assist;
pub mod completions;
pub mod drafts;
pub mod form;
pub mod notices;
pub mod tui;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
