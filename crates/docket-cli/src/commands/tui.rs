use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use docket_config::validate_submit_delay;
use docket_store::paths;
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

const TUI_BINARY: &str = "docket-tui";

#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Override the configured simulated latency
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Flags forwarded to the `docket-tui` binary.
#[derive(Debug, PartialEq, Eq)]
struct Forwarded {
    db_path: PathBuf,
    config: Option<PathBuf>,
    delay_ms: Option<u64>,
}

impl Forwarded {
    fn into_args(self) -> Vec<OsString> {
        let mut args = vec![OsString::from("--db-path"), self.db_path.into_os_string()];
        if let Some(config) = self.config {
            args.push("--config".into());
            args.push(config.into_os_string());
        }
        if let Some(delay_ms) = self.delay_ms {
            args.push("--delay-ms".into());
            args.push(delay_ms.to_string().into());
        }
        args
    }
}

pub fn launch(
    db_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    args: TuiArgs,
) -> Result<()> {
    let forwarded = Forwarded {
        db_path: paths::resolve_db_path(db_path).with_context(|| "resolve database path")?,
        config: config_path,
        delay_ms: args.delay_ms.map(validate_submit_delay).transpose()?,
    };
    let binary = tui_binary();
    debug!(binary = %binary.display(), db = %forwarded.db_path.display(), "launching tui");

    let mut command = Command::new(&binary);
    command.args(forwarded.into_args());
    replace_process(command)
}

/// Prefers a `docket-tui` next to the running executable, then `$PATH`.
fn tui_binary() -> PathBuf {
    let name = format!("{TUI_BINARY}{}", env::consts::EXE_SUFFIX);
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&name)))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(name))
}

#[cfg(unix)]
fn replace_process(mut command: Command) -> Result<()> {
    use std::os::unix::process::CommandExt;
    Err(launch_error(command.exec()))
}

#[cfg(not(unix))]
fn replace_process(mut command: Command) -> Result<()> {
    let status = command.status().map_err(launch_error)?;
    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("{TUI_BINARY} exited with {status}"))
    }
}

fn launch_error(err: io::Error) -> anyhow::Error {
    if err.kind() == io::ErrorKind::NotFound {
        anyhow!("{TUI_BINARY} binary not found; install it alongside docket")
    } else {
        anyhow!("launch {TUI_BINARY} failed: {err}")
    }
}
