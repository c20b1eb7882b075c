use crate::error::{Result, StoreError};
use crate::fsperm;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "docket";
const DB_FILENAME: &str = "docket.sqlite3";

/// `$XDG_DATA_HOME/docket`, else `~/.local/share/docket`. An empty
/// `XDG_DATA_HOME` counts as unset.
pub fn data_dir() -> Result<PathBuf> {
    let base = match env::var_os("XDG_DATA_HOME").filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or(StoreError::NoHomeDir)?
            .join(".local")
            .join("share"),
    };
    Ok(base.join(APP_DIR))
}

/// The database file to open: `custom` when given, the default data
/// directory otherwise. Missing parent directories are created owner-only.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    let path = match custom {
        Some(path) if path.as_os_str().is_empty() => return Err(StoreError::InvalidPath(path)),
        Some(path) => path,
        None => data_dir()?.join(DB_FILENAME),
    };
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        prepare_dir(parent)?;
    }
    Ok(path)
}

fn prepare_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        fsperm::set_mode(dir, fsperm::OWNER_DIR)?;
    }
    Ok(())
}
