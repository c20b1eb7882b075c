use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "docket";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;
pub const MAX_SUBMIT_DELAY_MS: u64 = 60_000;

/// Every section and key is optional; absent ones keep the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub submission: SubmissionConfig,
    pub drafts: DraftsConfig,
    pub notices: NoticesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmissionConfig {
    /// Simulated network latency before the submission resolves.
    pub delay_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_SUBMIT_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DraftsConfig {
    pub autosave: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoticesConfig {
    pub disclaimer: bool,
    pub cookies: bool,
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self {
            disclaimer: true,
            cookies: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot locate a home directory for the default config path")]
    NoHomeDir,
    #[error("invalid config path: {0}")]
    InvalidPath(PathBuf),
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("config file {0} is readable by group or others; chmod 600 it")]
    TooOpen(PathBuf),
    #[error("submission.delay_ms must be at most 60000, got {0}")]
    InvalidSubmitDelay(u64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// An explicit `custom` path must exist. Without one, a missing default
/// file (or no way to locate it) yields the defaults.
pub fn load(custom: Option<PathBuf>) -> Result<AppConfig> {
    let explicit = custom.is_some();
    let path = match resolve_config_path(custom) {
        Ok(path) => path,
        Err(_) if !explicit => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };

    if path.exists() {
        read_file(&path)
    } else if explicit {
        Err(ConfigError::NotFound(path))
    } else {
        Ok(AppConfig::default())
    }
}

/// `custom`, else `$XDG_CONFIG_HOME/docket/config.toml`, else
/// `~/.config/docket/config.toml`.
pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = custom {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath(path));
        }
        return Ok(path);
    }

    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if dir.is_empty() => return Err(ConfigError::InvalidPath(PathBuf::from(dir))),
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or(ConfigError::NoHomeDir)?
            .join(".config"),
    };
    Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
}

pub fn read_file(path: &Path) -> Result<AppConfig> {
    ensure_private(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validated()
}

impl AppConfig {
    fn validated(self) -> Result<Self> {
        validate_submit_delay(self.submission.delay_ms)?;
        Ok(self)
    }
}

/// Shared by the config file and the `--delay-ms` flags.
pub fn validate_submit_delay(delay_ms: u64) -> Result<u64> {
    if delay_ms > MAX_SUBMIT_DELAY_MS {
        return Err(ConfigError::InvalidSubmitDelay(delay_ms));
    }
    Ok(delay_ms)
}

#[cfg(unix)]
fn ensure_private(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .permissions()
        .mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::TooOpen(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_private(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load, read_file, AppConfig, ConfigError, DEFAULT_SUBMIT_DELAY_MS};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_private(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write config");
        chmod(&path, 0o600);
        path
    }

    fn chmod(path: &Path, mode: u32) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("chmod");
        }
        #[cfg(not(unix))]
        let _ = (path, mode);
    }

    #[test]
    fn defaults_match_page_behaviour() {
        let config = AppConfig::default();
        assert_eq!(config.submission.delay_ms, DEFAULT_SUBMIT_DELAY_MS);
        assert!(!config.drafts.autosave);
        assert!(config.notices.disclaimer);
        assert!(config.notices.cookies);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_private(
            &temp,
            "[submission]\ndelay_ms = 0\n[drafts]\nautosave = true\n[notices]\ncookies = false\n",
        );

        let config = read_file(&path).expect("load");
        assert_eq!(config.submission.delay_ms, 0);
        assert!(config.drafts.autosave);
        assert!(config.notices.disclaimer);
        assert!(!config.notices.cookies);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_private(&temp, "");
        assert_eq!(read_file(&path).expect("load"), AppConfig::default());
    }

    #[test]
    fn long_delay_is_rejected() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_private(&temp, "[submission]\ndelay_ms = 120000\n");
        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSubmitDelay(120_000)));
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load(Some(missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_private(&temp, "[drafts]\nexpiry_days = 3\n");
        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn world_readable_file_is_rejected() {
        let temp = TempDir::new().expect("tempdir");
        let path = write_private(&temp, "");
        chmod(&path, 0o644);

        let err = read_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooOpen(_)));
    }
}
