//! Resolves runtime settings from parsed options.
//!
//! # Invariants
//! - An explicit `--db` / `HYPERNOTES_DB_PATH` always wins over the default.
//! - Logging starts only when a log directory is configured.

use crate::args::GlobalOpts;
use crate::error::CliError;
use hypernotes_core::{default_log_level, init_logging};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "hypernotes";
const DB_FILE_NAME: &str = "hypernotes.sqlite3";

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub db_path: PathBuf,
    pub log: Option<(String, PathBuf)>,
    pub json: bool,
}

impl RuntimeConfig {
    pub fn resolve(opts: &GlobalOpts) -> Result<Self, CliError> {
        Self::resolve_with(opts, dirs::data_dir())
    }

    fn resolve_with(opts: &GlobalOpts, data_dir: Option<PathBuf>) -> Result<Self, CliError> {
        let db_path = match non_empty(opts.db.as_deref()) {
            Some(path) => path.to_path_buf(),
            None => data_dir
                .ok_or(CliError::NoDataDir)?
                .join(APP_DIR_NAME)
                .join(DB_FILE_NAME),
        };

        let log = non_empty(opts.log_dir.as_deref()).map(|dir| {
            let level = opts
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string());
            (level, dir.to_path_buf())
        });

        Ok(Self {
            db_path,
            log,
            json: opts.json,
        })
    }

    /// Creates the database parent directory and starts logging if configured.
    pub fn prepare(&self) -> Result<(), CliError> {
        if let Some((level, dir)) = &self.log {
            init_logging(level, &dir.to_string_lossy())?;
        }
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|path| !path.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::RuntimeConfig;
    use crate::args::GlobalOpts;
    use crate::error::CliError;
    use std::path::PathBuf;

    fn opts() -> GlobalOpts {
        GlobalOpts {
            db: None,
            log_level: None,
            log_dir: None,
            json: false,
        }
    }

    #[test]
    fn default_db_lives_under_data_dir() {
        let config = RuntimeConfig::resolve_with(&opts(), Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(
            config.db_path,
            PathBuf::from("/data/hypernotes/hypernotes.sqlite3")
        );
        assert_eq!(config.log, None);
    }

    #[test]
    fn explicit_db_overrides_default() {
        let mut opts = opts();
        opts.db = Some(PathBuf::from("/tmp/notes.sqlite3"));
        let config = RuntimeConfig::resolve_with(&opts, None).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/notes.sqlite3"));
    }

    #[test]
    fn missing_data_dir_without_db_is_an_error() {
        let err = RuntimeConfig::resolve_with(&opts(), None).unwrap_err();
        assert!(matches!(err, CliError::NoDataDir));
    }

    #[test]
    fn log_dir_enables_logging_with_default_level() {
        let mut opts = opts();
        opts.log_dir = Some(PathBuf::from("/var/log/hypernotes"));
        let config = RuntimeConfig::resolve_with(&opts, Some(PathBuf::from("/data"))).unwrap();
        let (level, dir) = config.log.unwrap();
        assert_eq!(level, hypernotes_core::default_log_level());
        assert_eq!(dir, PathBuf::from("/var/log/hypernotes"));
    }
}
