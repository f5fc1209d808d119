use env_logger::{Builder, Env, Target, WriteStyle};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the log filter directives.  Nothing is logged
/// unless it is set.
pub(crate) const LOG_ENV_VAR: &str = "PADDLESNAKE_LOG";

/// Return the default path of the log file
pub(crate) fn default_log_file() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("paddlesnake").join("paddlesnake.log"))
}

/// Set up logging to a file.  The terminal belongs to the game, so log
/// records are appended to `log_file` (or the default log file) instead of
/// being written to stderr.
///
/// Does nothing if [`LOG_ENV_VAR`] is not set.
pub(crate) fn init(log_file: Option<&Path>) -> Result<(), LogError> {
    let Some(filter) = std::env::var_os(LOG_ENV_VAR) else {
        return Ok(());
    };
    if filter.is_empty() {
        return Ok(());
    }
    let path = match log_file {
        Some(p) => p.to_path_buf(),
        None => default_log_file().ok_or(LogError::NoPath)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(LogError::Open)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(LogError::Open)?;
    Builder::from_env(Env::new().filter(LOG_ENV_VAR))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to determine path to local data directory for log file")]
    NoPath,
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}
