use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use env_logger::{Builder, Env, Target};

use crate::utils::error::AppError;

pub const LOG_FILE_NAME: &str = "pid-labeler.log";

/// Initializes the `log` facade with an `env_logger` backend that appends to
/// `<log_dir>/pid-labeler.log`. The terminal belongs to the TUI, so nothing is
/// written to stderr. `RUST_LOG` overrides the default `info` level.
///
/// Should be called once before logging any messages.
pub fn initialize_logger(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir).map_err(|e| {
        AppError::FileError(format!(
            "Failed to create log directory {}: {}",
            log_dir.to_string_lossy(),
            e
        ))
    })?;

    let log_path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| {
            AppError::FileError(format!(
                "Failed to open log file {}: {}",
                log_path.to_string_lossy(),
                e
            ))
        })?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| AppError::UnexpectedError(format!("Logger already initialized: {}", e)))?;

    Ok(log_path)
}

/// Logs an info message.
pub fn log_info(message: &str) {
    log::info!("{}", message);
}

/// Logs a warning.
pub fn log_warn(message: &str) {
    log::warn!("{}", message);
}

/// Logs an error message.
pub fn log_error(message: &str) {
    log::error!("{}", message);
}
