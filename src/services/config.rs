use anyhow::Result;
use dirs_next::config_dir;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::utils::{error::AppError, logger::log_error};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_DB_NAME: &str = "pid_labeling_tool.db";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_MAX_TOKENS: i32 = 100;
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelConfig {
    pub model: String,
    pub max_tokens: i32,
    pub endpoint: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            model: String::from(DEFAULT_MODEL),
            max_tokens: DEFAULT_MAX_TOKENS,
            endpoint: String::from(DEFAULT_ENDPOINT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserConfig {
    pub database: PathBuf,
    pub auto_metadata: bool,
    pub model: ModelConfig,
}

impl UserConfig {
    /// Defaults for a fresh install, with the database next to the config.
    pub fn with_defaults(conf_dir: &Path) -> Self {
        UserConfig {
            database: conf_dir.join(DEFAULT_DB_NAME),
            auto_metadata: true,
            model: ModelConfig::default(),
        }
    }
}

/// Get the configuration directory inside `$HOME/.config/pid-labeler`.
/// Creates the directory if it doesn’t exist.
pub fn get_config_dir() -> Result<PathBuf, AppError> {
    let Some(mut conf_dir) = config_dir() else {
        return Err(AppError::FileError(String::from(
            "Could not find the configuration directory",
        )));
    };

    conf_dir.push("pid-labeler");

    if !conf_dir.exists() {
        fs::create_dir_all(&conf_dir).map_err(|e| {
            AppError::FileError(format!(
                "Failed to create configuration directory {}: {}",
                &conf_dir.to_string_lossy(),
                e
            ))
        })?;
    }

    Ok(conf_dir)
}

/// Reads `config.toml` from `conf_dir` and parses it into `UserConfig`.
pub fn read_config(conf_dir: &Path) -> Result<UserConfig> {
    let config_path = conf_dir.join(CONFIG_FILE_NAME);
    let toml_content = fs::read_to_string(&config_path).map_err(|e| {
        log_error(&format!(
            "Failed to read file {}: {}",
            &config_path.to_string_lossy(),
            e
        ));
        AppError::FileError(format!(
            "Failed to read file {}: {}",
            &config_path.to_string_lossy(),
            e
        ))
    })?;

    let configs: UserConfig = toml::from_str(&toml_content).map_err(|e| {
        log_error(&format!(
            "Failed to parse file {}: {}",
            &config_path.to_string_lossy(),
            e
        ));
        AppError::FileError(format!(
            "Failed to parse file {}: {}",
            &config_path.to_string_lossy(),
            e
        ))
    })?;

    Ok(configs)
}

/// Writes the user config to `config.toml` in `conf_dir`.
pub fn store_config(conf_dir: &Path, user_config: &UserConfig) -> Result<()> {
    let config_path = conf_dir.join(CONFIG_FILE_NAME);

    let toml_content =
        toml::to_string(user_config).map_err(|e| AppError::UnexpectedError(e.to_string()))?;

    let mut file = File::create(&config_path).map_err(|e| {
        log_error(&format!(
            "Failed to create/open file {}: {}",
            &config_path.to_string_lossy(),
            e
        ));
        AppError::FileError(format!(
            "Failed to create/open file {}: {}",
            &config_path.to_string_lossy(),
            e
        ))
    })?;

    file.write_all(toml_content.as_bytes()).map_err(|e| {
        log_error(&format!(
            "Failed to write to file {}: {}",
            &config_path.to_string_lossy(),
            e
        ));
        AppError::FileError(format!(
            "Failed to write to file {}: {}",
            &config_path.to_string_lossy(),
            e
        ))
    })?;

    Ok(())
}

/// Writes the default config if `conf_dir` has none yet.
pub fn check_config_files(conf_dir: &Path) -> Result<()> {
    if !conf_dir.join(CONFIG_FILE_NAME).exists() {
        store_config(conf_dir, &UserConfig::with_defaults(conf_dir))?;
    }
    Ok(())
}
