#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pid_labeler::services::config::*;
    use pid_labeler::utils::error::AppError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_config_files_writes_defaults() -> Result<()> {
        let dir = tempdir()?;

        check_config_files(dir.path())?;
        let config = read_config(dir.path())?;

        assert_eq!(config, UserConfig::with_defaults(dir.path()));
        assert_eq!(config.database, dir.path().join(DEFAULT_DB_NAME));
        assert!(config.auto_metadata);
        assert_eq!(config.model.model, "gpt-3.5-turbo-instruct");
        assert_eq!(config.model.max_tokens, 100);
        Ok(())
    }

    #[test]
    fn test_check_config_files_keeps_existing() -> Result<()> {
        let dir = tempdir()?;
        let mut custom = UserConfig::with_defaults(dir.path());
        custom.auto_metadata = false;
        custom.model.max_tokens = 256;
        store_config(dir.path(), &custom)?;

        check_config_files(dir.path())?;

        assert_eq!(read_config(dir.path())?, custom);
        Ok(())
    }

    #[test]
    fn test_read_config_parses_hand_written_file() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
database = "/srv/pid/labels.db"
auto_metadata = false

[model]
model = "local-model"
max_tokens = 64
endpoint = "http://localhost:8080/v1"
"#,
        )?;

        let config = read_config(dir.path())?;
        assert_eq!(config.database.to_str(), Some("/srv/pid/labels.db"));
        assert!(!config.auto_metadata);
        assert_eq!(config.model.endpoint, "http://localhost:8080/v1");
        Ok(())
    }

    #[test]
    fn test_read_config_errors() -> Result<()> {
        let dir = tempdir()?;

        let missing = read_config(dir.path()).unwrap_err();
        assert!(matches!(
            missing.downcast_ref::<AppError>(),
            Some(AppError::FileError(_))
        ));

        fs::write(dir.path().join(CONFIG_FILE_NAME), "auto_metadata = \"maybe\"")?;
        let invalid = read_config(dir.path()).unwrap_err();
        assert!(matches!(
            invalid.downcast_ref::<AppError>(),
            Some(AppError::FileError(_))
        ));
        Ok(())
    }
}
