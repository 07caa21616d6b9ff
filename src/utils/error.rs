use std::error::Error;
use std::fmt;

/// Crate-wide error types, written out by hand.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    DatabaseError(String),
    FileError(String),
    ValidationError(String),
    ModelError(String),
    UnexpectedError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database operation failed: {}", msg),
            AppError::FileError(msg) => write!(f, "File operation failed: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ModelError(msg) => write!(f, "Model request failed: {}", msg),
            AppError::UnexpectedError(msg) => write!(f, "Unexpected or unknown error: {}", msg),
        }
    }
}

impl Error for AppError {}

/// Custom Result type that uses `AppError`.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = AppError::ValidationError("Label cannot be empty".to_string());
        assert_eq!(err.to_string(), "Validation error: Label cannot be empty");

        let err = AppError::ModelError("timeout".to_string());
        assert_eq!(err.to_string(), "Model request failed: timeout");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = AppError::DatabaseError("locked".to_string()).into();
        assert_eq!(
            err.downcast_ref::<AppError>(),
            Some(&AppError::DatabaseError("locked".to_string()))
        );
    }
}
