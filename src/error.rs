//! Error types for kanbo
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (validation failure, unknown id, bad config)
//! - 4: Operation failed (I/O, serialization)

use thiserror::Error;

/// Exit codes for the kanbo CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for kanbo operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::EmptyTitle
            | Error::UnknownColumn(_)
            | Error::TaskNotFound(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for kanbo operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_user_errors() {
        assert_eq!(Error::EmptyTitle.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            Error::UnknownColumn("Limbo".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::TaskNotFound("7".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn io_errors_are_operation_failures() {
        let err = Error::Io(std::io::Error::other("disk full"));
        assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    }
}
