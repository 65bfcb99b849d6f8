//! Error types for tm
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown task id)
//! - 4: Operation failed (storage or terminal error)

use thiserror::Error;

/// Exit codes for the tm CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tm operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No task matches '{0}'")]
    TaskNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) | Error::TaskNotFound(_) | Error::InvalidConfig(_) => {
                exit_codes::USER_ERROR
            }
            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) | Error::OperationFailed(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }
}

/// Result type alias for tm operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_map_to_exit_code_2() {
        assert_eq!(
            Error::InvalidArgument("bad".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::TaskNotFound("abc".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn operation_failures_map_to_exit_code_4() {
        let err = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
        assert_eq!(
            Error::OperationFailed("boom".to_string()).exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }
}
