//! # Application Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in drivecost                              │
//! │                                                                         │
//! │  Command Function ── Result<Outcome, AppError>                          │
//! │         │                                                               │
//! │         ├── DbError   (store, import/export) ──┐                        │
//! │         ├── CoreError (comparison, tags)     ──┼──► AppError            │
//! │         └── io / json / toml                 ──┘       │                │
//! │                                                        ▼                │
//! │                                     main: "error: <message>" on stderr  │
//! │                                           exit status from the code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use drivecost_core::CoreError;
use drivecost_db::DbError;
use serde::Serialize;

/// Error returned from CLI commands.
///
/// `main` prints the message on stderr and exits with the code's status.
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Profile or file not found
    NotFound,

    /// A profile failed validation
    ValidationError,

    /// Arguments are well-formed but not acceptable
    InvalidInput,

    /// Database operation failed
    DatabaseError,

    /// Config file missing, unreadable or invalid
    ConfigError,

    /// Reading or writing a file or stdout failed
    IoError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorCode::ValidationError | ErrorCode::InvalidInput => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::ConfigError => 4,
            ErrorCode::DatabaseError
            | ErrorCode::IoError
            | ErrorCode::Internal => 1,
        }
    }
}

impl AppError {
    /// Creates a new application error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates a config error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }
}

/// Converts store errors to application errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { value, .. } => AppError::invalid_input(format!(
                "A profile with ID '{value}' already exists"
            )),
            DbError::InvalidId(message) => AppError::invalid_input(message),
            DbError::InvalidProfile(messages) => AppError::new(
                ErrorCode::ValidationError,
                format!("Profile is invalid:\n  - {}", messages.join("\n  - ")),
            ),
            DbError::Io { path, source } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    AppError::not_found("File", &path.display().to_string())
                } else {
                    AppError::new(
                        ErrorCode::IoError,
                        format!("Cannot access {}: {source}", path.display()),
                    )
                }
            }
            DbError::Json(e) => AppError::invalid_input(format!("Malformed profile document: {e}")),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to application errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidProfile(_) => {
                AppError::new(ErrorCode::ValidationError, message)
            }
            CoreError::TooFewProfiles { .. }
            | CoreError::TooManyProfiles { .. }
            | CoreError::UnknownTag { .. } => AppError::invalid_input(message),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::IoError, format!("I/O error: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Failed to encode JSON: {err}"))
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::config(format!("Invalid config file: {err}"))
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::config(format!("Cannot encode config: {err}"))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for CLI commands.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_profile_lists_messages() {
        let err = AppError::from(DbError::InvalidProfile(vec![
            "Name is required".to_string(),
            "Expected years of ownership must be > 0".to_string(),
        ]));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("  - Name is required"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_not_found_exit_code() {
        let err = AppError::from(DbError::not_found("Profile", "abc"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Profile not found: abc");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_comparison_size_is_invalid_input() {
        let err = AppError::from(CoreError::TooFewProfiles { min: 2, actual: 1 });
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_serializes_code_in_screaming_case() {
        let json = serde_json::to_value(AppError::not_found("Profile", "x")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
    }
}
