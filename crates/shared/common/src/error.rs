//! Unified error handling for the credential store and its callers.
//!
//! Storage failures are always surfaced as errors; they are never folded
//! into a "not found" or "false" result.

use std::path::PathBuf;

use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Storage
    #[error("Storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    // Registration & authentication
    #[error("Username {0} already exists")]
    DuplicateUsername(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Collaborators
    #[error("Chat service unavailable: {0}")]
    ChatUnavailable(String),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Serializable error body for command-line output
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Get stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StorageUnavailable { .. } => "STORAGE_UNAVAILABLE",
            AppError::MalformedRecord { .. } => "MALFORMED_RECORD",
            AppError::DuplicateUsername(_) => "DUPLICATE_USERNAME",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::ChatUnavailable(_) => "CHAT_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),

            // Same wording whether or not the caller raced another registration
            AppError::DuplicateUsername(_) => "Username already exists".to_string(),

            // Never distinguish unknown user from wrong password
            AppError::InvalidCredentials => "Invalid username or password".to_string(),

            // Hide details for internal/storage errors
            AppError::StorageUnavailable { path, source } => {
                tracing::error!("Storage error at {}: {:?}", path.display(), source);
                "User storage is unavailable".to_string()
            }
            AppError::MalformedRecord { line, reason } => {
                tracing::error!("Malformed record at line {}: {}", line, reason);
                "User storage is corrupt".to_string()
            }
            AppError::ChatUnavailable(msg) => {
                tracing::error!("Chat service error: {}", msg);
                "The assistant is unavailable".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }

    /// Build the serializable error body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidUsername(_) => AppError::Validation(err.to_string()),
            // Bad cost settings or a failed hash are operator problems, not input errors
            DomainError::InvalidCost(_)
            | DomainError::Hashing(_)
            | DomainError::UnrecognizedHash(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        AppError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub fn duplicate(username: impl Into<String>) -> Self {
        AppError::DuplicateUsername(username.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn chat_unavailable(msg: impl Into<String>) -> Self {
        AppError::ChatUnavailable(msg.into())
    }
}
