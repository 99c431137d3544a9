//! Domain-level errors.
//!
//! Raised by the checks and hashing routines of this crate. Callers lift
//! them into `common::AppError`.

use thiserror::Error;

/// Failures of domain rules and password hashing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Username cannot be stored as a single row key
    #[error("Invalid username: {0}")]
    InvalidUsername(&'static str),

    /// Argon2 rejected the configured memory/iterations/parallelism
    #[error("Invalid hash cost: {0}")]
    InvalidCost(String),

    #[error("Password hash failed: {0}")]
    Hashing(String),

    /// Stored hash string could not be parsed for verification
    #[error("Unrecognised password hash: {0}")]
    UnrecognizedHash(String),
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
