//! Common utilities shared across the credential store workspace.
//!
//! This crate provides:
//! - Unified error handling (`AppError`)
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, ErrorBody, ErrorResponse, OptionExt};
