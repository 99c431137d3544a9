//! Domain layer - Core credential entities and value objects.
//!
//! This crate contains pure domain logic with no storage dependencies.
//! The credential store and the account service both build on these types.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{HashCost, Password};
pub use user::{check_username, is_valid_username, NewUser, UserProfile, UserRecord};
