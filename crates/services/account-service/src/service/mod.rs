//! Account service business logic.

mod account_service;

pub use account_service::{AccountService, Accounts};
