//! Account Service Library
//!
//! The layer a front end talks to: registration, login, and the explicit
//! per-user `Session` that carries the profile and chat transcript.

pub mod chat;
pub mod config;
pub mod service;
pub mod session;

pub use chat::{ChatMessage, ChatService, Role};
pub use config::AccountServiceConfig;
pub use service::{AccountService, Accounts};
pub use session::Session;
