//! Credential Store Library
//!
//! Durable persistence and verification of user identity. Records live in a
//! CSV users file; passwords are stored only as salted Argon2id hashes.
//!
//! ```no_run
//! use credential_store_lib::{CredentialStore, CsvCredentialStore, StoreConfig};
//! use domain::NewUser;
//!
//! let store = CsvCredentialStore::open(&StoreConfig::from_env())?;
//! store.register_unique(&NewUser::new("alice", "pw1", "Alice", "A", "a@x.com"))?;
//! assert!(store.authenticate("alice", "pw1")?);
//! # Ok::<(), common::AppError>(())
//! ```

pub mod config;
pub mod repository;

pub use config::StoreConfig;
pub use repository::{CredentialStore, CsvCredentialStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockCredentialStore;
