//! Credential persistence: the store trait, its CSV implementation and
//! the on-disk row codec.

pub mod codec;
mod credential_store;

pub use credential_store::{CredentialStore, CsvCredentialStore};

#[cfg(any(test, feature = "test-utils"))]
pub use credential_store::MockCredentialStore;
