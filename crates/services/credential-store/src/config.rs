//! Credential store configuration.

use std::path::PathBuf;

use common::{default_users_file, env_or, HashingConfig};

/// Credential store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the users file
    pub users_file: PathBuf,
    /// Cost used for new password hashes
    pub hashing: HashingConfig,
}

impl StoreConfig {
    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = HashingConfig::default();
        Self {
            users_file: std::env::var_os("CREDSTORE_USERS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(default_users_file),
            hashing: HashingConfig {
                memory_kib: env_or("CREDSTORE_ARGON2_MEMORY_KIB", defaults.memory_kib),
                iterations: env_or("CREDSTORE_ARGON2_ITERATIONS", defaults.iterations),
                parallelism: env_or("CREDSTORE_ARGON2_PARALLELISM", defaults.parallelism),
            },
        }
    }

    /// Configuration for a specific file with default hashing cost.
    pub fn with_file(users_file: impl Into<PathBuf>) -> Self {
        Self {
            users_file: users_file.into(),
            hashing: HashingConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
            hashing: HashingConfig::default(),
        }
    }
}
