//! Shared configuration structures.

use domain::{HashCost, DEFAULT_USERS_FILE};

/// Password hashing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    /// Argon2 memory size in KiB
    pub memory_kib: u32,
    /// Argon2 passes
    pub iterations: u32,
    /// Argon2 lanes
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        HashCost::default().into()
    }
}

impl From<HashingConfig> for HashCost {
    fn from(config: HashingConfig) -> Self {
        HashCost {
            memory_kib: config.memory_kib,
            iterations: config.iterations,
            parallelism: config.parallelism,
        }
    }
}

impl From<HashCost> for HashingConfig {
    fn from(cost: HashCost) -> Self {
        Self {
            memory_kib: cost.memory_kib,
            iterations: cost.iterations,
            parallelism: cost.parallelism,
        }
    }
}

/// Default users file location
pub fn default_users_file() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_USERS_FILE)
}

/// Read an environment variable, falling back to `default` when the
/// variable is unset or does not parse.
pub fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("COMMON_TEST_UNSET_VARIABLE", 7u32), 7);

        std::env::set_var("COMMON_TEST_BAD_NUMBER", "lots");
        assert_eq!(env_or("COMMON_TEST_BAD_NUMBER", 3u32), 3);

        std::env::set_var("COMMON_TEST_GOOD_NUMBER", "42");
        assert_eq!(env_or("COMMON_TEST_GOOD_NUMBER", 3u32), 42);
    }

    #[test]
    fn test_hashing_config_matches_domain_defaults() {
        assert_eq!(HashCost::from(HashingConfig::default()), HashCost::default());
    }
}
