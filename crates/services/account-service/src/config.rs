//! Account service configuration.

use std::env;

use domain::DEFAULT_SYSTEM_PROMPT;

/// Account service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountServiceConfig {
    /// System prompt sent ahead of every chat transcript
    pub system_prompt: String,
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            system_prompt: env::var("CREDSTORE_SYSTEM_PROMPT")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}
