//! Account service - registration and login on top of the credential store.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::config::AccountServiceConfig;
use crate::session::Session;
use common::{AppError, AppResult};
use credential_store_lib::CredentialStore;
use domain::{NewUser, UserProfile};

/// Account service trait for dependency injection.
pub trait AccountService: Send + Sync {
    /// Register a new user; fails with `DuplicateUsername` if the name is taken
    fn register(&self, user: NewUser) -> AppResult<UserProfile>;

    /// Check credentials and open a session
    fn login(&self, username: &str, password: &str) -> AppResult<Session>;
}

/// Concrete implementation of AccountService over a credential store.
pub struct Accounts {
    store: Arc<dyn CredentialStore>,
    config: AccountServiceConfig,
}

impl Accounts {
    /// Create new account service instance
    pub fn new(store: Arc<dyn CredentialStore>, config: AccountServiceConfig) -> Self {
        Self { store, config }
    }
}

impl AccountService for Accounts {
    fn register(&self, user: NewUser) -> AppResult<UserProfile> {
        user.validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        // Check and append happen atomically inside the store
        self.store.register_unique(&user)?;
        info!(username = %user.username, "Account created");

        Ok(UserProfile {
            name: user.name,
            surname: user.surname,
            email: user.email,
        })
    }

    fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        // Same error for unknown user and wrong password
        if !self.store.authenticate(username, password)? {
            warn!(username, "Login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let profile = self
            .store
            .get_info(username)?
            .ok_or_else(|| AppError::internal("authenticated user has no record"))?;

        info!(username, "Logged in");
        Ok(Session::new(
            username,
            profile,
            self.config.system_prompt.as_str(),
        ))
    }
}
