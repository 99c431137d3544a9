//! User record entity and related types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{DomainError, DomainResult};

/// One stored user: identity, credential and display fields.
///
/// Field order matches the column order of the users file.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub email: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .finish()
    }
}

impl UserRecord {
    /// Display fields of this record, exactly as stored
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            surname: self.surname.clone(),
            email: self.email.clone(),
        }
    }
}

/// Display fields returned by an info lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub surname: String,
    pub email: String,
}

/// Registration input
#[derive(Clone, Validate)]
pub struct NewUser {
    #[validate(
        length(min = 1, message = "Username must not be empty"),
        custom(function = "validate_username")
    )]
    pub username: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
    pub name: String,
    pub surname: String,
    /// Free-form; not checked for format
    pub email: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .finish()
    }
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
        }
    }
}

/// Check that a username can be stored as a row key.
///
/// Usernames are compared exactly as given; nothing is trimmed or folded.
pub fn check_username(username: &str) -> DomainResult<()> {
    if username.is_empty() {
        return Err(DomainError::InvalidUsername("must not be empty"));
    }
    if username.contains(['\r', '\n', '\0']) {
        return Err(DomainError::InvalidUsername(
            "must not contain line breaks or NUL characters",
        ));
    }
    Ok(())
}

pub fn is_valid_username(username: &str) -> bool {
    check_username(username).is_ok()
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if is_valid_username(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("username");
        err.message = Some("Username contains invalid characters".into());
        Err(err)
    }
}
