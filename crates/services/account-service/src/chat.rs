//! Chat collaborator contract.
//!
//! The completion backend itself lives outside this workspace; sessions only
//! need something that turns a role-tagged transcript into one reply.

use serde::{Deserialize, Serialize};

use common::AppResult;
use domain::{ROLE_ASSISTANT, ROLE_SYSTEM, ROLE_USER};

/// Speaker of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "{}", ROLE_SYSTEM),
            Role::User => write!(f, "{}", ROLE_USER),
            Role::Assistant => write!(f, "{}", ROLE_ASSISTANT),
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Text-completion collaborator.
pub trait ChatService: Send + Sync {
    /// Return the assistant's reply to an ordered transcript
    fn complete(&self, messages: &[ChatMessage]) -> AppResult<String>;
}
