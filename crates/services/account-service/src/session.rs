//! Per-login session state.
//!
//! A `Session` is created by a successful login and owned by whoever
//! handles that user's requests. Dropping it or calling `logout` discards
//! the cached profile and the chat transcript.

use tracing::{debug, info};

use crate::chat::{ChatMessage, ChatService};
use common::AppResult;
use domain::UserProfile;

/// Logged-in user session
#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    profile: UserProfile,
    system_prompt: String,
    transcript: Vec<ChatMessage>,
}

impl Session {
    /// Create a session for an authenticated user
    pub fn new(
        username: impl Into<String>,
        profile: UserProfile,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            profile,
            system_prompt: system_prompt.into(),
            transcript: Vec::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Profile as fetched at login, plus any session-local edits
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// "Name Surname" with each part capitalised for greeting banners
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            capitalize(&self.profile.name),
            capitalize(&self.profile.surname)
        )
    }

    /// Change the displayed name and email for this session only.
    ///
    /// Nothing is written back to the credential store.
    pub fn update_profile(&mut self, name: Option<String>, email: Option<String>) {
        if let Some(name) = name {
            self.profile.name = name;
        }
        if let Some(email) = email {
            self.profile.email = email;
        }
        debug!(username = %self.username, "Updated session profile");
    }

    /// Conversation so far, without the system prompt
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Send a question to the chat service and record both turns.
    ///
    /// The request carries the system prompt followed by the whole
    /// transcript. If the service fails, the question is dropped from the
    /// transcript again.
    pub fn ask(&mut self, chat: &dyn ChatService, question: impl Into<String>) -> AppResult<String> {
        self.transcript.push(ChatMessage::user(question));

        let mut request = Vec::with_capacity(self.transcript.len() + 1);
        request.push(ChatMessage::system(self.system_prompt.as_str()));
        request.extend(self.transcript.iter().cloned());

        match chat.complete(&request) {
            Ok(answer) => {
                self.transcript.push(ChatMessage::assistant(answer.as_str()));
                Ok(answer)
            }
            Err(e) => {
                self.transcript.pop();
                Err(e)
            }
        }
    }

    /// End the session
    pub fn logout(self) {
        info!(username = %self.username, "Logged out");
    }
}

/// Upper-case the first character and lower-case the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
