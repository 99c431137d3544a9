//! Domain-level constants.
//!
//! These constants define the on-disk record layout and session defaults.

// =============================================================================
// Storage layout
// =============================================================================

/// Column names of the users file, in on-disk order
pub const HEADER_COLUMNS: [&str; 5] = ["username", "password_hash", "name", "surname", "email"];

/// Second header column as written by the earlier program
pub const LEGACY_PASSWORD_COLUMN: &str = "password";

/// Number of fields in every record row
pub const RECORD_FIELD_COUNT: usize = HEADER_COLUMNS.len();

/// Default users file path (relative to the working directory)
pub const DEFAULT_USERS_FILE: &str = "users.csv";

/// Check if a header row names the expected columns
pub fn is_valid_header(row: &[&str]) -> bool {
    row.len() == RECORD_FIELD_COUNT
        && row.iter().zip(HEADER_COLUMNS.iter()).enumerate().all(|(i, (got, want))| {
            got == want || (i == 1 && *got == LEGACY_PASSWORD_COLUMN)
        })
}

// =============================================================================
// Chat
// =============================================================================

/// System prompt prepended to every transcript sent to the chat service
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";
