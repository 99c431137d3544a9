//! Credential store backed by a CSV users file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use super::codec;
use crate::config::StoreConfig;
use common::{AppError, AppResult};
use domain::{check_username, HashCost, NewUser, Password, UserProfile, UserRecord};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Credential store trait for dependency injection.
///
/// All operations are synchronous and run on the calling thread. Storage
/// failures are returned as errors, never as `false` or `None`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait CredentialStore: Send + Sync {
    /// Make sure the backing file exists with its header row. No-op if it does.
    fn initialize(&self) -> AppResult<()>;

    /// Check whether any record has exactly this username
    fn exists(&self, username: &str) -> AppResult<bool>;

    /// Hash the password and append a record.
    ///
    /// Does not check uniqueness; a second call with the same username
    /// stores a second record.
    fn register(&self, user: &NewUser) -> AppResult<()>;

    /// Append a record only if the username is not taken.
    ///
    /// The check and the append happen under the store's single writer
    /// guard, so two racing callers cannot both succeed.
    fn register_unique(&self, user: &NewUser) -> AppResult<()>;

    /// Verify a password against every record with this username
    fn authenticate(&self, username: &str, password: &str) -> AppResult<bool>;

    /// Display fields of the first record with this username
    fn get_info(&self, username: &str) -> AppResult<Option<UserProfile>>;

    /// Number of stored records, duplicates included
    fn len(&self) -> AppResult<usize>;

    fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Plaintext behind the dummy hash. A decoy check never authenticates, so
/// guessing it gains nothing.
const DUMMY_PASSWORD: &str = "not-a-real-password";

/// Hashes an authentication attempt is checked against
#[derive(Debug, PartialEq)]
enum Check<'a> {
    /// Recognised hashes stored for the username, in file order
    Stored(Vec<&'a Password>),
    /// Nothing verifiable is stored; burn one verification on the dummy
    /// and reject, so the attempt costs the same as a real one
    Decoy(&'a Password),
}

fn plan_check<'a>(candidates: &'a [Password], dummy: &'a Password) -> Check<'a> {
    let stored: Vec<&Password> = candidates.iter().filter(|c| c.is_recognized()).collect();
    if stored.is_empty() {
        Check::Decoy(dummy)
    } else {
        Check::Stored(stored)
    }
}

/// In-memory mirror of the users file
#[derive(Debug, Default)]
struct StoreState {
    /// Records in file order
    records: Vec<UserRecord>,
    /// username -> positions in `records`, ascending
    index: HashMap<String, Vec<usize>>,
    ends_with_newline: bool,
}

impl StoreState {
    fn from_rows(rows: codec::LoadedRows) -> Self {
        let mut state = Self {
            ends_with_newline: rows.ends_with_newline,
            ..Self::default()
        };
        for record in rows.records {
            state.push(record);
        }
        state
    }

    fn push(&mut self, record: UserRecord) {
        let position = self.records.len();
        self.index
            .entry(record.username.clone())
            .or_default()
            .push(position);
        self.records.push(record);
        self.ends_with_newline = true;
    }

    fn matches(&self, username: &str) -> impl Iterator<Item = &UserRecord> {
        self.index
            .get(username)
            .into_iter()
            .flatten()
            .map(move |&i| &self.records[i])
    }

    fn contains(&self, username: &str) -> bool {
        self.index.contains_key(username)
    }
}

/// CSV-backed implementation of CredentialStore.
///
/// The file is scanned once when the store is opened; afterwards lookups use
/// the in-memory index, and every append goes to disk before the index sees
/// it. One process should own a given users file.
///
/// Read failures surface from `open` and `reload` only. Lookups answer from
/// the index, so a file removed after opening is noticed by the next append
/// or reload, not by `exists`, `authenticate` or `get_info`.
pub struct CsvCredentialStore {
    path: PathBuf,
    cost: HashCost,
    /// Verified against when a username has no record, so timing does not
    /// reveal whether the user exists
    dummy: Password,
    state: Mutex<StoreState>,
}

impl std::fmt::Debug for CsvCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvCredentialStore")
            .field("path", &self.path)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl CsvCredentialStore {
    /// Initialize the users file and load every record from it.
    ///
    /// # Errors
    /// Fails if the file cannot be created or read, or if any row is
    /// malformed.
    pub fn open(config: &StoreConfig) -> AppResult<Self> {
        let cost = HashCost::from(config.hashing);
        let dummy = Password::with_cost(DUMMY_PASSWORD, &cost)?;
        let store = Self {
            path: config.users_file.clone(),
            cost,
            dummy,
            state: Mutex::new(StoreState::default()),
        };
        store.initialize()?;
        store.reload()?;
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-scan the backing file and rebuild the index.
    pub fn reload(&self) -> AppResult<()> {
        let mut state = self.lock()?;
        let rows = codec::read_rows(&self.path)?;
        *state = StoreState::from_rows(rows);
        debug!(
            path = %self.path.display(),
            records = state.records.len(),
            "Loaded users file"
        );
        Ok(())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| AppError::internal("credential store lock poisoned"))
    }

    fn build_record(&self, user: &NewUser) -> AppResult<UserRecord> {
        let password = Password::with_cost(&user.password, &self.cost)?;
        Ok(UserRecord {
            username: user.username.clone(),
            password_hash: password.into_string(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
        })
    }

    /// Write the record, then publish it to the index. Caller holds the guard.
    fn append(&self, state: &mut StoreState, record: UserRecord) -> AppResult<()> {
        codec::append_row(&self.path, &record, !state.ends_with_newline)?;
        info!(username = %record.username, "Registered user");
        state.push(record);
        Ok(())
    }
}

impl CredentialStore for CsvCredentialStore {
    fn initialize(&self) -> AppResult<()> {
        let mut state = self.lock()?;
        if codec::ensure_header(&self.path)? {
            info!(path = %self.path.display(), "Created users file");
            *state = StoreState {
                ends_with_newline: true,
                ..StoreState::default()
            };
        }
        Ok(())
    }

    fn exists(&self, username: &str) -> AppResult<bool> {
        let found = self.lock()?.contains(username);
        debug!(username, found, "Existence check");
        Ok(found)
    }

    fn register(&self, user: &NewUser) -> AppResult<()> {
        check_username(&user.username)?;
        let record = self.build_record(user)?;

        let mut state = self.lock()?;
        if state.contains(&record.username) {
            warn!(username = %record.username, "Storing duplicate username");
        }
        self.append(&mut state, record)
    }

    fn register_unique(&self, user: &NewUser) -> AppResult<()> {
        check_username(&user.username)?;
        // Cheap early rejection before paying for the hash
        if self.lock()?.contains(&user.username) {
            return Err(AppError::duplicate(&user.username));
        }
        let record = self.build_record(user)?;

        let mut state = self.lock()?;
        if state.contains(&record.username) {
            return Err(AppError::duplicate(record.username));
        }
        self.append(&mut state, record)
    }

    fn authenticate(&self, username: &str, password: &str) -> AppResult<bool> {
        // Hash verification is slow; don't hold the guard while doing it.
        let candidates: Vec<Password> = self
            .lock()?
            .matches(username)
            .map(|r| Password::from_hash(r.password_hash.as_str()))
            .collect();

        let stored = match plan_check(&candidates, &self.dummy) {
            Check::Stored(stored) => stored,
            Check::Decoy(dummy) => {
                let _ = dummy.verify(password);
                if candidates.is_empty() {
                    debug!(username, "Authentication failed");
                } else {
                    warn!(username, "Stored password hashes have an unrecognised format");
                }
                return Ok(false);
            }
        };

        if stored.into_iter().any(|hash| hash.verify(password)) {
            debug!(username, "Authentication succeeded");
            return Ok(true);
        }

        warn!(username, "Authentication failed");
        Ok(false)
    }

    fn get_info(&self, username: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.lock()?.matches(username).next().map(UserRecord::profile))
    }

    fn len(&self) -> AppResult<usize> {
        Ok(self.lock()?.records.len())
    }
}
