//! Credential store integration tests against a real users file.

use std::fs;
use std::thread;

use tempfile::TempDir;

use common::AppError;
use credential_store_lib::{CredentialStore, CsvCredentialStore, StoreConfig};
use domain::{HashCost, NewUser, UserProfile};

fn test_config(dir: &TempDir) -> StoreConfig {
    StoreConfig {
        users_file: dir.path().join("users.csv"),
        hashing: HashCost::minimal().into(),
    }
}

fn open(dir: &TempDir) -> CsvCredentialStore {
    CsvCredentialStore::open(&test_config(dir)).unwrap()
}

fn alice() -> NewUser {
    NewUser::new("alice", "pw1", "Alice", "A", "a@x.com")
}

#[test]
fn test_register_then_authenticate_scenario() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    store.register(&alice()).unwrap();

    assert!(store.authenticate("alice", "pw1").unwrap());
    assert!(!store.authenticate("alice", "wrong").unwrap());
    assert!(store.exists("alice").unwrap());
    assert!(!store.exists("bob").unwrap());
}

#[test]
fn test_authenticate_many_pairs() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let users = [("alice", "pw1"), ("bob", "hunter2"), ("carol", ""), ("dave", "p,w\"3")];

    for (username, password) in users {
        store
            .register(&NewUser::new(username, password, "N", "S", "e"))
            .unwrap();
    }

    for (username, password) in users {
        assert!(store.authenticate(username, password).unwrap());
        assert!(!store.authenticate(username, "definitely-not-it").unwrap());
    }
}

#[test]
fn test_unknown_user_fails_authentication() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.register(&alice()).unwrap();

    assert!(!store.authenticate("bob", "pw1").unwrap());
}

#[test]
fn test_usernames_are_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.register(&alice()).unwrap();

    assert!(!store.exists("Alice").unwrap());
    assert!(!store.exists("alice ").unwrap());
    assert!(!store.authenticate("ALICE", "pw1").unwrap());
}

#[test]
fn test_get_info_returns_fields_unmodified() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store
        .register(&NewUser::new("alice", "pw1", "alice", "van der Berg, Jr.", "not an email"))
        .unwrap();

    let info = store.get_info("alice").unwrap();
    assert_eq!(
        info,
        Some(UserProfile {
            name: "alice".to_string(),
            surname: "van der Berg, Jr.".to_string(),
            email: "not an email".to_string(),
        })
    );
    assert_eq!(store.get_info("bob").unwrap(), None);
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir);
        store.register(&alice()).unwrap();
    }

    let store = open(&dir);
    assert!(store.exists("alice").unwrap());
    assert!(store.authenticate("alice", "pw1").unwrap());
    assert_eq!(store.get_info("alice").unwrap().unwrap().email, "a@x.com");
}

#[test]
fn test_hashing_is_salted() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store
        .register(&NewUser::new("alice", "same", "A", "A", "a"))
        .unwrap();
    store
        .register(&NewUser::new("bob", "same", "B", "B", "b"))
        .unwrap();

    let mut reader = csv::Reader::from_path(store.path()).unwrap();
    let hashes: Vec<String> = reader
        .records()
        .map(|row| row.unwrap()[1].to_string())
        .collect();
    assert_eq!(hashes.len(), 2);
    assert_ne!(hashes[0], hashes[1]);

    assert!(store.authenticate("alice", "same").unwrap());
    assert!(store.authenticate("bob", "same").unwrap());
}

#[test]
fn test_initialize_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.register(&alice()).unwrap();

    store.initialize().unwrap();
    store.initialize().unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    let headers = contents
        .lines()
        .filter(|l| *l == "username,password_hash,name,surname,email")
        .count();
    assert_eq!(headers, 1);
    assert_eq!(contents.lines().count(), 2);
    assert!(store.exists("alice").unwrap());
}

#[test]
fn test_plain_register_keeps_duplicates() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    store.register(&alice()).unwrap();
    store
        .register(&NewUser::new("alice", "pw2", "Second", "A", "b@x.com"))
        .unwrap();

    assert_eq!(store.len().unwrap(), 2);
    let rows = fs::read_to_string(store.path())
        .unwrap()
        .lines()
        .filter(|l| l.starts_with("alice,"))
        .count();
    assert_eq!(rows, 2);

    // Either password opens the account; info comes from the first record
    assert!(store.authenticate("alice", "pw1").unwrap());
    assert!(store.authenticate("alice", "pw2").unwrap());
    assert_eq!(store.get_info("alice").unwrap().unwrap().name, "Alice");
}

#[test]
fn test_register_unique_rejects_duplicate() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    store.register_unique(&alice()).unwrap();
    let err = store
        .register_unique(&NewUser::new("alice", "pw2", "Other", "O", "o@x.com"))
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateUsername(ref name) if name == "alice"));
    assert_eq!(store.len().unwrap(), 1);
    assert!(!store.authenticate("alice", "pw2").unwrap());
}

#[test]
fn test_register_unique_under_contention() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let outcomes: Vec<Result<(), AppError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = &store;
                scope.spawn(move || {
                    store.register_unique(&NewUser::new(
                        "alice",
                        format!("pw{}", i),
                        "Alice",
                        "A",
                        "a@x.com",
                    ))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let successes = outcomes.iter().filter(|r| r.is_ok()).count();
    let duplicates = outcomes
        .iter()
        .filter(|r| matches!(r, Err(AppError::DuplicateUsername(_))))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(duplicates, 7);
    assert_eq!(store.len().unwrap(), 1);

    let reopened = open(&dir);
    assert_eq!(reopened.len().unwrap(), 1);
}

#[test]
fn test_malformed_row_fails_open() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    fs::write(
        &config.users_file,
        "username,password_hash,name,surname,email\nalice,$argon2id$x,Alice\n",
    )
    .unwrap();

    let err = CsvCredentialStore::open(&config).unwrap_err();
    assert!(matches!(err, AppError::MalformedRecord { line: 2, .. }));
}

#[test]
fn test_unreadable_storage_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    // A directory where the file should be cannot be read as a users file
    config.users_file = dir.path().to_path_buf();

    let err = CsvCredentialStore::open(&config).unwrap_err();
    assert!(matches!(err, AppError::StorageUnavailable { .. }));
}

#[test]
fn test_legacy_file_from_earlier_program() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let legacy_hash = bcrypt::hash("pw1", 4).unwrap();
    fs::write(
        &config.users_file,
        format!(
            "username,password,name,surname,email\r\nalice,{},Alice,A,a@x.com\r\n",
            legacy_hash
        ),
    )
    .unwrap();

    let store = CsvCredentialStore::open(&config).unwrap();
    assert!(store.authenticate("alice", "pw1").unwrap());

    store.register(&NewUser::new("bob", "pw2", "Bob", "B", "b@x.com")).unwrap();
    let reopened = CsvCredentialStore::open(&config).unwrap();
    assert_eq!(reopened.len().unwrap(), 2);
    assert!(reopened.authenticate("bob", "pw2").unwrap());
}
