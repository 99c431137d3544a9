//! credstore - command-line front end for the credential store.

mod cli;

use std::sync::Arc;

use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use account_service_lib::{AccountService, AccountServiceConfig, Accounts};
use cli::{Cli, Commands};
use common::{AppResult, OptionExt};
use credential_store_lib::{CredentialStore, CsvCredentialStore, StoreConfig};
use domain::NewUser;

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = StoreConfig::from_env();
    if let Some(path) = cli.users_file {
        config.users_file = path;
    }
    tracing::debug!(path = %config.users_file.display(), "Configuration loaded");

    let (output, status) = render(run(cli.command, &config, AccountServiceConfig::from_env()));
    println!("{}", output);
    if status != 0 {
        std::process::exit(status);
    }
}

fn run(
    command: Commands,
    config: &StoreConfig,
    account_config: AccountServiceConfig,
) -> AppResult<Value> {
    // Opening runs Initialize, so `init` has nothing left to do
    let store = Arc::new(CsvCredentialStore::open(config)?);
    let accounts = Accounts::new(store.clone(), account_config);

    match command {
        Commands::Init => Ok(json!({
            "users_file": store.path().display().to_string(),
            "records": store.len()?,
        })),
        Commands::Register {
            username,
            name,
            surname,
            email,
            password,
        } => {
            let profile = accounts.register(NewUser::new(
                username.as_str(),
                password,
                name,
                surname,
                email,
            ))?;
            Ok(json!({ "registered": username, "profile": profile }))
        }
        Commands::Exists { username } => {
            let exists = store.exists(&username)?;
            Ok(json!({ "username": username, "exists": exists }))
        }
        Commands::Login { username, password } => {
            let session = accounts.login(&username, &password)?;
            let output = json!({
                "username": session.username(),
                "welcome": session.display_name(),
                "profile": session.profile(),
            });
            session.logout();
            Ok(output)
        }
        Commands::Info { username } => {
            let profile = store.get_info(&username)?.ok_or_not_found()?;
            Ok(json!({ "username": username, "profile": profile }))
        }
    }
}

/// JSON to print and the exit status for a command result
fn render(result: AppResult<Value>) -> (Value, i32) {
    match result {
        Ok(output) => (output, 0),
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            (json!(e.to_response()), 1)
        }
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
