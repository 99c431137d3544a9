//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage the users file behind the chat front end
#[derive(Parser, Debug)]
#[command(name = "credstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Users file path
    #[arg(long, global = true, env = "CREDSTORE_USERS_FILE")]
    pub users_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the users file with its header if it is missing
    Init,

    /// Register a new user
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CREDSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Check whether a username is registered
    Exists {
        username: String,
    },

    /// Verify credentials and print the session profile
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CREDSTORE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Print the display fields of a user
    Info {
        username: String,
    },
}
