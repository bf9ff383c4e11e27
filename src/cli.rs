use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// JSON file with the starting profile (defaults to ~/profile_card.json)
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Displays the starting profile card
    Show,
    /// Checks a single field value
    Validate {
        /// Field to check (name, email, phone, profilePicture)
        field: String,
        /// Value to check
        value: String,
    },
}
