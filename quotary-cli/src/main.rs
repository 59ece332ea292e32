//! # quotary
//!
//! Local-first quote store with remote sync.
//!
//! ## Commands
//!
//! - `init`: Create the data directory, default config, and starter quotes
//! - `add` / `list` / `categories` / `random` / `filter`: work with the store
//! - `pull` / `push`: reconcile with the configured remote
//! - `export` / `import`: bulk JSON transfer
//! - `status`: show store and sync configuration
//! - `watch`: run periodic sync until interrupted
//!
//! ## Example
//!
//! ```bash
//! quotary init
//! quotary add "Stay hungry, stay foolish." Motivation
//! quotary random
//! quotary pull
//! quotary export --output quotes.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{
    add, categories, export, filter, import, init, list, pull, push, random, status, watch,
};

/// Local-first quote store with remote sync.
#[derive(Parser, Debug)]
#[command(name = "quotary")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Data directory for quotes, filter state, and configuration
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the data directory, default config, and starter quotes
    Init,

    /// Add a quote
    Add {
        /// The quote text
        text: String,

        /// The category to file it under
        category: String,
    },

    /// List stored quotes
    List {
        /// Only list quotes in this category
        #[arg(long, short)]
        category: Option<String>,
    },

    /// List distinct categories
    Categories,

    /// Show a random quote (honors the saved filter)
    Random {
        /// Override the saved filter for this draw
        #[arg(long, short)]
        category: Option<String>,
    },

    /// Show or set the saved category filter
    Filter {
        /// New filter value ("all" or a category); omit to show the current one
        value: Option<String>,
    },

    /// Pull new quotes from the remote
    Pull,

    /// Upload the full store to the remote
    Push,

    /// Export all quotes as a JSON document
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Import quotes from a JSON document
    Import {
        /// File containing a JSON array of quotes
        file: PathBuf,
    },

    /// Show store and sync status
    Status,

    /// Run periodic sync until interrupted
    Watch {
        /// Override the configured interval, in seconds
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    match cli.command {
        Commands::Init => init::run(&data_dir)?,
        Commands::Add { text, category } => add::run(&data_dir, &text, &category)?,
        Commands::List { category } => list::run(&data_dir, category.as_deref())?,
        Commands::Categories => categories::run(&data_dir)?,
        Commands::Random { category } => random::run(&data_dir, category.as_deref())?,
        Commands::Filter { value } => filter::run(&data_dir, value.as_deref())?,
        Commands::Pull => pull::run(&data_dir).await?,
        Commands::Push => push::run(&data_dir).await?,
        Commands::Export { output } => export::run(&data_dir, output.as_deref())?,
        Commands::Import { file } => import::run(&data_dir, &file)?,
        Commands::Status => status::run(&data_dir)?,
        Commands::Watch { interval } => watch::run(&data_dir, interval).await?,
    }

    Ok(())
}

/// Get the default data directory for quotary.
fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("io", "quotary", "quotary")
        .context("Could not determine home directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
