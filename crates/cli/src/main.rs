//! Credit application CLI - database migrations.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ca-cli migrate
//!
//! # Run migrations against an explicit database
//! ca-cli migrate --database-url postgres://localhost/credit
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ca-cli")]
#[command(author, version, about = "Credit application CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        /// `PostgreSQL` connection string (defaults to `CREDIT_DATABASE_URL`)
        #[arg(long)]
        database_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { database_url } => commands::migrate::run(database_url).await?,
    }
    Ok(())
}
