//! Amber Lane CLI - Catalog seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the hosted store from a YAML catalog (insert-or-skip by slug)
//! amber-lane seed -f catalog.yaml
//!
//! # Wipe the catalog tables and reseed from scratch
//! amber-lane seed -f catalog.yaml --clear
//!
//! # Delete every catalog row
//! amber-lane clear-catalog
//!
//! # Grant the admin flag to a customer profile
//! amber-lane admin grant -e admin@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `SUPABASE_URL` - Base URL of the hosted store
//! - `SUPABASE_SERVICE_ROLE_KEY` - Service-role API key

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "amber-lane")]
#[command(author, version, about = "Amber Lane CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the hosted store from a YAML catalog file
    Seed {
        /// Path to the YAML catalog file
        #[arg(short, long)]
        file: String,

        /// Delete the existing catalog first
        #[arg(long)]
        clear: bool,
    },
    /// Delete every catalog row (images, products, brands, categories)
    ClearCatalog,
    /// Manage customer profiles
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Set the admin flag on an existing profile
    Grant {
        /// Profile email address
        #[arg(short, long)]
        email: String,
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
        Commands::Seed { file, clear } => commands::seed::catalog(&file, clear).await?,
        Commands::ClearCatalog => commands::seed::clear().await?,
        Commands::Admin { action } => match action {
            AdminAction::Grant { email } => commands::admin::grant(&email).await?,
        },
    }
    Ok(())
}
