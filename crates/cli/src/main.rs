//! Tienda CLI - Offline catalog tooling.
//!
//! # Usage
//!
//! ```bash
//! # Check a catalog document before deploying it
//! tienda-cli catalog validate data/products.json
//!
//! # Preview what the storefront grid would show
//! tienda-cli catalog search data/products.json --category hogar --query lámpara
//! ```
//!
//! # Commands
//!
//! - `catalog validate` - Parse a catalog and report problems
//! - `catalog search` - Run the storefront filter against a catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "tienda-cli")]
#[command(author, version, about = "Tienda CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect catalog documents
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Parse a catalog document and report problems
    Validate {
        /// Path to the catalog JSON document
        path: PathBuf,
    },
    /// List the products the storefront grid would show
    Search {
        /// Path to the catalog JSON document
        path: PathBuf,

        /// Category to show (`all` for every category)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Case-insensitive text to look for in names and descriptions
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Validate { path } => commands::catalog::validate(&path).await,
            CatalogAction::Search {
                path,
                category,
                query,
            } => commands::catalog::search(&path, &category, &query).await,
        },
    }
}
