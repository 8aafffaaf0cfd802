//! CLI subcommands.

pub mod catalog;

use std::path::PathBuf;

use thiserror::Error;
use tienda_core::CatalogError;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("catalog has {0} problem(s)")]
    Invalid(usize),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
