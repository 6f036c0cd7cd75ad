//! Error types for the archive catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building or querying the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read archive directory {path}: {message}")]
    DirRead { path: PathBuf, message: String },

    #[error("Invalid year selection: {0} is not in the archive")]
    InvalidYear(i32),
}
