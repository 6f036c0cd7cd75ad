//! Error types for NetCDF reading.

use thiserror::Error;

/// Result type for reader operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Errors that can occur while reading an LST file.
#[derive(Error, Debug)]
pub enum ReadError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from the NetCDF library (unreadable or malformed file)
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// The expected data variable is absent from the file
    #[error("'{0}' variable not found")]
    MissingVariable(String),

    /// The variable exists but its shape cannot be interpreted as a raster
    #[error("Invalid data layout: {0}")]
    InvalidLayout(String),
}
