//! Viewer configuration.

use std::path::PathBuf;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Directory containing the yearly `.nc` files.
    pub data_dir: PathBuf,
    /// Name of the raster variable inside the files.
    pub variable: String,
}
