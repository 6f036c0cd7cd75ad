//! Year-indexed catalog of a local LST archive directory.
//!
//! ESA CCI LST yearly products are named with an embedded observation
//! timestamp, e.g.
//! `ESACCI-LST-L3C-LST-SSMI_SSMIS-20100101000000-fv2.33.nc`. The catalog
//! scans a directory once at startup, extracts the year from each matching
//! filename, and serves year lookups for the rest of the process lifetime.

pub mod error;
mod filename;

pub use error::{CatalogError, CatalogResult};
pub use filename::extract_year;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

/// Immutable mapping from observation year to the `.nc` file for that year.
#[derive(Debug, Clone)]
pub struct YearCatalog {
    root: PathBuf,
    files: BTreeMap<i32, PathBuf>,
}

impl YearCatalog {
    /// Scan `dir` (non-recursive) and build the catalog.
    ///
    /// Only regular files with a `.nc` extension and a recognizable
    /// `YYYYMMDD000000` timestamp in the name are kept. Directory entries
    /// are visited in lexicographic filename order; when two files map to
    /// the same year the later one wins silently.
    pub fn scan(dir: impl AsRef<Path>) -> CatalogResult<Self> {
        let root = dir.as_ref().to_path_buf();
        let mut files = BTreeMap::new();

        let walker = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| CatalogError::DirRead {
                path: root.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = match entry.file_name().to_str() {
                Some(n) => n,
                None => continue,
            };
            if !has_nc_extension(name) {
                continue;
            }
            match extract_year(name) {
                Some(year) => {
                    debug!(year, file = name, "cataloged LST file");
                    files.insert(year, entry.path().to_path_buf());
                }
                None => {
                    debug!(file = name, "skipping .nc file without a yearly timestamp");
                }
            }
        }

        info!(
            dir = %root.display(),
            years = files.len(),
            first = files.keys().next().copied(),
            last = files.keys().next_back().copied(),
            "scanned LST archive"
        );

        Ok(Self { root, files })
    }

    /// The scanned directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All known years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.files.keys().copied().collect()
    }

    /// Number of cataloged years.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Path for a year, or the invalid-year error when the year is not in
    /// the catalog. Never touches the filesystem.
    pub fn path_for(&self, year: i32) -> CatalogResult<&Path> {
        self.files
            .get(&year)
            .map(PathBuf::as_path)
            .ok_or(CatalogError::InvalidYear(year))
    }

    /// Iterate `(year, path)` pairs in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Path)> {
        self.files.iter().map(|(y, p)| (*y, p.as_path()))
    }
}

fn has_nc_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("nc"))
}
