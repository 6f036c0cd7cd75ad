//! End-to-end flows over a synthetic archive of NetCDF files.

use std::path::Path;

use lst_archive::YearCatalog;
use lst_viewer::commands;
use lst_viewer::config::ViewerConfig;
use test_utils::{constant_grid, lst_filename, write_file_without_lst, write_lst_file};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn config(dir: &Path) -> ViewerConfig {
    ViewerConfig {
        data_dir: dir.to_path_buf(),
        variable: "lst".to_string(),
    }
}

/// Write `count` yearly files starting at 2005, each with a slightly
/// warmer constant field than the last.
fn write_archive(dir: &Path, count: usize) {
    for i in 0..count {
        let year = 2005 + i as i32;
        let grid = constant_grid(8, 4, 280.0 + i as f32 * 0.4);
        write_lst_file(&dir.join(lst_filename(year)), &grid, 8, 4).unwrap();
    }
}

#[test]
fn catalog_lists_years_ascending() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), 3);
    // A stray non-product file must not show up
    std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    let catalog = YearCatalog::scan(dir.path()).unwrap();
    assert_eq!(catalog.years(), vec![2005, 2006, 2007]);
    assert!(commands::years(&catalog).is_ok());
}

#[test]
fn map_command_writes_a_png() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), 1);
    let catalog = YearCatalog::scan(dir.path()).unwrap();

    let out = dir.path().join("map.png");
    commands::map(&config(dir.path()), &catalog, 2005, None, &out).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
}

#[test]
fn forecast_command_writes_a_png_and_skips_varless_files() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), 6);
    // A cataloged year whose file lacks the lst variable is skipped, not
    // fatal.
    write_file_without_lst(&dir.path().join(lst_filename(2020)), 4, 4).unwrap();

    let catalog = YearCatalog::scan(dir.path()).unwrap();
    assert_eq!(catalog.len(), 7);

    let out = dir.path().join("forecast.png");
    commands::forecast(&config(dir.path()), &catalog, 10, &out).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], &PNG_SIGNATURE);
}

#[test]
fn forecast_horizon_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    write_archive(dir.path(), 5);
    let catalog = YearCatalog::scan(dir.path()).unwrap();

    let out = dir.path().join("forecast.png");
    commands::forecast(&config(dir.path()), &catalog, 3, &out).unwrap();
    assert!(out.exists());
}
