//! Integration tests for the NetCDF reader, against files written with
//! the workspace test utilities.

use lst_reader::{read_field, ReadError, DEFAULT_VARIABLE};
use test_utils::{assert_approx_eq, lst_grid, lst_grid_with_gaps, Packing};

#[test]
fn reads_first_time_slice_with_dims_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(test_utils::lst_filename(2010));
    let values = lst_grid(8, 4);
    test_utils::write_lst_file(&path, &values, 8, 4).unwrap();

    let field = read_field(&path, DEFAULT_VARIABLE).unwrap();
    assert_eq!(field.width, 8);
    assert_eq!(field.height, 4);
    assert_approx_eq!(field.value_at(0, 0).unwrap(), values[0], 1e-4);
    assert_approx_eq!(field.value_at(7, 3).unwrap(), values[31], 1e-4);
    assert_eq!(field.units.as_deref(), Some("kelvin"));
}

#[test]
fn coordinate_bounds_are_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bounds.nc");
    test_utils::write_lst_file(&path, &lst_grid(8, 4), 8, 4).unwrap();

    let bounds = read_field(&path, DEFAULT_VARIABLE).unwrap().bounds.unwrap();
    // Latitudes are written north to south; bounds still come out min<max.
    assert!(bounds.min_y < bounds.max_y);
    assert!(bounds.min_x < bounds.max_x);
    assert!(bounds.max_y <= 90.0 && bounds.min_y >= -90.0);
}

#[test]
fn missing_variable_is_a_distinct_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_lst.nc");
    test_utils::write_file_without_lst(&path, 4, 4).unwrap();

    match read_field(&path, DEFAULT_VARIABLE) {
        Err(ReadError::MissingVariable(name)) => assert_eq!(name, "lst"),
        other => panic!("expected MissingVariable, got {other:?}"),
    }
}

#[test]
fn packed_values_are_unscaled_and_fill_becomes_nan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("packed.nc");
    // Raw values 100 and 200 with scale 0.5 offset 250 -> 300 and 350;
    // -999 is the fill value.
    let raw = vec![100.0f32, 200.0, -999.0, 100.0];
    let packing = Packing {
        scale_factor: 0.5,
        add_offset: 250.0,
        fill_value: -999.0,
    };
    test_utils::write_lst_file_packed(&path, &raw, 2, 2, packing).unwrap();

    let field = read_field(&path, DEFAULT_VARIABLE).unwrap();
    assert_approx_eq!(field.value_at(0, 0).unwrap(), 300.0, 1e-4);
    assert_approx_eq!(field.value_at(1, 0).unwrap(), 350.0, 1e-4);
    assert!(field.value_at(0, 1).unwrap().is_nan());
}

#[test]
fn two_dimensional_variable_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flat.nc");
    test_utils::write_lst_file_2d(&path, &lst_grid(6, 3), 6, 3).unwrap();

    let field = read_field(&path, DEFAULT_VARIABLE).unwrap();
    assert_eq!(field.width, 6);
    assert_eq!(field.height, 3);
}

#[test]
fn spatial_mean_skips_fill_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gaps.nc");
    let values = lst_grid_with_gaps(4, 4, 4);
    test_utils::write_lst_file(&path, &values, 4, 4).unwrap();

    let field = read_field(&path, DEFAULT_VARIABLE).unwrap();
    let expected: f64 = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|&v| v as f64)
        .sum::<f64>()
        / 12.0;
    assert_approx_eq!(field.spatial_mean().unwrap(), expected, 1e-4);
}

#[test]
fn unreadable_file_surfaces_the_library_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.nc");
    std::fs::write(&path, b"this is not a netcdf file").unwrap();

    match read_field(&path, DEFAULT_VARIABLE) {
        Err(ReadError::NetCdf(_)) => {}
        other => panic!("expected NetCdf error, got {other:?}"),
    }
}
