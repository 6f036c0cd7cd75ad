//! Writers for small NetCDF files shaped like yearly ESA CCI LST products.

use std::path::Path;

/// Filename in the yearly product convention for a given year.
pub fn lst_filename(year: i32) -> String {
    format!("ESACCI-LST-L3C-LST-SSMI_SSMIS-{year:04}0101000000-fv2.33.nc")
}

/// Write a `(time, lat, lon)` file with an `lst` variable, cell-centered
/// lat/lon coordinates and a `units` attribute.
pub fn write_lst_file(
    path: &Path,
    values: &[f32],
    width: usize,
    height: usize,
) -> Result<(), netcdf::Error> {
    write_variable_file(path, "lst", values, width, height, true, None)
}

/// Write a file whose raster variable is named something other than `lst`,
/// for exercising the missing-variable path.
pub fn write_file_without_lst(
    path: &Path,
    width: usize,
    height: usize,
) -> Result<(), netcdf::Error> {
    let values = vec![0.0f32; width * height];
    write_variable_file(path, "tair", &values, width, height, true, None)
}

/// Write a 2-D `(lat, lon)` file without a time dimension.
pub fn write_lst_file_2d(
    path: &Path,
    values: &[f32],
    width: usize,
    height: usize,
) -> Result<(), netcdf::Error> {
    write_variable_file(path, "lst", values, width, height, false, None)
}

/// Packing attributes for [`write_lst_file_packed`].
#[derive(Debug, Clone, Copy)]
pub struct Packing {
    pub scale_factor: f32,
    pub add_offset: f32,
    pub fill_value: f32,
}

/// Write a file whose `lst` values are stored packed: the raw values are
/// written untouched and the scale/offset/fill attributes describe how a
/// reader should unpack them.
pub fn write_lst_file_packed(
    path: &Path,
    raw_values: &[f32],
    width: usize,
    height: usize,
    packing: Packing,
) -> Result<(), netcdf::Error> {
    write_variable_file(path, "lst", raw_values, width, height, true, Some(packing))
}

fn write_variable_file(
    path: &Path,
    variable: &str,
    values: &[f32],
    width: usize,
    height: usize,
    with_time_dim: bool,
    packing: Option<Packing>,
) -> Result<(), netcdf::Error> {
    assert_eq!(values.len(), width * height, "grid size mismatch");

    let mut file = netcdf::create(path)?;

    if with_time_dim {
        file.add_dimension("time", 1)?;
    }
    file.add_dimension("lat", height)?;
    file.add_dimension("lon", width)?;

    // Cell-centered coordinates; latitudes run north to south as in the
    // real products.
    let lats: Vec<f64> = (0..height)
        .map(|i| 90.0 - (i as f64 + 0.5) * 180.0 / height as f64)
        .collect();
    let lons: Vec<f64> = (0..width)
        .map(|j| -180.0 + (j as f64 + 0.5) * 360.0 / width as f64)
        .collect();

    let mut lat_var = file.add_variable::<f64>("lat", &["lat"])?;
    lat_var.put_values(&lats, ..)?;
    let mut lon_var = file.add_variable::<f64>("lon", &["lon"])?;
    lon_var.put_values(&lons, ..)?;

    let dims: &[&str] = if with_time_dim {
        &["time", "lat", "lon"]
    } else {
        &["lat", "lon"]
    };
    let mut var = file.add_variable::<f32>(variable, dims)?;
    var.put_attribute("units", "kelvin")?;
    if let Some(p) = packing {
        var.put_attribute("scale_factor", p.scale_factor)?;
        var.put_attribute("add_offset", p.add_offset)?;
        var.put_attribute("_FillValue", p.fill_value)?;
    }

    if with_time_dim {
        var.put_values(values, (0, .., ..))?;
    } else {
        var.put_values(values, ..)?;
    }

    Ok(())
}
