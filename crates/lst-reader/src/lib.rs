//! Reading of yearly LST rasters from NetCDF files.
//!
//! Files are opened with the native `netcdf` library (which wraps
//! libnetcdf/HDF5). The reader exposes exactly what the viewer needs: the
//! first time slice of the LST variable as a [`RasterField`], with packed
//! values unscaled and fill values mapped to NaN.

pub mod error;

pub use error::{ReadError, ReadResult};

use std::path::Path;
use std::sync::Once;

use lst_common::{BoundingBox, RasterField};
use tracing::debug;

/// The variable name ESA CCI LST products use for the temperature raster.
pub const DEFAULT_VARIABLE: &str = "lst";

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose diagnostics to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when probing for optional
/// attributes that don't exist). This disables that output by installing
/// null handlers via `H5Eset_auto2`. Safe to call more than once; call it
/// early, before the first NetCDF operation.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and passing null handlers to
        // disable error output is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Read the first time slice of `var_name` from a NetCDF file.
///
/// Accepts a `(time, lat, lon)` variable (slice `[0, .., ..]` is taken) or
/// a bare `(lat, lon)` raster. `scale_factor`/`add_offset` are applied when
/// present and `_FillValue` cells become NaN. Geographic bounds are taken
/// from `lat`/`lon` coordinate variables when the file has them.
pub fn read_field(path: &Path, var_name: &str) -> ReadResult<RasterField> {
    silence_hdf5_errors();

    let file = netcdf::open(path)?;

    let var = file
        .variable(var_name)
        .ok_or_else(|| ReadError::MissingVariable(var_name.to_string()))?;

    let dims = var.dimensions();
    let (height, width) = match dims.len() {
        2 => (dims[0].len(), dims[1].len()),
        3 => (dims[1].len(), dims[2].len()),
        n => {
            return Err(ReadError::InvalidLayout(format!(
                "variable '{var_name}' has {n} dimensions, expected 2 or 3"
            )))
        }
    };

    let raw: Vec<f32> = if dims.len() == 3 {
        var.get_values((0, .., ..))?
    } else {
        var.get_values(..)?
    };
    if raw.len() != width * height {
        return Err(ReadError::InvalidLayout(format!(
            "variable '{var_name}' yielded {} values for a {width}x{height} grid",
            raw.len()
        )));
    }

    let scale_factor = get_f32_attr(&var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f32_attr(&var, "add_offset").unwrap_or(0.0);
    let fill_value = get_f32_attr(&var, "_FillValue");

    let data: Vec<f32> = raw
        .iter()
        .map(|&v| {
            if fill_value == Some(v) || !v.is_finite() {
                f32::NAN
            } else {
                v * scale_factor + add_offset
            }
        })
        .collect();

    let mut field = RasterField::new(data, width, height).ok_or_else(|| {
        ReadError::InvalidLayout(format!("inconsistent grid shape {width}x{height}"))
    })?;
    field.bounds = coordinate_bounds(&file);
    field.units = get_str_attr(&var, "units");

    debug!(
        path = %path.display(),
        variable = var_name,
        width,
        height,
        "read LST field"
    );

    Ok(field)
}

/// Geographic extent from the `lat`/`lon` (or `latitude`/`longitude`)
/// coordinate variables, when present.
fn coordinate_bounds(file: &netcdf::File) -> Option<BoundingBox> {
    let lat = axis_endpoints(file, &["lat", "latitude"])?;
    let lon = axis_endpoints(file, &["lon", "longitude"])?;
    Some(BoundingBox::from_axis_endpoints(lon.0, lon.1, lat.0, lat.1))
}

fn axis_endpoints(file: &netcdf::File, names: &[&str]) -> Option<(f64, f64)> {
    let var = names.iter().find_map(|n| file.variable(n))?;
    let values: Vec<f64> = var.get_values(..).ok()?;
    let first = values.first().copied()?;
    let last = values.last().copied()?;
    Some((first, last))
}

/// Check if a variable has an attribute with the given name.
/// This avoids probing HDF5 for attributes that are absent.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f32::try_from(attr_value).ok()
}

fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
