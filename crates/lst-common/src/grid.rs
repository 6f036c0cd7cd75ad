//! Gridded raster field type.

use crate::BoundingBox;

/// A single 2-D raster of land surface temperature values.
///
/// Data is stored in row-major order, one row per latitude step, matching the
/// layout NetCDF files use for `(lat, lon)` variables. Missing cells (fill
/// values in the source file) are represented as `NaN`.
#[derive(Debug, Clone)]
pub struct RasterField {
    /// Cell values in row-major order, length `width * height`.
    pub data: Vec<f32>,
    /// Number of longitude points.
    pub width: usize,
    /// Number of latitude points.
    pub height: usize,
    /// Geographic extent, when the file carries lat/lon coordinate variables.
    pub bounds: Option<BoundingBox>,
    /// Units of the values, from the variable's `units` attribute.
    pub units: Option<String>,
}

impl RasterField {
    /// Create a field from raw cell values.
    ///
    /// Returns `None` if `data.len() != width * height`.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            bounds: None,
            units: None,
        })
    }

    /// Value at (column, row), or `None` outside the grid.
    pub fn value_at(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Arithmetic mean over all finite cells, skipping NaN fill cells.
    ///
    /// Returns `None` when every cell is NaN.
    pub fn spatial_mean(&self) -> Option<f64> {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for &v in &self.data {
            if v.is_finite() {
                sum += v as f64;
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Minimum and maximum over finite cells, or `None` for an all-NaN field.
    pub fn finite_min_max(&self) -> Option<(f32, f32)> {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.data {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            None
        } else {
            Some((min, max))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_length() {
        assert!(RasterField::new(vec![0.0; 5], 2, 3).is_none());
        assert!(RasterField::new(vec![0.0; 6], 2, 3).is_some());
    }

    #[test]
    fn spatial_mean_skips_nan() {
        let field = RasterField::new(vec![280.0, f32::NAN, 290.0, f32::NAN], 2, 2).unwrap();
        let mean = field.spatial_mean().unwrap();
        assert!((mean - 285.0).abs() < 1e-9);
    }

    #[test]
    fn spatial_mean_of_all_nan_is_none() {
        let field = RasterField::new(vec![f32::NAN; 4], 2, 2).unwrap();
        assert!(field.spatial_mean().is_none());
    }

    #[test]
    fn finite_min_max_ignores_fill() {
        let field = RasterField::new(vec![270.0, f32::NAN, 310.5, 280.0], 2, 2).unwrap();
        assert_eq!(field.finite_min_max(), Some((270.0, 310.5)));
    }

    #[test]
    fn value_at_bounds_checked() {
        let field = RasterField::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        assert_eq!(field.value_at(1, 1), Some(4.0));
        assert_eq!(field.value_at(2, 0), None);
    }
}
