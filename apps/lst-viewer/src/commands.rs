//! The three viewer operations: list years, render a map, forecast.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use lst_archive::YearCatalog;
use lst_forecast::YearlySeries;
use lst_reader::{read_field, ReadError};
use lst_renderer::chart::{render_forecast_chart, ChartLabels, CHART_HEIGHT, CHART_WIDTH};
use lst_renderer::map::render_map;
use lst_renderer::StyleDefinition;

use crate::config::ViewerConfig;

/// Print the archive's years, ascending.
pub fn years(catalog: &YearCatalog) -> Result<()> {
    if catalog.is_empty() {
        warn!(dir = %catalog.root().display(), "no yearly LST files found");
        return Ok(());
    }
    for (year, path) in catalog.iter() {
        debug!(year, file = %path.display(), "archive entry");
        println!("{year}");
    }
    Ok(())
}

/// Render one year's LST raster as a PNG map.
///
/// An unknown year fails with the invalid-year error before any file is
/// opened.
pub fn map(
    config: &ViewerConfig,
    catalog: &YearCatalog,
    year: i32,
    style_file: Option<&Path>,
    out: &Path,
) -> Result<()> {
    let path = catalog.path_for(year)?;

    let field = read_field(path, &config.variable)
        .with_context(|| format!("while reading {}", path.display()))?;

    let style = match style_file {
        Some(p) => StyleDefinition::from_file(p)?,
        None => StyleDefinition::lst_default(),
    };

    let title = format!("Land Surface Temperature for {year}");
    let image = render_map(&field, &style, &title)?;
    fs::write(out, image.to_png()?)
        .with_context(|| format!("while writing {}", out.display()))?;

    info!(year, out = %out.display(), "rendered LST map");
    Ok(())
}

/// Recompute every year's spatial mean, fit ARIMA(1,1,1) and render the
/// historical + forecast chart as a PNG.
///
/// Files without the expected variable are skipped; any other read
/// failure aborts the operation.
pub fn forecast(
    config: &ViewerConfig,
    catalog: &YearCatalog,
    horizon: usize,
    out: &Path,
) -> Result<()> {
    let mut series = YearlySeries::new();
    for (year, path) in catalog.iter() {
        match read_field(path, &config.variable) {
            Ok(field) => match field.spatial_mean() {
                Some(mean) => {
                    debug!(year, mean, "computed yearly spatial mean");
                    series.push(year, mean)?;
                }
                None => warn!(year, "every cell is a fill value; skipping"),
            },
            Err(ReadError::MissingVariable(variable)) => {
                warn!(year, variable = %variable, "file lacks the expected variable; skipping");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("while reading {}", path.display()));
            }
        }
    }

    let outcome = lst_forecast::forecast(&series, horizon)?;

    let historical: Vec<(i32, f64)> = series.iter().collect();
    let forecast_points: Vec<(i32, f64)> = outcome
        .years
        .iter()
        .copied()
        .zip(outcome.values.iter().copied())
        .collect();

    let image = render_forecast_chart(
        &historical,
        &forecast_points,
        &ChartLabels::default(),
        CHART_WIDTH,
        CHART_HEIGHT,
    )?;
    fs::write(out, image.to_png()?)
        .with_context(|| format!("while writing {}", out.display()))?;

    info!(
        observations = historical.len(),
        horizon,
        out = %out.display(),
        "rendered mean LST forecast"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lst_archive::CatalogError;
    use lst_forecast::ForecastError;
    use test_utils::{lst_filename, lst_grid, write_lst_file};

    fn config(dir: &Path) -> ViewerConfig {
        ViewerConfig {
            data_dir: dir.to_path_buf(),
            variable: "lst".to_string(),
        }
    }

    #[test]
    fn map_with_unknown_year_fails_before_opening_any_file() {
        let dir = tempfile::tempdir().unwrap();
        // The only cataloged file is unreadable garbage; if the command
        // tried to open anything the error would be a NetCDF one.
        std::fs::write(dir.path().join(lst_filename(2010)), b"garbage").unwrap();
        let catalog = YearCatalog::scan(dir.path()).unwrap();

        let out = dir.path().join("map.png");
        let err = map(&config(dir.path()), &catalog, 2011, None, &out).unwrap_err();
        match err.downcast_ref::<CatalogError>() {
            Some(CatalogError::InvalidYear(2011)) => {}
            other => panic!("expected InvalidYear, got {other:?}"),
        }
        assert!(!out.exists());
    }

    #[test]
    fn forecast_with_too_few_years_is_insufficient_data() {
        let dir = tempfile::tempdir().unwrap();
        for year in 2010..2013 {
            let path = dir.path().join(lst_filename(year));
            write_lst_file(&path, &lst_grid(4, 4), 4, 4).unwrap();
        }
        let catalog = YearCatalog::scan(dir.path()).unwrap();

        let out = dir.path().join("forecast.png");
        let err = forecast(&config(dir.path()), &catalog, 10, &out).unwrap_err();
        match err.downcast_ref::<ForecastError>() {
            Some(ForecastError::InsufficientData { have: 3, need: 5 }) => {}
            other => panic!("expected InsufficientData, got {other:?}"),
        }
        assert!(!out.exists());
    }
}
