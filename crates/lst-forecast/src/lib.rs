//! ARIMA(1,1,1) forecasting of the yearly mean LST series.
//!
//! There is no ARIMA estimator in the crate ecosystem this workspace draws
//! on, so the model is fit here: conditional sum of squares on the
//! once-differenced series, with Hannan-Rissanen starting values refined by
//! a Nelder-Mead simplex search.

pub mod arima;
pub mod error;
pub mod series;
mod simplex;

pub use arima::{Arima111, MIN_OBSERVATIONS};
pub use error::{ForecastError, ForecastResult};
pub use series::YearlySeries;

use tracing::{debug, info};

/// A fitted model together with its out-of-sample forecast.
#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    pub model: Arima111,
    /// Forecast years, `last observed year + 1 ..= + horizon`.
    pub years: Vec<i32>,
    /// Forecast mean LST values, one per year.
    pub values: Vec<f64>,
}

/// Fit ARIMA(1,1,1) to the series and forecast `horizon` steps ahead.
///
/// Requires at least [`MIN_OBSERVATIONS`] observations; fewer is an
/// [`ForecastError::InsufficientData`] error, raised before any model
/// fitting takes place.
pub fn forecast(series: &YearlySeries, horizon: usize) -> ForecastResult<ForecastOutcome> {
    if series.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            have: series.len(),
            need: MIN_OBSERVATIONS,
        });
    }

    let model = Arima111::fit(series.values())?;
    debug!(
        intercept = model.intercept,
        ar = model.ar,
        ma = model.ma,
        sigma2 = model.sigma2,
        "fitted ARIMA(1,1,1)"
    );

    let values = model.forecast_levels(series.values(), horizon);
    let last_year = series
        .last_year()
        .expect("non-empty series checked above");
    let years: Vec<i32> = (1..=horizon as i32).map(|h| last_year + h).collect();

    info!(
        observations = series.len(),
        horizon,
        first_forecast_year = years.first().copied(),
        "produced mean LST forecast"
    );

    Ok(ForecastOutcome {
        model,
        years,
        values,
    })
}
