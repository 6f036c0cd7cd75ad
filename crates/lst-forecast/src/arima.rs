//! ARIMA(1,1,1) estimation by conditional sum of squares.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{ForecastError, ForecastResult};
use crate::simplex::nelder_mead;

/// Minimum number of observations the model will accept.
pub const MIN_OBSERVATIONS: usize = 5;

/// Keep AR/MA coefficients inside the stationary/invertible box.
const COEFF_BOUND: f64 = 0.99;

/// A fitted ARIMA(1,1,1) model.
///
/// Parameters describe the once-differenced series `w_t = y_t - y_{t-1}`:
/// `w_t = intercept + ar * w_{t-1} + e_t + ma * e_{t-1}`.
#[derive(Debug, Clone, Copy)]
pub struct Arima111 {
    pub intercept: f64,
    pub ar: f64,
    pub ma: f64,
    /// Residual variance of the conditional sum-of-squares fit.
    pub sigma2: f64,
}

impl Arima111 {
    /// Fit the model to a series of level observations.
    pub fn fit(levels: &[f64]) -> ForecastResult<Self> {
        if levels.len() < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                have: levels.len(),
                need: MIN_OBSERVATIONS,
            });
        }

        let w = difference(levels);
        let start = hannan_rissanen(&w).unwrap_or_else(|| moment_start(&w));
        debug!(
            intercept = start[0],
            ar = start[1],
            ma = start[2],
            "starting values for CSS refinement"
        );

        let scale = w.iter().fold(0.0f64, |m, v| m.max(v.abs()));
        let steps = [0.1 * scale.max(1e-3), 0.1, 0.1];
        let objective = |p: &[f64]| penalized_css(&w, p[0], p[1], p[2]);
        let best = nelder_mead(objective, &start, &steps, 400, 1e-12);

        let (intercept, ar, ma) = (
            best[0],
            best[1].clamp(-COEFF_BOUND, COEFF_BOUND),
            best[2].clamp(-COEFF_BOUND, COEFF_BOUND),
        );
        let (sse, _, count) = css_residuals(&w, intercept, ar, ma);
        let sigma2 = if count > 0 { sse / count as f64 } else { 0.0 };

        Ok(Self {
            intercept,
            ar,
            ma,
            sigma2,
        })
    }

    /// Forecast `horizon` level values beyond the end of `levels`.
    ///
    /// Iterates the ARMA recursion on the differenced series with future
    /// shocks at zero, then re-integrates from the last observed level.
    pub fn forecast_levels(&self, levels: &[f64], horizon: usize) -> Vec<f64> {
        let w = difference(levels);
        let (_, last_residual, _) = css_residuals(&w, self.intercept, self.ar, self.ma);

        let mut level = *levels.last().expect("fit requires observations");
        let mut w_prev = *w.last().expect("fit requires two observations");
        let mut e_prev = last_residual;

        let mut out = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let w_hat = self.intercept + self.ar * w_prev + self.ma * e_prev;
            level += w_hat;
            out.push(level);
            w_prev = w_hat;
            e_prev = 0.0;
        }
        out
    }
}

/// First difference of a level series.
pub fn difference(levels: &[f64]) -> Vec<f64> {
    levels.windows(2).map(|p| p[1] - p[0]).collect()
}

/// Conditional sum of squares of the ARMA(1,1) recursion on `w`.
///
/// Conditions on the first observation with the pre-sample shock at zero.
/// Returns `(sse, last residual, residual count)`.
fn css_residuals(w: &[f64], intercept: f64, ar: f64, ma: f64) -> (f64, f64, usize) {
    let mut sse = 0.0;
    let mut prev_e = 0.0;
    for t in 1..w.len() {
        let e = w[t] - intercept - ar * w[t - 1] - ma * prev_e;
        sse += e * e;
        prev_e = e;
    }
    (sse, prev_e, w.len().saturating_sub(1))
}

/// CSS objective with a steep penalty outside the coefficient box, so the
/// simplex search stays within the stationary/invertible region.
fn penalized_css(w: &[f64], intercept: f64, ar: f64, ma: f64) -> f64 {
    let mut penalty = 0.0;
    if ar.abs() >= COEFF_BOUND {
        penalty += 1e9 * (1.0 + ar.abs() - COEFF_BOUND);
    }
    if ma.abs() >= COEFF_BOUND {
        penalty += 1e9 * (1.0 + ma.abs() - COEFF_BOUND);
    }
    let (sse, _, _) = css_residuals(
        w,
        intercept,
        ar.clamp(-COEFF_BOUND, COEFF_BOUND),
        ma.clamp(-COEFF_BOUND, COEFF_BOUND),
    );
    sse + penalty
}

/// Hannan-Rissanen two-stage regression for starting values.
///
/// Stage one fits a long autoregression to proxy the shocks; stage two
/// regresses `w_t` on `[1, w_{t-1}, e_{t-1}]`. Needs a reasonably long
/// differenced series; returns `None` below that or when the regression
/// is singular, and the caller falls back to moment-based starts.
fn hannan_rissanen(w: &[f64]) -> Option<[f64; 3]> {
    let n = w.len();
    if n < 8 {
        return None;
    }

    // Stage 1: AR(2) by least squares, residuals as shock estimates.
    let rows = n - 2;
    let x1 = DMatrix::from_fn(rows, 3, |r, c| match c {
        0 => 1.0,
        1 => w[r + 1],
        _ => w[r],
    });
    let y1 = DVector::from_fn(rows, |r, _| w[r + 2]);
    let beta1 = least_squares(x1, y1)?;

    let mut shocks = vec![0.0; n];
    for t in 2..n {
        let fitted = beta1[0] + beta1[1] * w[t - 1] + beta1[2] * w[t - 2];
        shocks[t] = w[t] - fitted;
    }

    // Stage 2: regress on the lagged series and lagged shock proxy.
    let rows = n - 3;
    let x2 = DMatrix::from_fn(rows, 3, |r, c| match c {
        0 => 1.0,
        1 => w[r + 2],
        _ => shocks[r + 2],
    });
    let y2 = DVector::from_fn(rows, |r, _| w[r + 3]);
    let beta2 = least_squares(x2, y2)?;

    Some([
        beta2[0],
        beta2[1].clamp(-0.95, 0.95),
        beta2[2].clamp(-0.95, 0.95),
    ])
}

fn least_squares(x: DMatrix<f64>, y: DVector<f64>) -> Option<DVector<f64>> {
    x.svd(true, true).solve(&y, 1e-12).ok()
}

/// Moment-based starting values: sample mean and lag-1 autocorrelation.
fn moment_start(w: &[f64]) -> [f64; 3] {
    let n = w.len() as f64;
    let mean = w.iter().sum::<f64>() / n;
    let var: f64 = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let ar = if var < 1e-12 {
        0.0
    } else {
        let cov: f64 = w
            .windows(2)
            .map(|p| (p[0] - mean) * (p[1] - mean))
            .sum::<f64>()
            / n;
        (cov / var).clamp(-0.9, 0.9)
    };

    // The intercept start is chosen so the implied process mean matches the
    // sample mean.
    [mean * (1.0 - ar), ar, 0.0]
}
