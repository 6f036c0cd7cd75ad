//! Forecast chart rendering: historical and forecast series with markers,
//! gridlines, axis labels and a legend.

use tracing::debug;

use crate::canvas::Canvas;
use crate::error::{RenderError, RenderResult};
use crate::glyphs::{self, format_value};
use crate::gradient::Color;
use crate::RenderedImage;

/// Default chart size, a 10x6 inch figure at 100 dpi.
pub const CHART_WIDTH: usize = 1000;
pub const CHART_HEIGHT: usize = 600;

const MARGIN_LEFT: usize = 90;
const MARGIN_RIGHT: usize = 30;
const MARGIN_TOP: usize = 50;
const MARGIN_BOTTOM: usize = 70;

const MARKER_RADIUS: i64 = 3;
const DASH_ON: usize = 6;
const DASH_OFF: usize = 4;

const BACKGROUND: Color = Color::WHITE;
const GRID_COLOR: Color = Color::opaque(225, 225, 225);
const AXIS_COLOR: Color = Color::opaque(60, 60, 60);
const TEXT_COLOR: Color = Color::opaque(40, 40, 40);
/// Series colors matching the conventional first two plotting cycle hues.
const HISTORICAL_COLOR: Color = Color::opaque(31, 119, 180);
const FORECAST_COLOR: Color = Color::opaque(255, 127, 14);

/// Axis and title text for the chart.
#[derive(Debug, Clone)]
pub struct ChartLabels<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub historical_legend: &'a str,
    pub forecast_legend: &'a str,
}

impl Default for ChartLabels<'_> {
    fn default() -> Self {
        Self {
            title: "Mean LST Forecast (ARIMA)",
            x_label: "Year",
            y_label: "Mean Land Surface Temperature",
            historical_legend: "Historical",
            forecast_legend: "ARIMA Forecast",
        }
    }
}

/// Render the historical series and its forecast continuation.
///
/// The historical series is a solid polyline with circle markers, the
/// forecast a dashed polyline with X markers.
pub fn render_forecast_chart(
    historical: &[(i32, f64)],
    forecast: &[(i32, f64)],
    labels: &ChartLabels<'_>,
    width: usize,
    height: usize,
) -> RenderResult<RenderedImage> {
    if historical.is_empty() || width < 200 || height < 150 {
        return Err(RenderError::EmptyImage);
    }

    let all_points = historical.iter().chain(forecast.iter());
    let (mut x_min, mut x_max) = (i32::MAX, i32::MIN);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(year, value) in all_points {
        x_min = x_min.min(year);
        x_max = x_max.max(year);
        y_min = y_min.min(value);
        y_max = y_max.max(value);
    }

    // Pad the value range so lines stay off the plot border.
    let y_span = y_max - y_min;
    let pad = if y_span.abs() < 1e-9 { 1.0 } else { y_span * 0.08 };
    let (y_min, y_max) = (y_min - pad, y_max + pad);

    debug!(
        historical = historical.len(),
        forecast = forecast.len(),
        x_min,
        x_max,
        "rendering forecast chart"
    );

    let mut canvas = Canvas::new(width, height, BACKGROUND);

    let plot_x0 = MARGIN_LEFT as i64;
    let plot_x1 = (width - MARGIN_RIGHT) as i64;
    let plot_y0 = MARGIN_TOP as i64;
    let plot_y1 = (height - MARGIN_BOTTOM) as i64;

    let to_px = |year: i32| -> i64 {
        if x_max == x_min {
            (plot_x0 + plot_x1) / 2
        } else {
            let t = (year - x_min) as f64 / (x_max - x_min) as f64;
            plot_x0 + (t * (plot_x1 - plot_x0) as f64).round() as i64
        }
    };
    let to_py = |value: f64| -> i64 {
        let t = (value - y_min) / (y_max - y_min);
        plot_y1 - (t * (plot_y1 - plot_y0) as f64).round() as i64
    };

    // Horizontal gridlines and y tick labels.
    let y_step = nice_step((y_max - y_min) / 5.0);
    let mut tick = (y_min / y_step).ceil() * y_step;
    while tick <= y_max {
        let py = to_py(tick);
        canvas.draw_line(plot_x0, py, plot_x1, py, GRID_COLOR);
        let label = format_value(tick);
        canvas.draw_text(
            plot_x0 - 8 - glyphs::text_width(&label, 1) as i64,
            py - (glyphs::GLYPH_HEIGHT / 2) as i64,
            &label,
            TEXT_COLOR,
        );
        tick += y_step;
    }

    // Vertical gridlines and year tick labels.
    let x_step = year_step(x_max - x_min);
    let mut year = x_min - x_min.rem_euclid(x_step);
    if year < x_min {
        year += x_step;
    }
    while year <= x_max {
        let px = to_px(year);
        canvas.draw_line(px, plot_y0, px, plot_y1, GRID_COLOR);
        let label = year.to_string();
        canvas.draw_text(
            px - (glyphs::text_width(&label, 1) / 2) as i64,
            plot_y1 + 8,
            &label,
            TEXT_COLOR,
        );
        year += x_step;
    }

    // Axes on top of the grid.
    canvas.draw_line(plot_x0, plot_y0, plot_x0, plot_y1, AXIS_COLOR);
    canvas.draw_line(plot_x0, plot_y1, plot_x1, plot_y1, AXIS_COLOR);

    // Series.
    draw_series(&mut canvas, historical, &to_px, &to_py, HISTORICAL_COLOR, false);
    draw_series(&mut canvas, forecast, &to_px, &to_py, FORECAST_COLOR, true);

    // Title and axis labels.
    let title_x = (width as i64 - glyphs::text_width(labels.title, 2) as i64) / 2;
    canvas.draw_text_scaled(title_x.max(0), 16, labels.title, 2, TEXT_COLOR);

    let x_label_x = (plot_x0 + plot_x1 - glyphs::text_width(labels.x_label, 1) as i64) / 2;
    canvas.draw_text(
        x_label_x,
        height as i64 - (glyphs::GLYPH_HEIGHT + 12) as i64,
        labels.x_label,
        TEXT_COLOR,
    );

    let y_label_len = glyphs::text_width(labels.y_label, 1) as i64;
    let y_label_y = (plot_y0 + plot_y1 - y_label_len) / 2;
    canvas.draw_text_vertical(12, y_label_y.max(0), labels.y_label, TEXT_COLOR);

    draw_legend(&mut canvas, plot_x1, plot_y0, labels);

    Ok(RenderedImage {
        pixels: canvas.into_pixels(),
        width,
        height,
    })
}

fn draw_series(
    canvas: &mut Canvas,
    points: &[(i32, f64)],
    to_px: &dyn Fn(i32) -> i64,
    to_py: &dyn Fn(f64) -> i64,
    color: Color,
    dashed: bool,
) {
    for pair in points.windows(2) {
        let (x0, y0) = (to_px(pair[0].0), to_py(pair[0].1));
        let (x1, y1) = (to_px(pair[1].0), to_py(pair[1].1));
        if dashed {
            canvas.draw_dashed_line(x0, y0, x1, y1, DASH_ON, DASH_OFF, color);
        } else {
            canvas.draw_line(x0, y0, x1, y1, color);
        }
    }
    for &(year, value) in points {
        let (px, py) = (to_px(year), to_py(value));
        if dashed {
            canvas.draw_cross(px, py, MARKER_RADIUS, color);
        } else {
            canvas.draw_circle(px, py, MARKER_RADIUS, color);
        }
    }
}

fn draw_legend(canvas: &mut Canvas, plot_x1: i64, plot_y0: i64, labels: &ChartLabels<'_>) {
    let text_w = glyphs::text_width(labels.historical_legend, 1)
        .max(glyphs::text_width(labels.forecast_legend, 1)) as i64;
    let box_w = 34 + text_w + 10;
    let box_h = 38;
    let x = plot_x1 - box_w - 10;
    let y = plot_y0 + 10;

    canvas.fill_rect(x, y, box_w as usize, box_h as usize, Color::WHITE);
    let (x1, y1) = (x + box_w - 1, y + box_h - 1);
    canvas.draw_line(x, y, x1, y, AXIS_COLOR);
    canvas.draw_line(x, y1, x1, y1, AXIS_COLOR);
    canvas.draw_line(x, y, x, y1, AXIS_COLOR);
    canvas.draw_line(x1, y, x1, y1, AXIS_COLOR);

    // Historical row: solid line sample with a circle marker.
    let row1 = y + 11;
    canvas.draw_line(x + 6, row1, x + 28, row1, HISTORICAL_COLOR);
    canvas.draw_circle(x + 17, row1, 2, HISTORICAL_COLOR);
    canvas.draw_text(
        x + 34,
        row1 - (glyphs::GLYPH_HEIGHT / 2) as i64,
        labels.historical_legend,
        TEXT_COLOR,
    );

    // Forecast row: dashed line sample with an X marker.
    let row2 = y + 27;
    canvas.draw_dashed_line(x + 6, row2, x + 28, row2, DASH_ON, DASH_OFF, FORECAST_COLOR);
    canvas.draw_cross(x + 17, row2, 2, FORECAST_COLOR);
    canvas.draw_text(
        x + 34,
        row2 - (glyphs::GLYPH_HEIGHT / 2) as i64,
        labels.forecast_legend,
        TEXT_COLOR,
    );
}

/// Round a raw step up to a 1/2/5 x 10^k value.
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let exponent = raw.log10().floor();
    let base = 10f64.powf(exponent);
    let fraction = raw / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Integer year step targeting at most ~10 x-axis ticks.
fn year_step(span: i32) -> i32 {
    match span {
        ..=10 => 1,
        11..=20 => 2,
        21..=50 => 5,
        51..=100 => 10,
        _ => (nice_step(span as f64 / 10.0) as i32).max(1),
    }
}
