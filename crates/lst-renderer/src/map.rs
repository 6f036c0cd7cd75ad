//! Yearly LST map rendering: gradient raster, color bar and title.

use lst_common::RasterField;
use tracing::debug;

use crate::canvas::Canvas;
use crate::error::{RenderError, RenderResult};
use crate::glyphs::{self, format_value};
use crate::gradient::{self, Color};
use crate::style::StyleDefinition;
use crate::RenderedImage;

/// Grids narrower than this are scaled up for display.
const MIN_DISPLAY_WIDTH: usize = 800;

const MARGIN_LEFT: usize = 60;
const MARGIN_RIGHT: usize = 20;
const MARGIN_TOP: usize = 40;
/// Room below the map for longitude labels and the color bar.
const MARGIN_BOTTOM: usize = 80;

const COLOR_BAR_HEIGHT: usize = 14;

const AXIS_COLOR: Color = Color::opaque(80, 80, 80);
const TEXT_COLOR: Color = Color::opaque(40, 40, 40);

/// Render one year's field as a gradient map with a title and color bar.
pub fn render_map(
    field: &RasterField,
    style: &StyleDefinition,
    title: &str,
) -> RenderResult<RenderedImage> {
    if field.width == 0 || field.height == 0 {
        return Err(RenderError::EmptyImage);
    }

    let gradient = style.to_gradient()?;
    // An all-fill field still renders (as blank cells); the 0..1 range is
    // only a placeholder for the color bar.
    let (min_val, max_val) = field.finite_min_max().unwrap_or((0.0, 1.0));

    // Scale small grids up to a readable size, preserving aspect ratio.
    let (map_w, map_h) = if field.width < MIN_DISPLAY_WIDTH {
        let w = MIN_DISPLAY_WIDTH;
        let h = (field.height * w).div_ceil(field.width);
        (w, h)
    } else {
        (field.width, field.height)
    };

    debug!(
        grid_w = field.width,
        grid_h = field.height,
        map_w,
        map_h,
        min_val,
        max_val,
        "rendering LST map"
    );

    let width = MARGIN_LEFT + map_w + MARGIN_RIGHT;
    let height = MARGIN_TOP + map_h + MARGIN_BOTTOM;
    let mut canvas = Canvas::new(width, height, Color::WHITE);

    // Title, centered over the map.
    let title_x = (width as i64 - glyphs::text_width(title, 2) as i64) / 2;
    canvas.draw_text_scaled(title_x.max(0), 12, title, 2, TEXT_COLOR);

    // Raster.
    let display = gradient::resample_nearest(&field.data, field.width, field.height, map_w, map_h);
    let pixels = gradient::rasterize(&display, map_w, map_h, min_val, max_val, &gradient);
    let (map_x, map_y) = (MARGIN_LEFT as i64, MARGIN_TOP as i64);
    canvas.blit(map_x, map_y, &pixels, map_w, map_h);

    // Frame.
    let (x1, y1) = (map_x + map_w as i64 - 1, map_y + map_h as i64 - 1);
    canvas.draw_line(map_x, map_y, x1, map_y, AXIS_COLOR);
    canvas.draw_line(map_x, y1, x1, y1, AXIS_COLOR);
    canvas.draw_line(map_x, map_y, map_x, y1, AXIS_COLOR);
    canvas.draw_line(x1, map_y, x1, y1, AXIS_COLOR);

    // Geographic annotations when the file carried coordinates. Latitude
    // arrays usually run north to south, so the top edge is max_y.
    if let Some(bounds) = field.bounds {
        let lat_top = format_value(bounds.max_y);
        let lat_bottom = format_value(bounds.min_y);
        canvas.draw_text(
            map_x - 4 - glyphs::text_width(&lat_top, 1) as i64,
            map_y,
            &lat_top,
            TEXT_COLOR,
        );
        canvas.draw_text(
            map_x - 4 - glyphs::text_width(&lat_bottom, 1) as i64,
            y1 - glyphs::GLYPH_HEIGHT as i64,
            &lat_bottom,
            TEXT_COLOR,
        );

        let lon_left = format_value(bounds.min_x);
        let lon_right = format_value(bounds.max_x);
        canvas.draw_text(map_x, y1 + 4, &lon_left, TEXT_COLOR);
        canvas.draw_text(
            x1 - glyphs::text_width(&lon_right, 1) as i64,
            y1 + 4,
            &lon_right,
            TEXT_COLOR,
        );
    }

    // The file's own units attribute wins over the style's.
    let units = field
        .units
        .as_deref()
        .or(style.units.as_deref())
        .unwrap_or("");
    draw_color_bar(
        &mut canvas,
        map_x,
        y1 + 18,
        map_w,
        min_val,
        max_val,
        units,
        &gradient,
    );

    Ok(RenderedImage {
        pixels: canvas.into_pixels(),
        width,
        height,
    })
}

#[allow(clippy::too_many_arguments)]
fn draw_color_bar(
    canvas: &mut Canvas,
    x: i64,
    y: i64,
    bar_width: usize,
    min_val: f32,
    max_val: f32,
    units: &str,
    gradient: &gradient::Gradient,
) {
    for dx in 0..bar_width {
        let t = dx as f32 / (bar_width.saturating_sub(1)).max(1) as f32;
        let color = gradient.color_at(t);
        for dy in 0..COLOR_BAR_HEIGHT {
            canvas.set(x + dx as i64, y + dy as i64, color);
        }
    }

    let label_y = y + COLOR_BAR_HEIGHT as i64 + 4;
    let low = if units.is_empty() {
        format_value(min_val as f64)
    } else {
        format!("{} {units}", format_value(min_val as f64))
    };
    let mid = format_value((min_val as f64 + max_val as f64) / 2.0);
    let high = if units.is_empty() {
        format_value(max_val as f64)
    } else {
        format!("{} {units}", format_value(max_val as f64))
    };

    canvas.draw_text(x, label_y, &low, TEXT_COLOR);
    canvas.draw_text(
        x + (bar_width as i64 - glyphs::text_width(&mid, 1) as i64) / 2,
        label_y,
        &mid,
        TEXT_COLOR,
    );
    canvas.draw_text(
        x + bar_width as i64 - glyphs::text_width(&high, 1) as i64,
        label_y,
        &high,
        TEXT_COLOR,
    );
}
