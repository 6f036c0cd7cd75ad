//! An RGBA drawing surface with the primitives the map and chart need.

use crate::glyphs::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::gradient::Color;

/// A mutable RGBA pixel buffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let mut pixels = vec![0u8; width * height * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[0] = background.r;
            chunk[1] = background.g;
            chunk[2] = background.b;
            chunk[3] = background.a;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Set one pixel; coordinates outside the canvas are clipped.
    pub fn set(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }

    /// Read one pixel, or `None` outside the canvas.
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        Some(Color::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: usize, h: usize, color: Color) {
        for dy in 0..h as i64 {
            for dx in 0..w as i64 {
                self.set(x + dx, y + dy, color);
            }
        }
    }

    /// Blit RGBA pixel data at (x, y). Fully transparent source pixels are
    /// skipped so the canvas background shows through.
    pub fn blit(&mut self, x: i64, y: i64, src: &[u8], src_width: usize, src_height: usize) {
        for sy in 0..src_height {
            for sx in 0..src_width {
                let idx = (sy * src_width + sx) * 4;
                let a = src[idx + 3];
                if a == 0 {
                    continue;
                }
                self.set(
                    x + sx as i64,
                    y + sy as i64,
                    Color::new(src[idx], src[idx + 1], src[idx + 2], a),
                );
            }
        }
    }

    /// Bresenham line.
    pub fn draw_line(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Dashed line: `on` pixels drawn, `off` pixels skipped, repeating.
    pub fn draw_dashed_line(
        &mut self,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        on: usize,
        off: usize,
        color: Color,
    ) {
        let period = (on + off).max(1);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        let mut step = 0usize;

        loop {
            if step % period < on {
                self.set(x, y, color);
            }
            if x == x1 && y == y1 {
                break;
            }
            step += 1;
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled circle marker.
    pub fn draw_circle(&mut self, cx: i64, cy: i64, radius: i64, color: Color) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.set(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// X-shaped marker.
    pub fn draw_cross(&mut self, cx: i64, cy: i64, radius: i64, color: Color) {
        self.draw_line(cx - radius, cy - radius, cx + radius, cy + radius, color);
        self.draw_line(cx - radius, cy + radius, cx + radius, cy - radius, color);
    }

    /// Draw text with its top-left corner at (x, y).
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, 1, color);
    }

    /// Draw text at an integer scale factor.
    pub fn draw_text_scaled(&mut self, x: i64, y: i64, text: &str, scale: usize, color: Color) {
        let scale = scale.max(1) as i64;
        let mut pen_x = x;
        for c in text.chars() {
            if let Some(columns) = glyphs::glyph(c) {
                for (col, bits) in columns.iter().enumerate() {
                    for row in 0..GLYPH_HEIGHT {
                        if bits >> row & 1 == 1 {
                            self.fill_scaled(
                                pen_x + col as i64 * scale,
                                y + row as i64 * scale,
                                scale,
                                color,
                            );
                        }
                    }
                }
            }
            pen_x += (GLYPH_WIDTH as i64 + 1) * scale;
        }
    }

    /// Draw text rotated 90 degrees counter-clockwise (reading bottom to
    /// top), with (x, y) the top-left of the rotated block.
    pub fn draw_text_vertical(&mut self, x: i64, y: i64, text: &str, color: Color) {
        let mut pen_y = y + glyphs::text_width(text, 1) as i64;
        for c in text.chars() {
            if let Some(columns) = glyphs::glyph(c) {
                for (col, bits) in columns.iter().enumerate() {
                    for row in 0..GLYPH_HEIGHT {
                        if bits >> row & 1 == 1 {
                            // (col, row) in glyph space maps to a quarter
                            // turn: columns run upward, rows run right.
                            self.set(x + row as i64, pen_y - col as i64, color);
                        }
                    }
                }
            }
            pen_y -= GLYPH_WIDTH as i64 + 1;
        }
    }

    fn fill_scaled(&mut self, x: i64, y: i64, scale: i64, color: Color) {
        for dy in 0..scale {
            for dx in 0..scale {
                self.set(x + dx, y + dy, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_background_filled() {
        let canvas = Canvas::new(3, 2, Color::WHITE);
        assert_eq!(canvas.get(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.get(2, 1), Some(Color::WHITE));
        assert_eq!(canvas.get(3, 0), None);
    }

    #[test]
    fn set_clips_out_of_bounds() {
        let mut canvas = Canvas::new(2, 2, Color::WHITE);
        canvas.set(-1, 0, Color::BLACK);
        canvas.set(5, 5, Color::BLACK);
        assert!(canvas.pixels().chunks_exact(4).all(|p| p[0] == 255));
    }

    #[test]
    fn draw_line_connects_endpoints() {
        let mut canvas = Canvas::new(5, 5, Color::WHITE);
        canvas.draw_line(0, 0, 4, 4, Color::BLACK);
        assert_eq!(canvas.get(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.get(2, 2), Some(Color::BLACK));
        assert_eq!(canvas.get(4, 4), Some(Color::BLACK));
    }

    #[test]
    fn dashed_line_has_gaps() {
        let mut canvas = Canvas::new(20, 1, Color::WHITE);
        canvas.draw_dashed_line(0, 0, 19, 0, 3, 2, Color::BLACK);
        let drawn: usize = (0..20)
            .filter(|&x| canvas.get(x, 0) == Some(Color::BLACK))
            .count();
        assert!(drawn > 0 && drawn < 20, "drawn = {drawn}");
    }

    #[test]
    fn text_marks_pixels() {
        let mut canvas = Canvas::new(20, 10, Color::WHITE);
        canvas.draw_text(0, 0, "10", Color::BLACK);
        let dark: usize = canvas
            .pixels()
            .chunks_exact(4)
            .filter(|p| p[0] == 0)
            .count();
        assert!(dark > 0);
    }

    #[test]
    fn blit_skips_transparent_pixels() {
        let mut canvas = Canvas::new(2, 1, Color::WHITE);
        let src = [0u8, 0, 0, 0, 10, 20, 30, 255];
        canvas.blit(0, 0, &src, 2, 1);
        assert_eq!(canvas.get(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.get(1, 0), Some(Color::opaque(10, 20, 30)));
    }
}
