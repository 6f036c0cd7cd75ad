//! PNG encoding for RGBA image data.
//!
//! Two encoding modes:
//! - **Indexed PNG (color type 3)** when the image has at most 256 unique
//!   colors. Smaller files, faster deflate.
//! - **RGBA PNG (color type 6)** as the fallback for anything richer.
//!
//! `create_png_auto` picks the mode; maps and charts rendered from a color
//! ramp almost always take the indexed path.

use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;

use crate::error::{RenderError, RenderResult};

/// Maximum palette entries for an indexed PNG.
const MAX_PALETTE_SIZE: usize = 256;

/// Below this many pixels the parallel index-mapping pass is not worth it.
const PARALLEL_THRESHOLD: usize = 4096;

/// Create a PNG with automatic format selection.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    match extract_palette(pixels) {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png(pixels, width, height),
    }
}

/// Pack RGBA bytes into a u32 for hashing and comparison.
#[inline(always)]
fn pack_color(pixel: &[u8]) -> u32 {
    (pixel[0] as u32)
        | ((pixel[1] as u32) << 8)
        | ((pixel[2] as u32) << 16)
        | ((pixel[3] as u32) << 24)
}

#[inline(always)]
fn unpack_color(packed: u32) -> (u8, u8, u8, u8) {
    (
        packed as u8,
        (packed >> 8) as u8,
        (packed >> 16) as u8,
        (packed >> 24) as u8,
    )
}

/// Try to express the image as a palette plus per-pixel indices.
///
/// Returns `None` as soon as a 257th unique color shows up. The palette
/// walk is sequential (it exits early); the index-mapping pass runs on
/// rayon for larger images.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<(u8, u8, u8, u8)>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<(u8, u8, u8, u8)> = Vec::with_capacity(MAX_PALETTE_SIZE);

    for pixel in pixels.chunks_exact(4) {
        let packed = pack_color(pixel);
        if !color_to_index.contains_key(&packed) {
            if palette.len() >= MAX_PALETTE_SIZE {
                return None;
            }
            color_to_index.insert(packed, palette.len() as u8);
            palette.push(unpack_color(packed));
        }
    }

    let num_pixels = pixels.len() / 4;
    let indices: Vec<u8> = if num_pixels >= PARALLEL_THRESHOLD {
        pixels
            .par_chunks_exact(4)
            .map(|pixel| color_to_index[&pack_color(pixel)])
            .collect()
    } else {
        pixels
            .chunks_exact(4)
            .map(|pixel| color_to_index[&pack_color(pixel)])
            .collect()
    };

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from a palette and indices.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[(u8, u8, u8, u8)],
    indices: &[u8],
) -> RenderResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage);
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr_payload(width, height, 3));

    // PLTE: RGB triples
    let mut plte = Vec::with_capacity(palette.len() * 3);
    for (r, g, b, _) in palette {
        plte.extend_from_slice(&[*r, *g, *b]);
    }
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS: per-entry alpha, only when some entry is not fully opaque
    if palette.iter().any(|(_, _, _, a)| *a < 255) {
        let trns: Vec<u8> = palette.iter().map(|(_, _, _, a)| *a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height, 1)
        .map_err(|e| RenderError::PngEncode(format!("IDAT compression failed: {e}")))?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create an RGBA PNG (color type 6).
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage);
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr_payload(width, height, 6));

    let idat = deflate_scanlines(pixels, width, height, 4)
        .map_err(|e| RenderError::PngEncode(format!("IDAT compression failed: {e}")))?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

fn ihdr_payload(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    ihdr
}

/// Prefix each scanline with filter type 0 and deflate the result.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> std::io::Result<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    let mut raw = Vec::with_capacity(height * (1 + stride));
    for y in 0..height {
        raw.push(0); // filter type: none
        raw.extend_from_slice(&data[y * stride..(y + 1) * stride]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&raw)?;
    encoder.finish()
}

/// Write one PNG chunk: length, type, data, CRC over type + data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
