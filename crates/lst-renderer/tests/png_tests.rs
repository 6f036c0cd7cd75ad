//! Tests for the PNG encoder.

use lst_renderer::png::{create_png, create_png_auto};

fn ihdr_dims(png: &[u8]) -> (u32, u32) {
    // 8-byte signature, 4-byte length, 4-byte "IHDR", then width/height.
    let w = u32::from_be_bytes(png[16..20].try_into().unwrap());
    let h = u32::from_be_bytes(png[20..24].try_into().unwrap());
    (w, h)
}

/// Walk the chunk structure, so compressed IDAT bytes can't false-match.
fn has_chunk(png: &[u8], name: &[u8; 4]) -> bool {
    let mut pos = 8;
    while pos + 8 <= png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        if &png[pos + 4..pos + 8] == name {
            return true;
        }
        pos += 12 + len;
    }
    false
}

#[test]
fn rgba_png_has_signature_and_dims() {
    let pixels = vec![255u8; 4 * 4 * 4];
    let png = create_png(&pixels, 4, 4).unwrap();
    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(ihdr_dims(&png), (4, 4));
    assert!(has_chunk(&png, b"IEND"));
}

#[test]
fn few_colors_take_the_indexed_path() {
    // Two colors across 64x64 pixels
    let mut pixels = Vec::with_capacity(64 * 64 * 4);
    for i in 0..64 * 64 {
        if i % 2 == 0 {
            pixels.extend_from_slice(&[255, 0, 0, 255]);
        } else {
            pixels.extend_from_slice(&[0, 0, 255, 255]);
        }
    }
    let png = create_png_auto(&pixels, 64, 64).unwrap();
    assert!(has_chunk(&png, b"PLTE"), "expected an indexed PNG");
    // Color type byte is the 10th byte of the IHDR payload
    assert_eq!(png[25], 3);
}

#[test]
fn transparent_palette_entries_emit_trns() {
    let mut pixels = Vec::new();
    for i in 0..16 {
        if i % 2 == 0 {
            pixels.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            pixels.extend_from_slice(&[10, 20, 30, 255]);
        }
    }
    let png = create_png_auto(&pixels, 4, 4).unwrap();
    assert!(has_chunk(&png, b"PLTE"));
    assert!(has_chunk(&png, b"tRNS"));
}

#[test]
fn many_colors_fall_back_to_rgba() {
    // 1024 unique colors
    let mut pixels = Vec::new();
    for i in 0..1024u32 {
        pixels.extend_from_slice(&[(i % 256) as u8, (i / 256) as u8, 7, 255]);
    }
    let png = create_png_auto(&pixels, 32, 32).unwrap();
    assert!(!has_chunk(&png, b"PLTE"));
    assert_eq!(png[25], 6);
}

#[test]
fn zero_sized_image_is_rejected() {
    assert!(create_png(&[], 0, 0).is_err());
}
