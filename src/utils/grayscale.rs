//! RGB to luminance conversion
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8

use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32) >> 8;
    lum.min(255) as u8
}

/// Convert packed RGB (3 bytes per pixel) to grayscale, one row per rayon task
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    if pixel_count == 0 {
        return Vec::new();
    }
    let mut gray = vec![0u8; pixel_count];

    gray.par_chunks_mut(width)
        .zip(rgb.par_chunks(width * 3))
        .for_each(|(row, src)| {
            for (out, px) in row.iter_mut().zip(src.chunks_exact(3)) {
                *out = luma(px[0], px[1], px[2]);
            }
        });

    gray
}
