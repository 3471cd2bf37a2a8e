//! Image processing ahead of contour extraction
//!
//! - Grayscale conversion (RGB to luminance)
//! - Binarization (Otsu's method and fixed threshold)

/// Otsu and fixed-threshold mark masks
pub mod binarization;
/// RGB to luminance conversion
pub mod grayscale;
