//! Unit grid width estimation
use crate::error::{DecodeError, Result};
use crate::models::Point;

/// Smallest strictly positive x step between neighbouring sorted centers.
///
/// Zero and negative steps (duplicate centers, or the jump back to the start
/// of the next row) are skipped.
pub fn unit_width(sorted: &[Point]) -> Result<f64> {
    sorted
        .windows(2)
        .map(|pair| pair[1].x - pair[0].x)
        .filter(|&dx| dx > 0.0)
        .min_by(f64::total_cmp)
        .ok_or(DecodeError::InsufficientData(
            "block has no two centers with distinct x",
        ))
}
