//! Grouping of block centers into horizontal lines
use crate::error::{DecodeError, Result};
use crate::models::Point;

/// Centers of one row of marks
pub type Line = Vec<Point>;

/// Sort centers top-to-bottom, then left-to-right, by `y * scale + x`
pub fn sort_row_major(centers: &mut [Point], scale: f64) {
    centers.sort_by(|a, b| a.row_major_key(scale).total_cmp(&b.row_major_key(scale)));
}

/// Split row-major sorted centers into lines.
///
/// A line is anchored at the y of the center that opened it. A center joins
/// the open line while `|anchor - y| < tolerance_percent% * anchor`; otherwise
/// it opens the next line and becomes the new anchor.
pub fn group_lines(sorted: &[Point], tolerance_percent: f64) -> Result<Vec<Line>> {
    let Some(first) = sorted.first() else {
        return Err(DecodeError::InsufficientData("no centers to group into lines"));
    };

    let fraction = tolerance_percent / 100.0;
    let mut lines = Vec::new();
    let mut current: Line = Vec::new();
    let mut line_y = first.y;
    let mut threshold = fraction * line_y;

    for &center in sorted {
        if current.is_empty() || (line_y - center.y).abs() < threshold {
            current.push(center);
        } else {
            lines.push(std::mem::take(&mut current));
            line_y = center.y;
            threshold = fraction * line_y;
            current.push(center);
        }
    }
    lines.push(current);

    Ok(lines)
}
