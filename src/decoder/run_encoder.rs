//! Reconstruction of the bit lattice of a line from mark positions
use crate::error::{DecodeError, Result};
use crate::models::{BinaryRun, Point};

/// Samples a line of mark centers onto a grid of `unit_width` pixel cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunEncoder {
    unit_width: f64,
    max_zero_run: usize,
}

impl RunEncoder {
    /// Create an encoder for one block's grid
    pub fn new(unit_width: f64, max_zero_run: usize) -> Result<Self> {
        if !(unit_width.is_finite() && unit_width > 0.0) {
            return Err(DecodeError::InsufficientData("unit width must be positive"));
        }
        Ok(Self {
            unit_width,
            max_zero_run,
        })
    }

    /// Grid cell width in pixels
    pub fn unit_width(&self) -> f64 {
        self.unit_width
    }

    /// Encode one line.
    ///
    /// The line is re-sorted by x. Between two neighbouring marks
    /// `floor(dx / unit) - 1` empty cells are emitted, capped at `max_zero_run`,
    /// so directly adjacent marks produce no zero.
    pub fn encode(&self, line: &[Point]) -> Result<BinaryRun> {
        if line.is_empty() {
            return Err(DecodeError::InsufficientData("line has no centers"));
        }

        let mut xs: Vec<f64> = line.iter().map(|p| p.x).collect();
        xs.sort_by(f64::total_cmp);

        let mut run = BinaryRun::anchor();
        for pair in xs.windows(2) {
            let gap_cells = ((pair[1] - pair[0]) / self.unit_width).floor() as i64 - 1;
            if gap_cells > 0 {
                let cells = usize::try_from(gap_cells).unwrap_or(usize::MAX);
                run.push_gap(cells.min(self.max_zero_run));
            }
            run.push_mark();
        }
        Ok(run)
    }
}
