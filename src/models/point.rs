/// 2D point in image pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Row-major ordering key `y * scale + x`.
    ///
    /// Orders points top-to-bottom, then left-to-right, as long as every x is
    /// smaller than `scale + 1`.
    pub fn row_major_key(&self, scale: f64) -> f64 {
        self.y * scale + self.x
    }
}
