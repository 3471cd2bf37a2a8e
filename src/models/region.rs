use super::Point;
use crate::error::{DecodeError, Result};

/// Axis-aligned bounding box of a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Top-left corner
    pub min: Point,
    /// Bottom-right corner
    pub max: Point,
}

impl BoundingBox {
    /// Midpoint of the box, computed as `min + (max - min) / 2` on each axis
    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + (self.max.x - self.min.x) / 2.0,
            self.min.y + (self.max.y - self.min.y) / 2.0,
        )
    }
}

/// Closed outer contour of one candidate mark
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Region {
    points: Vec<Point>,
}

impl Region {
    /// Create a region from its contour points (closing edge implied)
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle with inclusive pixel corners `(x, y)` and `(x + w - 1, y + h - 1)`
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        let right = x + width - 1.0;
        let bottom = y + height - 1.0;
        Self::new(vec![
            Point::new(x, y),
            Point::new(right, y),
            Point::new(right, bottom),
            Point::new(x, bottom),
        ])
    }

    /// Contour points
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of contour points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the contour has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Magnitude of the signed polygon (shoelace) area
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0;
        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            twice_area += p.x * q.y - q.x * p.y;
        }
        (twice_area * 0.5).abs()
    }

    /// Bounding box over all contour points, `None` for an empty region
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = *self.points.first()?;
        let init = BoundingBox {
            min: first,
            max: first,
        };
        Some(self.points.iter().fold(init, |bbox, p| BoundingBox {
            min: Point::new(bbox.min.x.min(p.x), bbox.min.y.min(p.y)),
            max: Point::new(bbox.max.x.max(p.x), bbox.max.y.max(p.y)),
        }))
    }

    /// Bounding-box center of the region (not the area centroid)
    pub fn center(&self) -> Result<Point> {
        self.bounding_box()
            .map(|bbox| bbox.center())
            .ok_or(DecodeError::InsufficientData("region has no contour points"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_area() {
        // Contour runs through pixel centers, so a 10x10 block spans 9x9
        let region = Region::rectangle(5.0, 5.0, 10.0, 10.0);
        assert_eq!(region.area(), 81.0);
    }

    #[test]
    fn test_area_ignores_orientation() {
        let clockwise = Region::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        let mut reversed = clockwise.points().to_vec();
        reversed.reverse();
        assert_eq!(clockwise.area(), 8.0);
        assert_eq!(Region::new(reversed).area(), 8.0);
    }

    #[test]
    fn test_center_is_bounding_box_midpoint() {
        // Centroid of this triangle is (2, 1); the box midpoint is (3, 1.5)
        let region = Region::new(vec![
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(0.0, 3.0),
        ]);
        let center = region.center().unwrap();
        assert_eq!(center, Point::new(3.0, 1.5));
    }

    #[test]
    fn test_center_of_empty_region_fails() {
        let err = Region::default().center().unwrap_err();
        assert!(matches!(err, DecodeError::InsufficientData(_)));
    }

    #[test]
    fn test_degenerate_contours_have_zero_area() {
        assert_eq!(Region::new(vec![Point::new(1.0, 1.0)]).area(), 0.0);
        assert_eq!(
            Region::new(vec![Point::new(1.0, 1.0), Point::new(3.0, 1.0)]).area(),
            0.0
        );
    }
}
