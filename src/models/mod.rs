/// Validated '0'/'1' cell strings
pub mod binary_run;
/// Mark centers
pub mod point;
/// Contour polygons and their bounding boxes
pub mod region;

pub use binary_run::BinaryRun;
pub use point::Point;
pub use region::{BoundingBox, Region};
