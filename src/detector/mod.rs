//! Geometric half of the pipeline
//!
//! This module contains the logic that turns an image into mark geometry:
//! - Outer contour extraction (the default region source)
//! - Area clustering of regions into code blocks
//! - Row grouping of mark centers
//! - Unit grid width estimation

/// Area-similarity clustering and block-size filtering
pub mod clustering;
/// Morphology, outer contours and the `RegionSource` seam
pub mod contour;
/// Grouping of centers into horizontal lines
pub mod lines;
/// Minimal positive horizontal gap between centers
pub mod spacing;
