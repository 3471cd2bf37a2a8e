use crate::decoder::config::ImagingConfig;
use crate::error::{DecodeError, Result};
use crate::models::{Point, Region};
use crate::utils::binarization::otsu_binarize;
use crate::utils::grayscale::rgb_to_grayscale;
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate, erode};
use imageproc::point::Point as PixelPoint;

/// Anything that turns encoded image bytes into mark regions.
///
/// Implementations must return the regions sorted ascending by area; the
/// clusterer relies on that order.
pub trait RegionSource {
    /// Extract area-sorted regions from encoded image bytes
    fn regions(&self, image_bytes: &[u8]) -> Result<Vec<Region>>;
}

/// Default region source: grayscale, Otsu threshold, erosion, dilation,
/// then one outer contour per top-level mark
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContourExtractor {
    config: ImagingConfig,
}

impl ContourExtractor {
    /// Create an extractor with explicit settings
    pub fn new(config: ImagingConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> &ImagingConfig {
        &self.config
    }

    /// 0/255 mark mask of a grayscale image after the morphological cleanup.
    ///
    /// Both kernels are squares (L-infinity balls) of side `2r + 1`.
    pub fn mark_mask(&self, gray: &GrayImage) -> GrayImage {
        let binary = otsu_binarize(gray, self.config.polarity);
        let eroded = erode(&binary, Norm::LInf, self.config.erode_radius);
        dilate(&eroded, Norm::LInf, self.config.dilate_radius)
    }

    /// Area-sorted regions of a grayscale image
    pub fn regions_from_gray(&self, gray: &GrayImage) -> Vec<Region> {
        let mask = self.mark_mask(gray);
        let mut regions = outer_contours(&mask);
        sort_by_area(&mut regions);
        log::debug!(
            "extracted {} regions from {}x{} image ({} mark pixels)",
            regions.len(),
            gray.width(),
            gray.height(),
            mask.pixels().filter(|p| p[0] > 0).count()
        );
        regions
    }
}

impl RegionSource for ContourExtractor {
    fn regions(&self, image_bytes: &[u8]) -> Result<Vec<Region>> {
        if image_bytes.is_empty() {
            return Err(DecodeError::EmptyInput);
        }
        let rgb = image::load_from_memory(image_bytes)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let luma = rgb_to_grayscale(rgb.as_raw(), width as usize, height as usize);
        let gray = GrayImage::from_raw(width, height, luma)
            .ok_or(DecodeError::InsufficientData("grayscale buffer does not cover the image"))?;
        Ok(self.regions_from_gray(&gray))
    }
}

/// Stable ascending sort by polygon area
pub fn sort_by_area(regions: &mut [Region]) {
    regions.sort_by(|a, b| a.area().total_cmp(&b.area()));
}

/// Outer borders of the top-level marks.
///
/// Borders are found with Suzuki-Abe following; hole borders and anything
/// nested inside a hole are dropped. Straight runs are reduced to their end
/// points, which keeps both the bounding box and the polygon area.
pub fn outer_contours(mask: &GrayImage) -> Vec<Region> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
        .map(|contour| {
            Region::new(
                compress_straight_runs(&contour.points)
                    .into_iter()
                    .map(|p| Point::new(p.x as f64, p.y as f64))
                    .collect(),
            )
        })
        .collect()
}

/// Drop border points that continue the direction of the previous step
fn compress_straight_runs(border: &[PixelPoint<i32>]) -> Vec<PixelPoint<i32>> {
    let n = border.len();
    if n < 3 {
        return border.to_vec();
    }
    let heading = |a: PixelPoint<i32>, b: PixelPoint<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());
    (0..n)
        .filter(|&i| {
            let prev = border[(i + n - 1) % n];
            let cur = border[i];
            let next = border[(i + 1) % n];
            heading(prev, cur) != heading(cur, next)
        })
        .map(|i| border[i])
        .collect()
}
