//! Helpers for building synthetic prints, shared by tests, benches and the CLI

use crate::decoder::config::Polarity;
use crate::error::Result;
use crate::models::{BinaryRun, Region};
use image::{GrayImage, ImageFormat, Luma};
use std::io::Cursor;

/// Shortest run that decodes to `c` on its first matching probe.
///
/// Letters are written behind one implicit leading zero, digits behind two;
/// trailing zeros are implied by the decoder's padding. Returns `None` for
/// characters outside `A-Z`, `a-z` and `0-9`.
pub fn run_for_char(c: char) -> Option<BinaryRun> {
    let skip = match c {
        'A'..='Z' | 'a'..='z' => 1,
        '0'..='9' => 2,
        _ => return None,
    };
    let bits = format!("{:08b}", c as u8);
    bits[skip..].trim_end_matches('0').parse().ok()
}

/// Pixel layout of a synthetic print; one line per run, marks as filled squares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Left edge of cell 0
    pub origin_x: u32,
    /// Top edge of line 0
    pub origin_y: u32,
    /// Cell width in pixels
    pub unit: u32,
    /// Distance between lines in pixels
    pub line_pitch: u32,
    /// Side of a mark in pixels
    pub mark_size: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin_x: 40,
            origin_y: 40,
            unit: 30,
            line_pitch: 40,
            mark_size: 10,
        }
    }
}

impl GridLayout {
    /// Canvas size that fits `runs` with the origin as margin on every side
    pub fn canvas_size(&self, runs: &[BinaryRun]) -> (u32, u32) {
        let cells = runs.iter().map(BinaryRun::len).max().unwrap_or(0) as u32;
        (
            2 * self.origin_x + cells * self.unit,
            2 * self.origin_y + runs.len() as u32 * self.line_pitch,
        )
    }

    /// One square region per mark, line by line
    pub fn regions(&self, runs: &[BinaryRun]) -> Vec<Region> {
        let side = self.mark_size as f64;
        runs.iter()
            .enumerate()
            .flat_map(|(line, run)| {
                let y = (self.origin_y + line as u32 * self.line_pitch) as f64;
                run.mark_cells().into_iter().map(move |cell| {
                    let x = (self.origin_x + cell as u32 * self.unit) as f64;
                    Region::rectangle(x, y, side, side)
                })
            })
            .collect()
    }
}

/// Paint the bounding box of every region onto a fresh canvas
pub fn render_regions(regions: &[Region], width: u32, height: u32, polarity: Polarity) -> GrayImage {
    let (mark, background) = match polarity {
        Polarity::Bright => (255u8, 0u8),
        Polarity::Dark => (0u8, 255u8),
    };
    let mut canvas = GrayImage::from_pixel(width, height, Luma([background]));
    for bbox in regions.iter().filter_map(Region::bounding_box) {
        let x_range = bbox.min.x.max(0.0) as u32..=(bbox.max.x as u32).min(width.saturating_sub(1));
        for y in bbox.min.y.max(0.0) as u32..=(bbox.max.y as u32).min(height.saturating_sub(1)) {
            for x in x_range.clone() {
                canvas.put_pixel(x, y, Luma([mark]));
            }
        }
    }
    canvas
}

/// Encode a grayscale image as PNG bytes
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render `text` as a synthetic print, one character per line.
///
/// Characters without a run are skipped.
pub fn synthesize_print(text: &str, layout: &GridLayout, polarity: Polarity) -> Result<Vec<u8>> {
    let runs: Vec<BinaryRun> = text.chars().filter_map(run_for_char).collect();
    let (width, height) = layout.canvas_size(&runs);
    let canvas = render_regions(&layout.regions(&runs), width, height, polarity);
    encode_png(&canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_for_char() {
        let runs: Vec<String> = "FX10Wz"
            .chars()
            .map(|c| run_for_char(c).unwrap().to_string())
            .collect();
        assert_eq!(runs, vec!["100011", "1011", "110001", "11", "1010111", "111101"]);
        assert!(run_for_char('#').is_none());
    }

    #[test]
    fn test_layout_regions() {
        let layout = GridLayout::default();
        let runs = vec![run_for_char('X').unwrap()];
        let regions = layout.regions(&runs);
        assert_eq!(regions.len(), 3);
        let xs: Vec<f64> = regions.iter().map(|r| r.center().unwrap().x).collect();
        assert_eq!(xs, vec![44.5, 104.5, 134.5]);
        assert_eq!(layout.canvas_size(&runs), (80 + 4 * 30, 80 + 40));
    }

    #[test]
    fn test_render_regions() {
        let regions = vec![Region::rectangle(2.0, 3.0, 4.0, 2.0)];
        let canvas = render_regions(&regions, 10, 10, Polarity::Bright);
        let lit = canvas.pixels().filter(|p| p.0[0] == 255).count();
        assert_eq!(lit, 8);
        assert_eq!(canvas.get_pixel(2, 3).0[0], 255);
        assert_eq!(canvas.get_pixel(6, 3).0[0], 0);
    }

    #[test]
    fn test_png_roundtrip_dimensions() {
        let bytes = synthesize_print("FX", &GridLayout::default(), Polarity::Dark).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (80 + 6 * 30, 80 + 2 * 40));
    }
}
