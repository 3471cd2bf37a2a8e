//! RustDotbar - decoder for printed dot/bar ground-shipment codes
//!
//! A pure Rust pipeline that turns the marks of a dot/bar print into the
//! ASCII text it encodes. Marks are grouped into blocks by area, blocks into
//! lines by height, and every line is sampled onto a bit grid whose 8-bit
//! windows are read as letters or digits.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Symbol decoding (run reconstruction, probes, configuration)
pub mod decoder;
/// Mark geometry (contours, clustering, lines, spacing)
pub mod detector;
/// Error type
pub mod error;
/// Core data structures (Point, Region, BinaryRun)
pub mod models;
/// Block orchestration and decode reports
pub mod pipeline;
/// Synthetic print helpers
pub mod tools;
/// Image processing ahead of contour extraction
pub mod utils;

pub use decoder::config::{DecoderConfig, ImagingConfig, Polarity};
pub use detector::contour::{ContourExtractor, RegionSource};
pub use error::{DecodeError, Result};
pub use models::{BinaryRun, Point, Region};
pub use pipeline::{BlockDecode, DecodeReport, DecodeTelemetry, LineDecode};

/// Decode area-sorted regions with the default configuration
///
/// # Arguments
/// * `regions` - Mark contours, sorted ascending by area
///
/// # Returns
/// One line of text per kept block, newline-joined. Each block line holds its
/// line symbols separated by spaces; a line that matched nothing contributes
/// an empty segment.
pub fn decode_regions(regions: &[Region]) -> Result<String> {
    Decoder::new().decode_regions(regions)
}

/// Decode an encoded image (PNG, JPEG, ...) with the default configuration
pub fn decode_image(image_bytes: &[u8]) -> Result<String> {
    Decoder::new().decode_image(image_bytes)
}

/// Decoder with explicit thresholds and a pluggable region source
#[derive(Debug, Clone, Default)]
pub struct Decoder<S = ContourExtractor> {
    config: DecoderConfig,
    source: S,
}

impl Decoder {
    /// Create a decoder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder whose thresholds come from `DOTBAR_*` environment variables
    pub fn from_env() -> Self {
        Self {
            config: DecoderConfig::from_env(),
            source: ContourExtractor::new(ImagingConfig::from_env()),
        }
    }
}

impl<S: RegionSource> Decoder<S> {
    /// Create a decoder with a custom region source
    pub fn with_source(config: DecoderConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Replace the decode thresholds
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Current thresholds
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode area-sorted regions into text
    pub fn decode_regions(&self, regions: &[Region]) -> Result<String> {
        self.report_regions(regions).map(|report| report.text())
    }

    /// Decode area-sorted regions and keep every intermediate result
    pub fn report_regions(&self, regions: &[Region]) -> Result<DecodeReport> {
        pipeline::decode_regions(regions, &self.config)
    }

    /// Extract regions from an encoded image and decode them into text
    pub fn decode_image(&self, image_bytes: &[u8]) -> Result<String> {
        self.report_image(image_bytes).map(|report| report.text())
    }

    /// Extract regions from an encoded image and keep every intermediate result
    pub fn report_image(&self, image_bytes: &[u8]) -> Result<DecodeReport> {
        let regions = self.source.regions(image_bytes)?;
        self.report_regions(&regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{GridLayout, run_for_char};

    /// Hands out a fixed region list, ignoring the image bytes
    struct FixedRegions(Vec<Region>);

    impl RegionSource for FixedRegions {
        fn regions(&self, _image_bytes: &[u8]) -> Result<Vec<Region>> {
            Ok(self.0.clone())
        }
    }

    fn fixture_regions(text: &str) -> Vec<Region> {
        let runs: Vec<BinaryRun> = text.chars().filter_map(run_for_char).collect();
        GridLayout::default().regions(&runs)
    }

    #[test]
    fn test_decode_empty_regions_fails() {
        let err = decode_regions(&[]).unwrap_err();
        assert!(matches!(err, DecodeError::InsufficientData(_)));
    }

    #[test]
    fn test_decode_regions() {
        let regions = fixture_regions("FX1WOWK");
        assert_eq!(decode_regions(&regions).unwrap(), "F X b/1 W O W K");
    }

    #[test]
    fn test_custom_source() {
        let decoder = Decoder::with_source(
            DecoderConfig::default().with_block_size_range(1..=10),
            FixedRegions(fixture_regions("OK")),
        );
        assert_eq!(decoder.decode_image(b"ignored").unwrap(), "O K");
        let report = decoder.report_image(b"ignored").unwrap();
        assert_eq!(report.telemetry.blocks_kept, 1);
        assert_eq!(report.blocks[0].region_count, 9);
    }

    #[test]
    fn test_decode_image_rejects_empty_bytes() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::EmptyInput)));
    }
}
