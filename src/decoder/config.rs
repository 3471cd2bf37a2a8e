//! Tunable thresholds for decoding and region extraction
//!
//! The defaults were tuned on a single reference print. Every value can be
//! overridden programmatically or through `DOTBAR_*` environment variables.

use std::ops::RangeInclusive;

fn parse_env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_u8(name: &str, default: u8) -> u8 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

/// Thresholds of the geometric-to-symbolic decode
#[derive(Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Maximum relative area step (percent) between consecutive regions of one block
    pub area_similarity_percent: f64,
    /// Region counts a block must have to be kept (inclusive)
    pub block_size_range: RangeInclusive<usize>,
    /// Vertical tolerance of a line, as percent of the y of the center that opened it
    pub line_y_tolerance_percent: f64,
    /// Longest zero run emitted for a single gap
    pub max_zero_run: usize,
    /// Row weight of the `y * scale + x` center ordering; x must stay below `scale + 1`
    pub row_sort_scale: f64,
    /// Decode blocks on the rayon pool
    pub parallel: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            area_similarity_percent: 5.0,
            block_size_range: 25..=30,
            line_y_tolerance_percent: 5.0,
            max_zero_run: 16,
            row_sort_scale: 65_535.0,
            parallel: false,
        }
    }
}

impl DecoderConfig {
    /// Defaults overridden by `DOTBAR_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let min_block = parse_env_usize("DOTBAR_MIN_BLOCK", *defaults.block_size_range.start());
        let max_block = parse_env_usize("DOTBAR_MAX_BLOCK", *defaults.block_size_range.end());
        Self {
            area_similarity_percent: parse_env_f64(
                "DOTBAR_AREA_SIMILARITY_PERCENT",
                defaults.area_similarity_percent,
            ),
            block_size_range: block_range_or(min_block, max_block, &defaults.block_size_range),
            line_y_tolerance_percent: parse_env_f64(
                "DOTBAR_LINE_TOLERANCE_PERCENT",
                defaults.line_y_tolerance_percent,
            ),
            max_zero_run: parse_env_usize("DOTBAR_MAX_ZERO_RUN", defaults.max_zero_run),
            row_sort_scale: defaults.row_sort_scale,
            parallel: parse_env_bool_u8("DOTBAR_PARALLEL", defaults.parallel),
        }
    }

    /// Set the area similarity threshold (percent)
    pub fn with_area_similarity_percent(mut self, percent: f64) -> Self {
        self.area_similarity_percent = percent;
        self
    }

    /// Set the accepted block sizes
    pub fn with_block_size_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.block_size_range = range;
        self
    }

    /// Set the line tolerance (percent)
    pub fn with_line_y_tolerance_percent(mut self, percent: f64) -> Self {
        self.line_y_tolerance_percent = percent;
        self
    }

    /// Set the zero-run cap
    pub fn with_max_zero_run(mut self, cells: usize) -> Self {
        self.max_zero_run = cells;
        self
    }

    /// Enable or disable block-level parallelism
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// `min..=max`, or `fallback` when the bounds are inverted
fn block_range_or(min: usize, max: usize, fallback: &RangeInclusive<usize>) -> RangeInclusive<usize> {
    if min > max {
        log::warn!("block size range {min}..={max} is empty, using {fallback:?}");
        return fallback.clone();
    }
    min..=max
}

/// Which binarized class counts as a mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Pixels brighter than the Otsu threshold are marks
    #[default]
    Bright,
    /// Pixels at or below the Otsu threshold are marks
    Dark,
}

/// Settings of the image-to-regions stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagingConfig {
    /// Mark polarity after thresholding
    pub polarity: Polarity,
    /// Erosion kernel radius (square kernel of side `2r + 1`)
    pub erode_radius: u8,
    /// Dilation kernel radius, applied after erosion
    pub dilate_radius: u8,
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::Bright,
            erode_radius: 1,
            dilate_radius: 5,
        }
    }
}

impl ImagingConfig {
    /// Defaults overridden by `DOTBAR_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let polarity = if parse_env_bool_u8("DOTBAR_DARK_MARKS", false) {
            Polarity::Dark
        } else {
            defaults.polarity
        };
        Self {
            polarity,
            erode_radius: parse_env_u8("DOTBAR_ERODE_RADIUS", defaults.erode_radius),
            dilate_radius: parse_env_u8("DOTBAR_DILATE_RADIUS", defaults.dilate_radius),
        }
    }

    /// Set the mark polarity
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_print() {
        let config = DecoderConfig::default();
        assert_eq!(config.area_similarity_percent, 5.0);
        assert_eq!(config.block_size_range, 25..=30);
        assert_eq!(config.line_y_tolerance_percent, 5.0);
        assert_eq!(config.max_zero_run, 16);

        let imaging = ImagingConfig::default();
        assert_eq!(imaging.erode_radius, 1);
        assert_eq!(imaging.dilate_radius, 5);
        assert_eq!(imaging.polarity, Polarity::Bright);
    }

    #[test]
    fn test_builders() {
        let config = DecoderConfig::default()
            .with_block_size_range(3..=4)
            .with_area_similarity_percent(10.0)
            .with_parallel(true);
        assert_eq!(config.block_size_range, 3..=4);
        assert_eq!(config.area_similarity_percent, 10.0);
        assert!(config.parallel);
    }

    #[test]
    fn test_unparseable_env_falls_back() {
        assert_eq!(parse_env_f64("DOTBAR_TEST_UNSET_VARIABLE", 2.5), 2.5);
        assert_eq!(parse_env_usize("DOTBAR_TEST_UNSET_VARIABLE", 7), 7);
        assert!(parse_env_bool_u8("DOTBAR_TEST_UNSET_VARIABLE", true));
        assert_eq!(parse_env_u8("DOTBAR_TEST_UNSET_VARIABLE", 5), 5);
    }

    #[test]
    fn test_inverted_block_range_falls_back() {
        let fallback = DecoderConfig::default().block_size_range;
        assert_eq!(block_range_or(31, 25, &fallback), 25..=30);
        assert_eq!(block_range_or(10, 12, &fallback), 10..=12);
        assert_eq!(block_range_or(7, 7, &fallback), 7..=7);
    }
}
