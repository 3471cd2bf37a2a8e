use crate::decoder::config::Polarity;
use image::GrayImage;
use imageproc::contrast::{ThresholdType, threshold};

/// Convert a grayscale image to a 0/255 mark mask using Otsu's global threshold.
///
/// With [`Polarity::Bright`] a pixel is a mark when it is brighter than the
/// threshold, with [`Polarity::Dark`] when it is at or below it.
pub fn otsu_binarize(gray: &GrayImage, polarity: Polarity) -> GrayImage {
    let level = otsu_threshold(gray.as_raw());
    threshold_binarize(gray, level, polarity)
}

/// Otsu's optimal threshold: the highest value of the lower class that
/// maximizes between-class variance. The first maximum wins on ties.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut low_count = 0.0;
    let mut low_sum = 0.0;
    let mut best_variance = -1.0;
    let mut best_threshold = 0u8;

    for (value, &count) in histogram.iter().enumerate() {
        low_count += count as f64;
        low_sum += value as f64 * count as f64;
        if low_count == 0.0 {
            continue;
        }
        let high_count = total - low_count;
        if high_count == 0.0 {
            break;
        }

        let low_mean = low_sum / low_count;
        let high_mean = (total_sum - low_sum) / high_count;
        let variance = low_count * high_count * (low_mean - high_mean).powi(2);

        if variance > best_variance {
            best_variance = variance;
            best_threshold = value as u8;
        }
    }

    best_threshold
}

/// Fixed threshold binarization into a 0/255 mark mask
pub fn threshold_binarize(gray: &GrayImage, level: u8, polarity: Polarity) -> GrayImage {
    let kind = match polarity {
        Polarity::Bright => ThresholdType::Binary,
        Polarity::Dark => ThresholdType::BinaryInverted,
    };
    threshold(gray, level, kind)
}
