//! Area-similarity clustering of regions into code blocks
use crate::decoder::config::DecoderConfig;
use crate::error::{DecodeError, Result};
use crate::models::Region;
use std::ops::RangeInclusive;

/// A run of consecutive regions from the area-sorted input
pub type Block<'a> = &'a [Region];

/// Split area-sorted regions into clusters of similar area.
///
/// `regions` must already be sorted ascending by area; this is the contract of
/// the region source and is not re-checked here.
///
/// The baseline area follows the last accepted region. When the next region
/// grows by `similarity_percent` or more, the open cluster closes before it
/// and the following cluster starts one past it, so the region on the boundary
/// belongs to no cluster. Whatever remains after the last boundary forms the
/// final cluster.
///
/// The baseline does not move on a boundary. With ascending input every region
/// after the first boundary is therefore a boundary as well and yields an
/// empty cluster, so only the smallest-area cluster can hold regions.
pub fn cluster_by_area(regions: &[Region], similarity_percent: f64) -> Result<Vec<Block<'_>>> {
    let Some(first) = regions.first() else {
        return Err(DecodeError::InsufficientData("no regions to cluster"));
    };

    let mut clusters = Vec::new();
    let mut start = 0usize;
    let mut baseline = first.area();

    for (index, region) in regions.iter().enumerate().skip(1) {
        let area = region.area();
        let diff_percent = (area - baseline) * 100.0 / baseline;
        if diff_percent < similarity_percent {
            baseline = area;
        } else {
            clusters.push(&regions[start..index]);
            start = index + 1;
        }
    }
    if start < regions.len() {
        clusters.push(&regions[start..]);
    }

    Ok(clusters)
}

/// Keep only non-empty clusters whose region count lies in `size_range`
pub fn filter_blocks<'a>(clusters: &[Block<'a>], size_range: &RangeInclusive<usize>) -> Vec<Block<'a>> {
    clusters
        .iter()
        .copied()
        .filter(|cluster| !cluster.is_empty() && size_range.contains(&cluster.len()))
        .collect()
}

/// Cluster area-sorted regions and keep the plausibly sized blocks
pub fn find_blocks<'a>(regions: &'a [Region], config: &DecoderConfig) -> Result<Vec<Block<'a>>> {
    let clusters = cluster_by_area(regions, config.area_similarity_percent)?;
    let blocks = filter_blocks(&clusters, &config.block_size_range);
    log::trace!(
        "clustering: {} regions -> {} clusters -> {} blocks",
        regions.len(),
        clusters.len(),
        blocks.len()
    );
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Square regions whose shoelace area is exactly `side * side`
    fn squares(sides: &[f64]) -> Vec<Region> {
        sides
            .iter()
            .map(|&s| Region::rectangle(0.0, 0.0, s + 1.0, s + 1.0))
            .collect()
    }

    fn uniform(count: usize, side: f64) -> Vec<Region> {
        squares(&vec![side; count])
    }

    #[test]
    fn test_empty_input_fails() {
        let err = cluster_by_area(&[], 5.0).unwrap_err();
        assert!(matches!(err, DecodeError::InsufficientData(_)));
    }

    #[test]
    fn test_single_region_forms_one_element_cluster() {
        let regions = uniform(1, 10.0);
        let clusters = cluster_by_area(&regions, 5.0).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 1);
        assert!(find_blocks(&regions, &DecoderConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_boundary_region_is_dropped() {
        // Areas 100, 102.01, 400: the jump to 400 closes the first cluster and
        // the 400 region belongs to no cluster
        let regions = squares(&[10.0, 10.1, 20.0]);
        let clusters = cluster_by_area(&regions, 5.0).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0], &regions[0..2]);
    }

    #[test]
    fn test_regions_after_boundary_stay_boundaries() {
        // 404.01 is still compared against the 102.01 baseline
        let regions = squares(&[10.0, 10.1, 20.0, 20.1]);
        let clusters = cluster_by_area(&regions, 5.0).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0], &regions[0..2]);
        assert!(clusters[1].is_empty());
    }

    #[test]
    fn test_baseline_follows_accepted_regions() {
        // Each step is under 5% even though the total drift is larger
        let regions = squares(&[10.0, 10.2, 10.4, 10.6, 10.8]);
        let clusters = cluster_by_area(&regions, 5.0).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 5);
    }

    #[test]
    fn test_block_size_filter_is_inclusive() {
        let range = DecoderConfig::default().block_size_range;
        for (count, kept) in [(24, false), (25, true), (30, true), (31, false)] {
            let regions = uniform(count, 10.0);
            let clusters = cluster_by_area(&regions, 5.0).unwrap();
            let blocks = filter_blocks(&clusters, &range);
            assert_eq!(blocks.len() == 1, kept, "block of {count} regions");
        }
    }

    #[test]
    fn test_empty_clusters_never_pass_the_filter() {
        let regions = squares(&[10.0, 10.1, 20.0, 20.1]);
        let clusters = cluster_by_area(&regions, 5.0).unwrap();
        let blocks = filter_blocks(&clusters, &(0..=30));
        assert_eq!(blocks, vec![&regions[0..2]]);
    }

    #[test]
    fn test_find_blocks_keeps_smallest_area_block() {
        let mut sides = vec![10.0; 27];
        sides.extend(vec![30.0; 28]);
        let regions = squares(&sides);
        let blocks = find_blocks(&regions, &DecoderConfig::default()).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0], &regions[0..27]);
    }

    #[test]
    fn test_zero_area_baseline_does_not_panic() {
        let mut regions = vec![Region::rectangle(0.0, 0.0, 1.0, 1.0)];
        regions.extend(uniform(3, 10.0));
        let clusters = cluster_by_area(&regions, 5.0).unwrap();
        assert_eq!(clusters[0].len(), 1);
    }
}
