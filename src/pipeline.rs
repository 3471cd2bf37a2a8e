use crate::decoder::config::DecoderConfig;
use crate::decoder::run_encoder::RunEncoder;
use crate::decoder::symbol::SymbolDecoder;
use crate::detector::clustering::{Block, cluster_by_area, filter_blocks};
use crate::detector::lines::{group_lines, sort_row_major};
use crate::detector::spacing::unit_width;
use crate::error::{DecodeError, Result};
use crate::models::{BinaryRun, Point, Region};
use rayon::prelude::*;

/// Decode of a single line of marks
#[derive(Debug, Clone, PartialEq)]
pub struct LineDecode {
    /// Mark centers in row-major order
    pub centers: Vec<Point>,
    /// Reconstructed bit lattice
    pub run: BinaryRun,
    /// '/'-joined candidates, empty when nothing matched
    pub symbol: String,
}

/// Decode of one block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDecode {
    /// Number of regions in the block
    pub region_count: usize,
    /// Grid cell width shared by every line of the block
    pub unit_width: f64,
    /// Lines top to bottom
    pub lines: Vec<LineDecode>,
}

impl BlockDecode {
    /// Line symbols joined by a single space
    pub fn text(&self) -> String {
        let symbols: Vec<&str> = self.lines.iter().map(|l| l.symbol.as_str()).collect();
        symbols.join(" ")
    }
}

/// Stage counters of one decode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeTelemetry {
    /// Regions handed to the clusterer
    pub regions_in: usize,
    /// Area clusters before the size filter (including empty ones)
    pub clusters_formed: usize,
    /// Blocks that passed the size filter
    pub blocks_kept: usize,
    /// Lines encoded and decoded
    pub lines_decoded: usize,
    /// Lines whose run matched no probe
    pub lines_without_symbol: usize,
}

/// Full result of one decode, in block discovery order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    /// Stage counters
    pub telemetry: DecodeTelemetry,
    /// Decoded blocks
    pub blocks: Vec<BlockDecode>,
}

impl DecodeReport {
    /// Block texts joined by newlines
    pub fn text(&self) -> String {
        let blocks: Vec<String> = self.blocks.iter().map(BlockDecode::text).collect();
        blocks.join("\n")
    }
}

/// Centers, unit width, lines, runs and symbols of one block
pub fn decode_block(block: Block<'_>, config: &DecoderConfig) -> Result<BlockDecode> {
    if block.is_empty() {
        return Err(DecodeError::InsufficientData("block has no regions"));
    }

    let mut centers = block
        .iter()
        .map(Region::center)
        .collect::<Result<Vec<Point>>>()?;
    sort_row_major(&mut centers, config.row_sort_scale);

    let unit = unit_width(&centers)?;
    let encoder = RunEncoder::new(unit, config.max_zero_run)?;

    let lines = group_lines(&centers, config.line_y_tolerance_percent)?
        .into_iter()
        .map(|line| -> Result<LineDecode> {
            let run = encoder.encode(&line)?;
            let symbol = SymbolDecoder::decode(&run);
            log::trace!("line of {} marks: run={} symbol={:?}", line.len(), run, symbol);
            Ok(LineDecode {
                centers: line,
                run,
                symbol,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(BlockDecode {
        region_count: block.len(),
        unit_width: unit,
        lines,
    })
}

/// Decode blocks, on the rayon pool when `config.parallel` is set.
///
/// Output order always follows input order.
pub fn decode_blocks(blocks: &[Block<'_>], config: &DecoderConfig) -> Result<Vec<BlockDecode>> {
    if config.parallel {
        blocks
            .par_iter()
            .map(|block| decode_block(block, config))
            .collect()
    } else {
        blocks
            .iter()
            .map(|block| decode_block(block, config))
            .collect()
    }
}

/// Run the whole geometric-to-symbolic pipeline on area-sorted regions
pub fn decode_regions(regions: &[Region], config: &DecoderConfig) -> Result<DecodeReport> {
    let clusters = cluster_by_area(regions, config.area_similarity_percent)?;
    let blocks = filter_blocks(&clusters, &config.block_size_range);
    let decoded = decode_blocks(&blocks, config)?;

    let lines = decoded.iter().flat_map(|b| b.lines.iter());
    let telemetry = DecodeTelemetry {
        regions_in: regions.len(),
        clusters_formed: clusters.len(),
        blocks_kept: blocks.len(),
        lines_decoded: lines.clone().count(),
        lines_without_symbol: lines.filter(|l| l.symbol.is_empty()).count(),
    };
    log::debug!(
        "decoded {} regions: {} clusters, {} blocks, {} lines ({} without symbol)",
        telemetry.regions_in,
        telemetry.clusters_formed,
        telemetry.blocks_kept,
        telemetry.lines_decoded,
        telemetry.lines_without_symbol
    );

    Ok(DecodeReport {
        telemetry,
        blocks: decoded,
    })
}
