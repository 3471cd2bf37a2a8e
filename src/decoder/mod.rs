//! Symbolic half of the pipeline
//!
//! Turns the lines found by the detector into text:
//! - Bit lattice reconstruction from mark positions
//! - Three-probe ASCII demultiplexing
//! - Tunable thresholds for the whole pipeline

/// Thresholds and `DOTBAR_*` environment overrides
pub mod config;
/// Line centers to binary run
pub mod run_encoder;
/// Binary run to '/'-joined ASCII candidates
pub mod symbol;
