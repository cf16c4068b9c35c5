//! Rasterizing a laid-out card.

/// Renderer trait, export rasters and export scaling.
pub mod backend;
/// `vello_cpu` renderer.
pub mod cpu;
