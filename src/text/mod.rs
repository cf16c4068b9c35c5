//! Paragraph splitting, shaping and measurement.

/// Parley-backed paragraph layout and font resolution.
pub mod engine;
/// Paragraph height measurement capability.
pub mod measure;
/// Blank-line paragraph splitter.
pub mod split;
