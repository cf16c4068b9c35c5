//! Card geometry, font-size sampling and the auto-fit solver.

/// Frame, card and content boxes derived from width and orientation.
pub mod geometry;
/// Seedable randomness and font-size draws.
pub mod sampler;
/// Iterative fit search with shrink and fallback.
pub mod solver;
