//! Shared value types, errors and pixel math.

/// Core value types (colors, orientation, host flags).
pub mod core;
/// Crate error type.
pub mod error;
pub(crate) mod math;
