//! Card palettes.

/// Built-in palettes and JSON theme loading.
pub mod catalog;
/// Hex color parsing and serde adapter.
pub mod color;
