//! Trimming, encoding and delivering captured cards.

/// `arboard` system clipboard.
#[cfg(feature = "clipboard")]
pub mod clipboard;
/// PNG encode/decode and data URLs.
pub mod png;
/// Download and clipboard sinks.
pub mod sink;
/// Alpha-bounded crop with a preserved margin.
pub mod trim;
