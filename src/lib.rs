//! text2card turns a block of text into a styled card image.
//!
//! The pipeline is session-oriented:
//!
//! - Split text into paragraphs and let the [`LayoutSolver`] auto-fit them into the card
//! - Capture the card with a [`Renderer`] (the built-in [`CpuRenderer`] uses `vello_cpu`)
//! - Trim transparent padding and deliver the PNG as a download or a clipboard image
//!
//! [`CardSession`] ties these together behind `layout(...)` and `export(mode)`.
#![forbid(unsafe_code)]

/// Trimming, PNG encoding and export sinks.
pub mod export;
/// Shared value types, errors and pixel math.
pub mod foundation;
/// Card geometry, font-size sampling and the auto-fit solver.
pub mod layout;
/// Rasterizing a laid-out card.
pub mod render;
/// Host-facing card session.
pub mod session;
/// Paragraph splitting, shaping and measurement.
pub mod text;
/// Built-in palettes and theme parsing.
pub mod theme;

pub use crate::foundation::core::{HostContext, Orientation, Rgba8};
pub use crate::foundation::error::{CardError, CardResult};

#[cfg(feature = "clipboard")]
pub use crate::export::clipboard::SystemClipboard;
pub use crate::export::png::{decode_png, encode_png, png_data_url};
pub use crate::export::sink::{
    ClipboardImage, ClipboardSink, DownloadSink, EXPORT_FILE_NAME, ExportError, ExportMode,
    ExportOpts, ExportReport, InMemoryClipboard,
};
pub use crate::export::trim::{DEFAULT_TRIM_MARGIN, TrimBounds, Trimmed, trim_transparent};
pub use crate::layout::geometry::{CardGeometry, Container};
pub use crate::layout::sampler::{RandomSource, SeededRng, sample_font_sizes};
pub use crate::layout::solver::{
    LayoutMetrics, LayoutOutcome, LayoutSolver, ParagraphGeometry, SolvedLayout, SolverConfig,
    solve_layout,
};
pub use crate::render::backend::{ExportRaster, RenderRequest, Renderer, export_scale};
pub use crate::render::cpu::CpuRenderer;
pub use crate::session::card_session::{CardSession, LayoutPass, SessionOpts};
pub use crate::text::engine::{FontSource, FontStatus, TextLayoutEngine};
pub use crate::text::measure::{MonospaceMeasurer, ParleyMeasurer, TextMeasurer};
pub use crate::text::split::split_paragraphs;
pub use crate::theme::catalog::{Theme, builtin_themes, default_theme, find_theme};
