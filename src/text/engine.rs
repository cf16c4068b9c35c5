use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// CSS-style line height multiplier applied to every paragraph.
pub const LINE_HEIGHT: f32 = 1.5;

/// Generic family used whenever the custom face is missing or failed to load.
pub const GENERIC_FAMILY: &str = "sans-serif";

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Where the card's custom face comes from.
#[derive(Clone, Debug, Default)]
pub enum FontSource {
    /// Use the generic system family only.
    #[default]
    Generic,
    /// Load a font file from disk.
    File(PathBuf),
    /// Font bytes already in memory.
    Bytes(Arc<Vec<u8>>),
}

/// Resolution state of the custom face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontStatus {
    /// Not attempted yet.
    Pending,
    /// Custom face registered under `family`.
    Custom {
        /// Family name read from the font data.
        family: String,
    },
    /// No custom face requested.
    Generic,
    /// Loading failed; text renders with the generic family.
    Fallback {
        /// Why the custom face was rejected.
        reason: String,
    },
}

impl FontStatus {
    /// Whether font resolution has completed (successfully or not).
    pub fn is_ready(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Stateful helper for building Parley layouts of card paragraphs.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    source: FontSource,
    status: FontStatus,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new(FontSource::Generic)
    }
}

impl TextLayoutEngine {
    /// Construct an engine for `source`. Fonts are resolved lazily by [`Self::ensure_fonts`].
    pub fn new(source: FontSource) -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            source,
            status: FontStatus::Pending,
        }
    }

    /// Current font resolution state.
    pub fn status(&self) -> &FontStatus {
        &self.status
    }

    /// Resolve the custom face once. Failures degrade to the generic family and never error.
    pub fn ensure_fonts(&mut self) -> &FontStatus {
        if self.status.is_ready() {
            return &self.status;
        }

        self.status = match self.load_custom() {
            Ok(Some(family)) => {
                tracing::debug!(%family, "custom font registered");
                FontStatus::Custom { family }
            }
            Ok(None) => FontStatus::Generic,
            Err(e) => {
                tracing::warn!(error = %e, "font loading failed, proceeding with fallback");
                FontStatus::Fallback {
                    reason: e.to_string(),
                }
            }
        };
        &self.status
    }

    fn load_custom(&mut self) -> CardResult<Option<String>> {
        let bytes = match &self.source {
            FontSource::Generic => return Ok(None),
            FontSource::File(path) => std::fs::read(path).map_err(|e| {
                CardError::validation(format!("failed to read font '{}': {e}", path.display()))
            })?,
            FontSource::Bytes(bytes) => bytes.as_ref().clone(),
        };

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CardError::validation("no font families registered from font bytes")
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::validation("registered font family has no name"))?
            .to_string();
        Ok(Some(family))
    }

    fn font_stack(&self) -> String {
        match &self.status {
            FontStatus::Custom { family } => format!("\"{family}\", {GENERIC_FAMILY}"),
            _ => GENERIC_FAMILY.to_string(),
        }
    }

    /// Shape and break `text` at `size_px` into lines no wider than `max_width_px`.
    pub fn layout_paragraph(
        &mut self,
        text: &str,
        size_px: f32,
        max_width_px: f32,
        brush: TextBrush,
    ) -> CardResult<parley::Layout<TextBrush>> {
        let width = max_width_px.max(1.0);
        let mut layout = self.build(text, size_px, 0.0, brush)?;
        layout.break_all_lines(Some(width));
        layout.align(
            Some(width),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }

    /// Shape `text` as one unwrapped line with `letter_spacing_em` extra tracking per glyph.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        letter_spacing_em: f32,
        brush: TextBrush,
    ) -> CardResult<parley::Layout<TextBrush>> {
        let mut layout = self.build(text, size_px, letter_spacing_em * size_px, brush)?;
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }

    fn build(
        &mut self,
        text: &str,
        size_px: f32,
        letter_spacing_px: f32,
        brush: TextBrush,
    ) -> CardResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "font size must be finite and > 0",
            ));
        }
        self.ensure_fonts();
        let stack = self.font_stack();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if letter_spacing_px != 0.0 {
            builder.push_default(parley::style::StyleProperty::LetterSpacing(letter_spacing_px));
        }
        Ok(builder.build(text))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
