use crate::text::engine::{FontSource, LINE_HEIGHT, TextBrush, TextLayoutEngine};

/// Measures the laid-out height of a paragraph.
///
/// The solver only needs heights, so any environment (shaping engine, fixed metric table,
/// test double) can stand in.
pub trait TextMeasurer {
    /// Height in CSS pixels of `text` set at `font_size` and wrapped to `width`.
    fn measure(&mut self, text: &str, font_size: f64, width: f64) -> f64;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(&mut self, text: &str, font_size: f64, width: f64) -> f64 {
        (**self).measure(text, font_size, width)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&mut self, text: &str, font_size: f64, width: f64) -> f64 {
        (**self).measure(text, font_size, width)
    }
}

/// Measurer backed by Parley shaping and line breaking.
pub struct ParleyMeasurer {
    engine: TextLayoutEngine,
}

impl ParleyMeasurer {
    /// Build a measurer using the given face.
    pub fn new(source: FontSource) -> Self {
        Self {
            engine: TextLayoutEngine::new(source),
        }
    }

    /// Borrow the underlying engine (font status, diagnostics).
    pub fn engine_mut(&mut self) -> &mut TextLayoutEngine {
        &mut self.engine
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, text: &str, font_size: f64, width: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let line_box = font_size * f64::from(LINE_HEIGHT);
        match self.engine.layout_paragraph(
            text,
            font_size as f32,
            width as f32,
            TextBrush::default(),
        ) {
            Ok(layout) => (layout.lines().count().max(1) as f64) * line_box,
            Err(e) => {
                tracing::debug!(error = %e, "paragraph could not be shaped, assuming one line");
                line_box
            }
        }
    }
}

/// Font-independent estimator: every glyph advances `advance_em` em and lines hold
/// `floor(width / advance)` glyphs.
///
/// Useful for headless hosts without system fonts and for deterministic tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    /// Glyph advance in em units.
    pub advance_em: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&mut self, text: &str, font_size: f64, width: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let advance = (font_size * self.advance_em).max(f64::EPSILON);
        let per_line = ((width / advance).floor() as usize).max(1);
        let lines: usize = text
            .split('\n')
            .map(|line| line.chars().count().div_ceil(per_line).max(1))
            .sum();
        (lines as f64) * font_size * f64::from(LINE_HEIGHT)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
