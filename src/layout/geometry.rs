use serde::{Deserialize, Serialize};

use crate::foundation::core::{Orientation, Rect, Size};
use crate::foundation::error::{CardError, CardResult};

/// Outer frame padding, relative to card width.
pub const FRAME_PADDING_RATIO: f64 = 0.03;
/// Outer frame corner radius, relative to card width.
pub const FRAME_RADIUS_RATIO: f64 = 0.025;
/// Card corner radius, relative to card width.
pub const CARD_RADIUS_RATIO: f64 = 0.03;
/// Card inner padding on every side, relative to card width.
pub const CONTENT_PADDING_RATIO: f64 = 0.06;
/// Author line font size, relative to the smaller card side.
pub const AUTHOR_FONT_RATIO: f64 = 0.028;
/// Portrait cards set the author line slightly smaller.
pub const PORTRAIT_AUTHOR_SCALE: f64 = 0.95;

/// Layout container handed to the solver (the card box, padding included).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Container {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both sides are finite and positive.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// CSS-pixel geometry of the card: an outer frame wrapping a rounded card.
///
/// All coordinates are relative to the frame's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub orientation: Orientation,
    pub card_width: f64,
    pub card_height: f64,
    pub frame_padding: f64,
    pub frame_radius: f64,
    pub card_radius: f64,
    pub content_padding: f64,
}

impl CardGeometry {
    /// Derive the geometry for a card `card_width` CSS pixels wide.
    pub fn new(card_width: f64, orientation: Orientation) -> CardResult<Self> {
        if !card_width.is_finite() || card_width <= 0.0 {
            return Err(CardError::measurement_unavailable(
                "card width must be finite and > 0",
            ));
        }
        Ok(Self {
            orientation,
            card_width,
            card_height: orientation.height_for_width(card_width),
            frame_padding: card_width * FRAME_PADDING_RATIO,
            frame_radius: card_width * FRAME_RADIUS_RATIO,
            card_radius: card_width * CARD_RADIUS_RATIO,
            content_padding: card_width * CONTENT_PADDING_RATIO,
        })
    }

    /// Solver container (the card box).
    pub fn container(&self) -> Container {
        Container::new(self.card_width, self.card_height)
    }

    /// Full frame size including the outer padding.
    pub fn frame_size(&self) -> Size {
        Size::new(
            self.card_width + 2.0 * self.frame_padding,
            self.card_height + 2.0 * self.frame_padding,
        )
    }

    pub fn frame_rect(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), self.frame_size())
    }

    pub fn card_rect(&self) -> Rect {
        Rect::from_origin_size(
            (self.frame_padding, self.frame_padding),
            (self.card_width, self.card_height),
        )
    }

    /// Font size of the author line.
    pub fn author_font_size(&self) -> f64 {
        let size = self.card_width.min(self.card_height) * AUTHOR_FONT_RATIO;
        match self.orientation {
            Orientation::Landscape => size,
            Orientation::Portrait => size * PORTRAIT_AUTHOR_SCALE,
        }
    }

    /// Card box minus its inner padding; paragraph tops are relative to this box.
    pub fn content_rect(&self) -> Rect {
        self.card_rect().inset(-self.content_padding)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
