use serde::{Deserialize, Serialize};

pub use kurbo::{Point, Rect, RoundedRect, Size};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 255,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Card orientation. The aspect ratio is fixed per orientation and never negotiated by layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// width:height = 1.618:1
    #[default]
    Landscape,
    /// height:width = 1.414:1
    Portrait,
}

impl Orientation {
    pub const GOLDEN_RATIO: f64 = 1.618;
    pub const A_SERIES_RATIO: f64 = 1.414;

    /// Card height for a given card width.
    pub fn height_for_width(self, width: f64) -> f64 {
        match self {
            Self::Landscape => width / Self::GOLDEN_RATIO,
            Self::Portrait => width * Self::A_SERIES_RATIO,
        }
    }

    /// Target export resolution in pixels.
    pub fn export_target(self) -> (u32, u32) {
        match self {
            Self::Landscape => (1920, (1920.0 / Self::GOLDEN_RATIO).round() as u32),
            Self::Portrait => (1080, (1080.0 * Self::A_SERIES_RATIO).round() as u32),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Landscape => Self::Portrait,
            Self::Portrait => Self::Landscape,
        }
    }
}

/// Ambient host flags, passed explicitly into layout, rendering and export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    /// Custom fonts have finished loading (or definitively failed to).
    pub fonts_ready: bool,
    /// Host is a small-screen device; clipboard export is not offered there.
    pub mobile: bool,
}

impl Default for HostContext {
    fn default() -> Self {
        Self {
            fonts_ready: true,
            mobile: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
