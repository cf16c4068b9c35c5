use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};
use crate::theme::color::hex;

/// Named card palette.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Theme {
    pub name: String,
    /// Host accent (buttons, selection chrome). Not drawn on the card.
    #[serde(with = "hex", alias = "websiteTheme")]
    pub accent: Rgba8,
    /// Paragraph text color.
    #[serde(with = "hex", alias = "textColor")]
    pub text_color: Rgba8,
    /// Fill of the rounded card.
    #[serde(with = "hex", alias = "cardBackground")]
    pub card_background: Rgba8,
    /// Fill of the outer frame around the card.
    #[serde(with = "hex", alias = "borderBackground")]
    pub border_background: Rgba8,
    #[serde(with = "hex", alias = "titleColor")]
    pub title_color: Rgba8,
}

impl Theme {
    /// Parse one theme from JSON. Both `snake_case` and `camelCase` keys are accepted.
    pub fn from_json(json: &str) -> CardResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CardError::validation(format!("invalid theme json: {e}")))
    }

    /// Parse a JSON array of themes.
    pub fn list_from_json(json: &str) -> CardResult<Vec<Self>> {
        serde_json::from_str(json)
            .map_err(|e| CardError::validation(format!("invalid theme list json: {e}")))
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

/// Index of [`default_theme`] in [`builtin_themes`].
pub const DEFAULT_THEME_INDEX: usize = 3;

fn builtin(name: &str, accent: u32, text: u32, card: u32, border: u32, title: u32) -> Theme {
    Theme {
        name: name.to_owned(),
        accent: Rgba8::from_rgb_u32(accent),
        text_color: Rgba8::from_rgb_u32(text),
        card_background: Rgba8::from_rgb_u32(card),
        border_background: Rgba8::from_rgb_u32(border),
        title_color: Rgba8::from_rgb_u32(title),
    }
}

/// The built-in palettes, in menu order.
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        builtin("Default Blue", 0x013365, 0x013365, 0xF3F4F6, 0xFFFFFF, 0x001F3F),
        builtin("Green", 0x166434, 0x166434, 0xF3F4F6, 0xFFFFFF, 0x0B4619),
        builtin("Deep Blue", 0x1E3A8A, 0x1E3A8A, 0xE0E7FF, 0x3B82F6, 0x1E40AF),
        builtin("Fresh Morning", 0x4682B4, 0x1E90FF, 0xF0F8FF, 0x87CEEB, 0x1E90FF),
        builtin("Birthday Celebration", 0xFF69B4, 0xFF1493, 0xFFF0F5, 0xFFB6C1, 0xFF1493),
        builtin("Sunset Glow", 0xFF7F50, 0xFF4500, 0xFFDAB9, 0xFFA07A, 0xFF6347),
        builtin("Lavender Dreams", 0x9370DB, 0x8A2BE2, 0xE6E6FA, 0xDDA0DD, 0x9932CC),
        builtin("Mint Fresh", 0x3EB489, 0x2E8B57, 0xF0FFF0, 0x98FB98, 0x00A86B),
        builtin("Golden Autumn", 0xDAA520, 0xB8860B, 0xFFF8DC, 0xF4A460, 0xCD853F),
        builtin("Ocean Breeze", 0x20B2AA, 0x008B8B, 0xE0FFFF, 0x48D1CC, 0x00CED1),
        builtin("Cherry Blossom", 0xFFB7C5, 0xFF69B4, 0xFFF0F5, 0xFFC0CB, 0xFF1493),
        builtin("Twilight Purple", 0x4B0082, 0x8A2BE2, 0xE6E6FA, 0x9370DB, 0x9400D3),
        builtin("Earthy Tones", 0x8B4513, 0xA0522D, 0xFFF8DC, 0xDEB887, 0xD2691E),
        builtin("Neon Nights", 0xFF00FF, 0x00FF00, 0x000000, 0x00FFFF, 0xFF1493),
        builtin("Monochrome Elegance", 0x2C3E50, 0x34495E, 0xECF0F1, 0xBDC3C7, 0x2C3E50),
        builtin("Desert Oasis", 0xD2691E, 0x8B4513, 0xFAEBD7, 0xDEB887, 0xA0522D),
        builtin("Tropical Paradise", 0x00CED1, 0x20B2AA, 0xE0FFFF, 0x40E0D0, 0x48D1CC),
        builtin("Vintage Charm", 0xDEB887, 0xD2691E, 0xFFF8DC, 0xF4A460, 0xCD853F),
        builtin("Cosmic Galaxy", 0x483D8B, 0x4B0082, 0xE6E6FA, 0x9370DB, 0x8A2BE2),
        builtin("Autumn Harvest", 0xB8860B, 0xCD853F, 0xFFFACD, 0xF4A460, 0xD2691E),
        builtin("Pastel Dream", 0xFFB6C1, 0xDB7093, 0xFFF0F5, 0xFFC0CB, 0xFF69B4),
        builtin("Urban Chic", 0x696969, 0x2F4F4F, 0xF5F5F5, 0xA9A9A9, 0x4A4A4A),
        builtin("Zen Garden", 0x8FBC8F, 0x3CB371, 0xF0FFF0, 0x98FB98, 0x2E8B57),
        builtin("Royal Elegance", 0x4B0082, 0x800080, 0xE6E6FA, 0x9370DB, 0x8A2BE2),
        builtin("Retro Pop", 0xFF6347, 0xFF4500, 0xFFDAB9, 0xFFA07A, 0xFF7F50),
        builtin("Misty Morning", 0xB0C4DE, 0x4682B4, 0xF0F8FF, 0x87CEFA, 0x6495ED),
        builtin("Candy Crush", 0xFF69B4, 0xFF1493, 0xFFF0F5, 0xFFB6C1, 0xFF69B4),
        builtin("Coffee Break", 0x8B4513, 0xA0522D, 0xFFF8DC, 0xDEB887, 0xD2691E),
        builtin("Emerald City", 0x008B8B, 0x006400, 0xE0FFFF, 0x20B2AA, 0x00CED1),
        builtin("Sunset Serenity", 0xFF7F50, 0xFF6347, 0xFFDAB9, 0xFFA07A, 0xFF4500),
        builtin("Moonlight Shadow", 0x4B0082, 0x483D8B, 0xE6E6FA, 0x9370DB, 0x8A2BE2),
        builtin("Spring Blossom", 0xFF69B4, 0xDB7093, 0xFFF0F5, 0xFFB6C1, 0xFF1493),
        builtin("Tech Noir", 0x2F4F4F, 0x008080, 0xF5FFFA, 0x20B2AA, 0x00CED1),
    ]
}

/// "Fresh Morning".
pub fn default_theme() -> Theme {
    builtin_themes().swap_remove(DEFAULT_THEME_INDEX)
}

/// Case-insensitive lookup by name; surrounding whitespace is ignored.
pub fn find_theme(name: &str) -> Option<Theme> {
    let wanted = name.trim();
    builtin_themes()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
#[path = "../../tests/unit/theme/catalog.rs"]
mod tests;
