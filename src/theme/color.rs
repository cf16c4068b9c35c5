use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
pub fn parse_hex(s: &str) -> CardResult<Rgba8> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CardError::validation(format!("invalid hex color \"{s}\"")));
    }

    let byte = |pair: &str| -> CardResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CardError::validation(format!("invalid hex byte \"{pair}\" in \"{s}\"")))
    };
    // Short forms repeat each nibble: `#abc` == `#aabbcc`.
    let nibble = |i: usize| -> CardResult<u8> {
        let v = byte(&digits[i..i + 1])?;
        Ok(v * 17)
    };

    match digits.len() {
        3 => Ok(Rgba8::new(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        4 => Ok(Rgba8::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Ok(Rgba8::new(
            byte(&digits[0..2])?,
            byte(&digits[2..4])?,
            byte(&digits[4..6])?,
            255,
        )),
        8 => Ok(Rgba8::new(
            byte(&digits[0..2])?,
            byte(&digits[2..4])?,
            byte(&digits[4..6])?,
            byte(&digits[6..8])?,
        )),
        _ => Err(CardError::validation(format!(
            "hex color \"{s}\" must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA"
        ))),
    }
}

impl std::str::FromStr for Rgba8 {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

/// `#[serde(with = "...")]` adapter: writes hex strings, reads hex strings, `{r,g,b,a}`
/// objects or `[r,g,b(,a)]` byte arrays.
pub mod hex {
    use super::*;

    pub fn serialize<S>(color: &Rgba8, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        color.to_hex().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Rgba8, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Rgba8::new(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Rgba8::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/color.rs"]
mod tests;
