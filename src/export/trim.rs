use serde::{Deserialize, Serialize};

use crate::render::backend::ExportRaster;

/// Transparent pixels kept around the content on every side.
pub const DEFAULT_TRIM_MARGIN: u32 = 60;

/// Inclusive pixel box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrimBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TrimBounds {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    /// Grow by `margin` on each side, clamped to a `width x height` raster.
    pub fn expand(self, margin: u32, width: u32, height: u32) -> Self {
        Self {
            left: self.left.saturating_sub(margin),
            top: self.top.saturating_sub(margin),
            right: self.right.saturating_add(margin).min(width.saturating_sub(1)),
            bottom: self.bottom.saturating_add(margin).min(height.saturating_sub(1)),
        }
    }
}

/// Result of [`trim_transparent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trimmed {
    pub raster: ExportRaster,
    /// Crop box in source coordinates; `None` when the source had no visible pixel.
    pub bounds: Option<TrimBounds>,
}

impl Trimmed {
    /// The source was fully transparent and was passed through unchanged.
    pub fn is_degenerate(&self) -> bool {
        self.bounds.is_none()
    }
}

/// Tight box around every pixel with non-zero alpha.
pub fn content_bounds(raster: &ExportRaster) -> Option<TrimBounds> {
    let w = raster.width as usize;
    if w == 0 {
        return None;
    }
    let mut bounds: Option<TrimBounds> = None;
    for (y, row) in raster.data.chunks_exact(w * 4).enumerate() {
        let mut xs = row
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, px)| px[3] != 0)
            .map(|(x, _)| x as u32);
        let Some(first) = xs.next() else {
            continue;
        };
        let last = xs.last().unwrap_or(first);
        let y = y as u32;
        bounds = Some(match bounds {
            None => TrimBounds {
                left: first,
                top: y,
                right: last,
                bottom: y,
            },
            Some(b) => TrimBounds {
                left: b.left.min(first),
                top: b.top,
                right: b.right.max(last),
                bottom: y,
            },
        });
    }
    bounds
}

/// Crop `raster` to its visible content plus `margin`.
///
/// A raster without any visible pixel, or whose buffer does not match its dimensions, is
/// returned unchanged and reported as degenerate.
#[tracing::instrument(skip(raster), fields(width = raster.width, height = raster.height))]
pub fn trim_transparent(raster: &ExportRaster, margin: u32) -> Trimmed {
    let expected = (raster.width as usize)
        .checked_mul(raster.height as usize)
        .and_then(|n| n.checked_mul(4));
    if expected != Some(raster.data.len()) {
        tracing::warn!(
            bytes = raster.data.len(),
            "raster buffer does not match its dimensions, exporting untrimmed"
        );
        return Trimmed {
            raster: raster.clone(),
            bounds: None,
        };
    }
    let Some(tight) = content_bounds(raster) else {
        tracing::warn!("degenerate raster: no visible pixels, exporting untrimmed");
        return Trimmed {
            raster: raster.clone(),
            bounds: None,
        };
    };
    let b = tight.expand(margin, raster.width, raster.height);

    let src_stride = raster.width as usize * 4;
    let row_bytes = b.width() as usize * 4;
    let mut data = Vec::with_capacity(row_bytes * b.height() as usize);
    for y in b.top..=b.bottom {
        let start = y as usize * src_stride + b.left as usize * 4;
        data.extend_from_slice(&raster.data[start..start + row_bytes]);
    }
    tracing::debug!(?b, "trimmed export raster");

    Trimmed {
        raster: ExportRaster {
            width: b.width(),
            height: b.height(),
            data,
        },
        bounds: Some(b),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/trim.rs"]
mod tests;
