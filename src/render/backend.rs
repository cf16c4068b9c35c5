use crate::foundation::core::{Orientation, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::layout::geometry::CardGeometry;
use crate::layout::solver::SolvedLayout;
use crate::theme::catalog::Theme;

/// Largest export scale for file downloads.
pub const DOWNLOAD_SCALE_CAP: f64 = 3.0;
/// Largest export scale for clipboard copies.
pub const COPY_SCALE_CAP: f64 = 2.0;

/// A captured card as RGBA8 pixels.
///
/// Unlike the renderer's internal surfaces, export rasters are **straight alpha** so they can
/// be handed to PNG encoders and clipboards unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRaster {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl ExportRaster {
    /// Wrap `data`, checking it holds exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> CardResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| CardError::validation("raster dimensions overflow"))?;
        if data.len() != expected {
            return Err(CardError::validation(format!(
                "raster {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fully transparent raster.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Everything a [`Renderer`] needs to capture one card.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    pub layout: &'a SolvedLayout,
    pub geometry: &'a CardGeometry,
    pub theme: &'a Theme,
    /// Attribution drawn in the card's bottom-right corner. Blank means none.
    pub author: Option<&'a str>,
    /// Device pixels per CSS pixel.
    pub scale: f64,
}

/// Capture a laid-out card into an [`ExportRaster`].
///
/// Implementations read the layout and never change it.
pub trait Renderer {
    fn render(&mut self, req: &RenderRequest<'_>) -> CardResult<ExportRaster>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, req: &RenderRequest<'_>) -> CardResult<ExportRaster> {
        (**self).render(req)
    }
}

/// Scale that fits `frame` into the orientation's export target, capped at `cap`.
pub fn export_scale(frame: Size, orientation: Orientation, cap: f64) -> f64 {
    let (tw, th) = orientation.export_target();
    let fit = (f64::from(tw) / frame.width).min(f64::from(th) / frame.height);
    if fit.is_finite() && fit > 0.0 {
        fit.min(cap)
    } else {
        cap
    }
}

/// Pixel size of `frame` captured at `scale`.
///
/// Sizes are rounded up; each side must fit the rasterizer's `u16` surface limit.
pub fn raster_size(frame: Size, scale: f64) -> CardResult<(u16, u16)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(CardError::render("export scale must be finite and > 0"));
    }
    let side = |v: f64| -> CardResult<u16> {
        let px = (v * scale).ceil();
        if !px.is_finite() || px < 1.0 || px > f64::from(u16::MAX) {
            return Err(CardError::render(format!(
                "raster side {px} is outside 1..={}",
                u16::MAX
            )));
        }
        Ok(px as u16)
    };
    Ok((side(frame.width)?, side(frame.height)?))
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
