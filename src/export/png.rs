use std::io::Cursor;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{CardError, CardResult};
use crate::render::backend::ExportRaster;

/// MIME type of every export payload.
pub const PNG_MIME: &str = "image/png";

/// Encode a straight-alpha raster as PNG.
pub fn encode_png(raster: &ExportRaster) -> CardResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(raster.width, raster.height, raster.data.clone())
        .ok_or_else(|| {
            CardError::export(format!(
                "raster {}x{} does not match its {} bytes",
                raster.width,
                raster.height,
                raster.data.len()
            ))
        })?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Decode PNG bytes back into a straight-alpha raster.
pub fn decode_png(bytes: &[u8]) -> CardResult<ExportRaster> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .context("decode png")?
        .to_rgba8();
    let (width, height) = img.dimensions();
    ExportRaster::new(width, height, img.into_raw())
}

/// `data:image/png;base64,...` URL for encoded PNG bytes.
pub fn png_data_url(png: &[u8]) -> String {
    format!(
        "data:{PNG_MIME};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
