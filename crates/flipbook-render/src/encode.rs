//! Compression of rendered pages

use flipbook_core::{FlipbookError, ImageFormat, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{Rgb, RgbImage, RgbaImage};

/// Encode a rendered page. JPEG has no alpha, so transparent pixels are
/// composited onto white first.
pub fn encode(rgba: &RgbaImage, format: ImageFormat, quality: u8, page: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();

    match format {
        ImageFormat::Jpeg => {
            let rgb = flatten_on_white(rgba);
            let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)
                .map_err(|e| FlipbookError::render(page, format!("JPEG encoding failed: {}", e)))?;
        }
        ImageFormat::Png => {
            let encoder = PngEncoder::new(&mut bytes);
            rgba.write_with_encoder(encoder)
                .map_err(|e| FlipbookError::render(page, format!("PNG encoding failed: {}", e)))?;
        }
    }

    Ok(bytes)
}

pub fn flatten_on_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
