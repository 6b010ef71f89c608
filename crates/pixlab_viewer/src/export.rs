//! PNG export of a finished frame.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use pixlab_core::PixelBuffer;

/// Convert to 8-bit RGBA with the buffer's bottom row at the bottom of the image.
///
/// Channels are clamped to [0, 1]. Alpha is always opaque because the fourth
/// channel holds depth during rasterization.
pub fn to_rgba_image(buffer: &PixelBuffer) -> RgbaImage {
    let height = buffer.height();

    RgbaImage::from_fn(buffer.width(), height, |x, y| {
        let source_y = (height - 1 - y) as i64;
        let mut rgba = [0, 0, 0, u8::MAX];
        if let Some(pixel) = buffer.read(x as i64, source_y) {
            for (out, value) in rgba.iter_mut().zip(pixel.iter().take(3)) {
                *out = to_byte(*value);
            }
        }
        Rgba(rgba)
    })
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Write `buffer` to `path` as a PNG.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    to_rgba_image(buffer)
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}
