//! Canvas normalization for uploaded photos.
//!
//! The image-edit provider mandates fixed dimensions, so every upload is
//! fit-contain resized onto an opaque white 1024x1024 canvas and re-encoded
//! as PNG. The edit mask is a constant full-coverage artifact independent of
//! image content.
use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageOutputFormat, Rgba, RgbaImage};

use crate::error::{AppError, AppResult};

/// Side length of the square canvas required by the provider.
pub const CANVAS_SIZE: u32 = 1024;

/// Ceiling on the normalized PNG accepted by the provider.
pub const MAX_PROCESSED_BYTES: usize = 4 * 1024 * 1024;

/// Decode an uploaded PNG/JPEG and normalize it to the provider canvas.
///
/// The input is scaled to fit within `CANVAS_SIZE` while preserving aspect
/// ratio, centered on an opaque white square, and re-encoded as PNG. Returns
/// `PayloadTooLarge` if the result exceeds `MAX_PROCESSED_BYTES`.
pub fn normalize_to_canvas(image_bytes: &[u8]) -> AppResult<Vec<u8>> {
    let decoded = image::load_from_memory(image_bytes)?;
    let resized = decoded.resize(CANVAS_SIZE, CANVAS_SIZE, FilterType::Lanczos3);

    let mut canvas = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgba([255, 255, 255, 255]));
    let x = i64::from((CANVAS_SIZE - resized.width()) / 2);
    let y = i64::from((CANVAS_SIZE - resized.height()) / 2);
    imageops::overlay(&mut canvas, &resized.to_rgba8(), x, y);

    let out = encode_png(canvas)?;
    ensure_within_ceiling(out.len())?;
    Ok(out)
}

/// Build the edit mask: an opaque white canvas marking the whole image as
/// editable. Always full coverage, regardless of image content.
pub fn full_edit_mask() -> AppResult<Vec<u8>> {
    let mask = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgba([255, 255, 255, 255]));
    encode_png(mask)
}

pub fn ensure_within_ceiling(size: usize) -> AppResult<()> {
    if size > MAX_PROCESSED_BYTES {
        return Err(AppError::PayloadTooLarge {
            size,
            max: MAX_PROCESSED_BYTES,
        });
    }
    Ok(())
}

fn encode_png(canvas: RgbaImage) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(canvas).write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)?;
    Ok(buf)
}
