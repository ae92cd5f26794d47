//! Preview generation.
//!
//! The preview is a downscaled (or upscaled), aspect-preserving copy of
//! the original whose longer side equals the viewer's square size.
//! Resampling is Catmull-Rom — the `image` crate's bicubic — so the
//! preview stays smooth at interactive sizes. Callers should treat the
//! exact pixel values as unspecified; only the dimension policy is part
//! of the contract.

use image::DynamicImage;
use image::imageops::FilterType;
use sumie_filters::PixelBuffer;

/// Resize `src` so its longer dimension equals `square_side`,
/// preserving aspect ratio; an already-square image becomes exactly
/// `square_side x square_side`.
#[must_use = "returns the resized preview buffer"]
pub fn create_preview(src: &PixelBuffer, square_side: u32) -> PixelBuffer {
    let resized = DynamicImage::ImageRgba8(src.to_rgba_image()).resize(
        square_side,
        square_side,
        FilterType::CatmullRom,
    );
    PixelBuffer::from_rgba_image(&resized.to_rgba8())
}
