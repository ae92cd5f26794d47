//! sumie-io: filesystem implementation of the editor's bitmap store.
//!
//! [`FileBitmapStore`] decodes any format the `image` crate recognizes
//! and encodes by destination extension: `.bmp` becomes BMP,
//! `.jpg`/`.jpeg` becomes JPEG, and everything else falls back to PNG.
//! Failures map onto [`FileIoError`]; nothing here panics or swallows
//! an error into a boolean.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat};
use sumie_editor::{BitmapStore, FileIoError};
use sumie_filters::PixelBuffer;

/// Reads and writes bitmaps on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileBitmapStore;

impl FileBitmapStore {
    /// Build a store. Stateless; one value can serve any number of
    /// reads and writes.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BitmapStore for FileBitmapStore {
    fn read_bitmap(&self, path: &Path) -> Result<PixelBuffer, FileIoError> {
        log::debug!("reading bitmap from {}", path.display());
        let img = image::open(path).map_err(|err| read_error(path, err))?;
        Ok(PixelBuffer::from_rgba_image(&img.to_rgba8()))
    }

    fn write_bitmap(&self, bitmap: &PixelBuffer, path: &Path) -> Result<(), FileIoError> {
        let format = format_for(path);
        log::debug!("writing {format:?} bitmap to {}", path.display());

        let rgba = bitmap.to_rgba_image();
        let result = if format == ImageFormat::Jpeg {
            // The JPEG encoder rejects alpha; flatten to RGB first.
            DynamicImage::ImageRgba8(rgba)
                .to_rgb8()
                .save_with_format(path, format)
        } else {
            rgba.save_with_format(path, format)
        };
        result.map_err(|err| write_error(path, err))
    }
}

/// Encoding format for a destination path, chosen by extension
/// (case-insensitive). Unknown and missing extensions fall back to PNG.
fn format_for(path: &Path) -> ImageFormat {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("bmp") => ImageFormat::Bmp,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    }
}

fn read_error(path: &Path, err: ImageError) -> FileIoError {
    let path = PathBuf::from(path);
    match err {
        ImageError::IoError(io) if io.kind() == ErrorKind::NotFound => {
            FileIoError::NotFound { path }
        }
        ImageError::IoError(io) => FileIoError::Io {
            path,
            reason: io.to_string(),
        },
        other => FileIoError::Decode {
            path,
            reason: other.to_string(),
        },
    }
}

fn write_error(path: &Path, err: ImageError) -> FileIoError {
    let path = PathBuf::from(path);
    match err {
        ImageError::IoError(io) => FileIoError::Io {
            path,
            reason: io.to_string(),
        },
        other => FileIoError::Encode {
            path,
            reason: other.to_string(),
        },
    }
}
