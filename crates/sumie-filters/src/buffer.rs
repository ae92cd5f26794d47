//! Fixed-format in-memory bitmap representation.
//!
//! A [`PixelBuffer`] stores 32-bit pixels in B,G,R,A byte order,
//! row-major with an explicit stride (bytes per row). The stride is
//! threaded through every operation so buffers with row padding index
//! correctly; nothing in this crate assumes `stride == width * 4`.
//!
//! Buffers are value types: filters take a reference and return a new
//! buffer, never mutating the input in place.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Bytes per pixel: blue, green, red, alpha.
pub const BYTES_PER_PIXEL: u32 = 4;

/// An in-memory bitmap: B,G,R,A bytes, row-major with explicit stride.
///
/// Invariants, enforced at construction: `stride >= width * 4` and
/// `data.len() == stride * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer (transparent black) with a packed
    /// stride of `width * 4`.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width * BYTES_PER_PIXEL;
        let data = vec![0; stride as usize * height as usize];
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Build a buffer from raw B,G,R,A bytes with an explicit stride.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::StrideTooSmall`] if `stride < width * 4`,
    /// or [`FilterError::DataLength`] if `data.len() != stride * height`.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: u32,
        data: Vec<u8>,
    ) -> Result<Self, FilterError> {
        if stride < width * BYTES_PER_PIXEL {
            return Err(FilterError::StrideTooSmall { width, stride });
        }
        let expected = stride as usize * height as usize;
        if data.len() != expected {
            return Err(FilterError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Internal constructor for results that share a source buffer's
    /// shape; `data` length is correct by construction at every call site.
    pub(crate) fn like(other: &Self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), other.data.len());
        Self {
            width: other.width,
            height: other.height,
            stride: other.stride,
            data,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row, including any padding.
    #[must_use]
    pub const fn stride(&self) -> u32 {
        self.stride
    }

    /// The raw B,G,R,A bytes, `stride * height` long.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The B,G,R,A bytes of the pixel at `(x, y)`, or `None` when the
    /// coordinates fall outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.byte_offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Overwrite the pixel at `(x, y)` with B,G,R,A bytes.
    ///
    /// Returns `false` (leaving the buffer untouched) when the
    /// coordinates fall outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, bgra: [u8; 4]) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.byte_offset(x, y);
        self.data[i..i + 4].copy_from_slice(&bgra);
        true
    }

    /// Convert a decoded RGBA image into a packed B,G,R,A buffer.
    #[must_use]
    pub fn from_rgba_image(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut out = Self::new(width, height);
        for (src, dst) in img
            .as_raw()
            .chunks_exact(4)
            .zip(out.data.chunks_exact_mut(4))
        {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[3];
        }
        out
    }

    /// Convert to an RGBA image, dropping any row padding.
    #[must_use]
    pub fn to_rgba_image(&self) -> RgbaImage {
        let row_bytes = self.width as usize * BYTES_PER_PIXEL as usize;
        let mut raw = Vec::with_capacity(row_bytes * self.height as usize);
        for y in 0..self.height {
            let start = y as usize * self.stride as usize;
            for px in self.data[start..start + row_bytes].chunks_exact(4) {
                raw.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
        }
        // Length matches the dimensions by construction, so the fallback
        // is unreachable.
        RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    fn byte_offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride as usize + x as usize * BYTES_PER_PIXEL as usize
    }
}

/// Serde proxy: `(width, height, stride, bytes)`.
///
/// Deserialization re-validates through [`PixelBuffer::from_raw`] so
/// untrusted input cannot violate the length invariant.
#[derive(Serialize, Deserialize)]
struct PixelBufferProxy(u32, u32, u32, Vec<u8>);

impl Serialize for PixelBuffer {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PixelBufferProxy(self.width, self.height, self.stride, self.data.clone())
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PixelBuffer {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let PixelBufferProxy(width, height, stride, data) =
            PixelBufferProxy::deserialize(deserializer)?;
        Self::from_raw(width, height, stride, data).map_err(serde::de::Error::custom)
    }
}
