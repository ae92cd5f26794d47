//! Convolution engine: single-matrix and X/Y gradient-magnitude
//! convolution, plus the perceived-luminance grayscale pre-pass.
//!
//! All functions are pure: they take a source buffer and return a new
//! buffer with the same width, height, and stride. Convolution writes
//! interior pixels only — pixels within the kernel half-width of any
//! edge keep the zero bytes the result buffer is allocated with, alpha
//! included. Interior alpha is always forced to 255.
//!
//! Channel arithmetic deliberately mirrors narrowing-cast behavior:
//! values are clamped to `[0, 255]` and then truncated toward zero, so
//! fractional parts are discarded rather than rounded.

use crate::buffer::PixelBuffer;
use crate::kernel::{GradientMatrix, Kernel};

/// Perceived-luminance weight for the blue channel.
pub(crate) const LUMA_B: f64 = 0.11;
/// Perceived-luminance weight for the green channel.
pub(crate) const LUMA_G: f64 = 0.59;
/// Perceived-luminance weight for the red channel.
pub(crate) const LUMA_R: f64 = 0.3;

/// Clamp a channel value to the byte range and truncate toward zero.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Convolve `src` with a single `kernel`, scaling each weighted sum by
/// `factor` and offsetting it by `bias`.
///
/// B, G, and R are convolved independently; interior alpha is forced to
/// 255. Border pixels stay `(0, 0, 0, 0)`. Buffers too small to contain
/// any interior pixel come back fully zeroed.
#[must_use = "returns the convolved buffer; the input is unchanged"]
#[expect(clippy::suboptimal_flops)]
pub fn simple_convolution(
    src: &PixelBuffer,
    kernel: &Kernel,
    factor: f64,
    bias: f64,
) -> PixelBuffer {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let stride = src.stride() as usize;
    let size = kernel.size();
    let offset = kernel.offset();
    let weights = kernel.weights();
    let data = src.data();

    let mut result = vec![0u8; data.len()];

    for y in offset..height.saturating_sub(offset) {
        for x in offset..width.saturating_sub(offset) {
            let mut blue = 0.0;
            let mut green = 0.0;
            let mut red = 0.0;

            for ky in 0..size {
                for kx in 0..size {
                    let weight = weights[ky * size + kx];
                    let i = (y + ky - offset) * stride + (x + kx - offset) * 4;
                    blue += f64::from(data[i]) * weight;
                    green += f64::from(data[i + 1]) * weight;
                    red += f64::from(data[i + 2]) * weight;
                }
            }

            let i = y * stride + x * 4;
            result[i] = clamp_channel(factor * blue + bias);
            result[i + 1] = clamp_channel(factor * green + bias);
            result[i + 2] = clamp_channel(factor * red + bias);
            result[i + 3] = 255;
        }
    }

    PixelBuffer::like(src, result)
}

/// Convolve `src` with an X/Y gradient pair, writing the per-channel
/// gradient magnitude `sqrt(gx^2 + gy^2)`.
///
/// Same interior/border/alpha rules as [`simple_convolution`]; there is
/// no factor or bias. The matrices are fixed at 3x3 by type.
#[must_use = "returns the gradient-magnitude buffer; the input is unchanged"]
#[expect(clippy::imprecise_flops, clippy::suboptimal_flops)]
pub fn xy_convolution(
    src: &PixelBuffer,
    x_matrix: &GradientMatrix,
    y_matrix: &GradientMatrix,
) -> PixelBuffer {
    const OFFSET: usize = 1;

    let width = src.width() as usize;
    let height = src.height() as usize;
    let stride = src.stride() as usize;
    let data = src.data();

    let mut result = vec![0u8; data.len()];

    for y in OFFSET..height.saturating_sub(OFFSET) {
        for x in OFFSET..width.saturating_sub(OFFSET) {
            let mut blue_x = 0.0;
            let mut green_x = 0.0;
            let mut red_x = 0.0;
            let mut blue_y = 0.0;
            let mut green_y = 0.0;
            let mut red_y = 0.0;

            for ky in 0..3 {
                for kx in 0..3 {
                    let i = (y + ky - OFFSET) * stride + (x + kx - OFFSET) * 4;
                    let blue = f64::from(data[i]);
                    let green = f64::from(data[i + 1]);
                    let red = f64::from(data[i + 2]);

                    blue_x += blue * x_matrix[ky][kx];
                    green_x += green * x_matrix[ky][kx];
                    red_x += red * x_matrix[ky][kx];

                    blue_y += blue * y_matrix[ky][kx];
                    green_y += green * y_matrix[ky][kx];
                    red_y += red * y_matrix[ky][kx];
                }
            }

            let i = y * stride + x * 4;
            result[i] = clamp_channel((blue_x * blue_x + blue_y * blue_y).sqrt());
            result[i + 1] = clamp_channel((green_x * green_x + green_y * green_y).sqrt());
            result[i + 2] = clamp_channel((red_x * red_x + red_y * red_y).sqrt());
            result[i + 3] = 255;
        }
    }

    PixelBuffer::like(src, result)
}

/// Perceived-luminance grayscale pre-pass.
///
/// Runs over the entire buffer, border pixels included: B, G, and R are
/// replaced with `B*0.11 + G*0.59 + R*0.30` (truncated, not rounded)
/// and alpha is forced to 255.
#[must_use = "returns the grayscale buffer; the input is unchanged"]
#[expect(clippy::suboptimal_flops)]
pub fn grayscale(src: &PixelBuffer) -> PixelBuffer {
    let mut data = src.data().to_vec();
    for px in data.chunks_exact_mut(4) {
        let luma =
            f64::from(px[0]) * LUMA_B + f64::from(px[1]) * LUMA_G + f64::from(px[2]) * LUMA_R;
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let luma = luma as u8;
        px[0] = luma;
        px[1] = luma;
        px[2] = luma;
        px[3] = 255;
    }
    PixelBuffer::like(src, data)
}
