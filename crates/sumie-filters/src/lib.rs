//! sumie-filters: Pure bitmap filtering core (sans-IO).
//!
//! In-memory B,G,R,A pixel buffers, a convolution engine for
//! edge-detection kernels, and a composable [`Filter`] type covering
//! whole-image color remaps (channel averaging, luminance thresholding)
//! and 3x3/5x5 convolution-based edge detection.
//!
//! This crate has **no I/O** — it operates on in-memory buffers and
//! returns new buffers. File decoding/encoding lives in `sumie-io`; the
//! editing state machine that drives these filters lives in
//! `sumie-editor`.

pub mod buffer;
pub mod catalog;
pub mod convolve;
pub mod error;
pub mod filter;
pub mod kernel;

pub use buffer::PixelBuffer;
pub use error::FilterError;
pub use filter::{Filter, FilterKind, Rgb};
pub use kernel::{GradientMatrix, Kernel};
