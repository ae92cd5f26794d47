//! Error type for buffer and kernel construction.

/// Errors raised when constructing pixel buffers or convolution kernels.
///
/// All validation happens at construction time; applying a filter to a
/// buffer is infallible once both exist.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// A buffer's stride cannot hold a full row of pixels.
    #[error("stride {stride} is too small for width {width} (4 bytes per pixel)")]
    StrideTooSmall {
        /// Requested width in pixels.
        width: u32,
        /// Requested stride in bytes.
        stride: u32,
    },

    /// A buffer's data length does not equal `stride * height`.
    #[error("pixel data is {actual} bytes, expected {expected} (stride x height)")]
    DataLength {
        /// `stride * height` in bytes.
        expected: usize,
        /// Length of the supplied data.
        actual: usize,
    },

    /// A convolution kernel was built from no rows.
    #[error("convolution kernel must not be empty")]
    EmptyKernel,

    /// A convolution kernel's row length differs from its row count.
    #[error("convolution kernel must be square, got {rows} rows with a row of {cols} columns")]
    KernelNotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Length of the offending row.
        cols: usize,
    },

    /// A convolution kernel's side length is even, so it has no center.
    #[error("convolution kernel side length must be odd, got {size}")]
    KernelEvenSize {
        /// Side length supplied.
        size: usize,
    },
}
