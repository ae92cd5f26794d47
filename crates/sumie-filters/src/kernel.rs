//! Convolution kernels.
//!
//! [`Kernel`] is a square, odd-sized matrix of `f64` weights used by
//! single-matrix convolution. X/Y gradient pairs are plain
//! [`GradientMatrix`] values: the 3x3 restriction is carried by the
//! type, so no runtime check is needed.
//!
//! The preset constructors reproduce the classic edge-detection and
//! smoothing matrices: Laplacian 3x3/5x5, Laplacian of Gaussian,
//! Gaussian 3x3, and the Sobel/Prewitt/Kirsch gradient pairs.

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// A fixed 3x3 matrix used in X/Y pairs for gradient-magnitude
/// convolution.
pub type GradientMatrix = [[f64; 3]; 3];

/// A square, odd-sized convolution matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from rows of weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyKernel`] for zero rows,
    /// [`FilterError::KernelNotSquare`] when any row length differs from
    /// the row count, and [`FilterError::KernelEvenSize`] for even side
    /// lengths (an even kernel has no center pixel).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, FilterError> {
        let size = rows.len();
        if size == 0 {
            return Err(FilterError::EmptyKernel);
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != size) {
            return Err(FilterError::KernelNotSquare {
                rows: size,
                cols: bad.len(),
            });
        }
        if size % 2 == 0 {
            return Err(FilterError::KernelEvenSize { size });
        }
        Ok(Self {
            size,
            weights: rows.into_iter().flatten().collect(),
        })
    }

    /// Infallible constructor for the presets below; `N` is odd at
    /// every call site.
    fn from_array<const N: usize>(rows: [[f64; N]; N]) -> Self {
        debug_assert!(N % 2 == 1);
        Self {
            size: N,
            weights: rows.into_iter().flatten().collect(),
        }
    }

    /// Side length of the kernel.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Half-width of the kernel window: `(size - 1) / 2`.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Row-major weights, `size * size` long.
    pub(crate) fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// 3x3 Laplacian: 8 at the center, -1 around it.
    #[must_use]
    pub fn laplacian_3x3() -> Self {
        Self::from_array([
            [-1.0, -1.0, -1.0],
            [-1.0, 8.0, -1.0],
            [-1.0, -1.0, -1.0],
        ])
    }

    /// 5x5 Laplacian: 24 at the center, -1 everywhere else.
    #[must_use]
    pub fn laplacian_5x5() -> Self {
        Self::from_array([
            [-1.0, -1.0, -1.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0, -1.0, -1.0],
            [-1.0, -1.0, 24.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0, -1.0, -1.0],
        ])
    }

    /// 5x5 Laplacian of Gaussian.
    #[must_use]
    pub fn laplacian_of_gaussian() -> Self {
        Self::from_array([
            [0.0, 0.0, -1.0, 0.0, 0.0],
            [0.0, -1.0, -2.0, -1.0, 0.0],
            [-1.0, -2.0, 16.0, -2.0, -1.0],
            [0.0, -1.0, -2.0, -1.0, 0.0],
            [0.0, 0.0, -1.0, 0.0, 0.0],
        ])
    }

    /// 3x3 Gaussian smoothing matrix; weights sum to 16, so pair it
    /// with a factor of 1/16 to preserve brightness.
    #[must_use]
    pub fn gaussian_3x3() -> Self {
        Self::from_array([[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]])
    }
}

/// Sobel horizontal-gradient matrix.
pub const SOBEL_X: GradientMatrix = [
    [-1.0, 0.0, 1.0],
    [-2.0, 0.0, 2.0],
    [-1.0, 0.0, 1.0],
];

/// Sobel vertical-gradient matrix.
pub const SOBEL_Y: GradientMatrix = [
    [1.0, 2.0, 1.0],
    [0.0, 0.0, 0.0],
    [-1.0, -2.0, -1.0],
];

/// Prewitt horizontal-gradient matrix.
pub const PREWITT_X: GradientMatrix = [
    [-1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
];

/// Prewitt vertical-gradient matrix.
pub const PREWITT_Y: GradientMatrix = [
    [1.0, 1.0, 1.0],
    [0.0, 0.0, 0.0],
    [-1.0, -1.0, -1.0],
];

/// Kirsch horizontal-gradient matrix.
pub const KIRSCH_X: GradientMatrix = [
    [5.0, 5.0, 5.0],
    [-3.0, 0.0, -3.0],
    [-3.0, -3.0, -3.0],
];

/// Kirsch vertical-gradient matrix.
pub const KIRSCH_Y: GradientMatrix = [
    [5.0, -3.0, -3.0],
    [5.0, 0.0, -3.0],
    [5.0, -3.0, -3.0],
];

/// Serde proxy: a kernel serializes as its rows, and deserialization
/// re-validates through [`Kernel::from_rows`].
#[derive(Serialize, Deserialize)]
struct KernelProxy(Vec<Vec<f64>>);

impl Serialize for Kernel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows = self
            .weights
            .chunks_exact(self.size)
            .map(<[f64]>::to_vec)
            .collect();
        KernelProxy(rows).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Kernel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let KernelProxy(rows) = KernelProxy::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(serde::de::Error::custom)
    }
}
