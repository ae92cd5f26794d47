//! Filter variants and composition.
//!
//! [`Filter`] is a tagged value: a variant plus an optional display
//! name. Applying a filter is a pure function from one buffer to a new
//! one — filters hold no state, retain no references to inputs or
//! outputs, and can be shared freely once built.
//!
//! The do-nothing [`FilterKind::Noop`] variant still returns a copy, so
//! callers can rely on every `apply` producing a distinct buffer.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::convolve;
use crate::kernel::{GradientMatrix, Kernel};

/// An opaque R,G,B color used by [`FilterKind::Threshold`].
pub type Rgb = [u8; 3];

/// A bitmap filter: a variant and an optional display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    name: Option<String>,
    kind: FilterKind,
}

/// The available filter variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterKind {
    /// Returns a pixel-identical copy of the input.
    Noop,
    /// Replaces every pixel with the arithmetic mean of its B, G, and R
    /// channels.
    BlackWhite,
    /// Two-color output gated on normalized perceived luminance:
    /// pixels inside `[min, max]` become white, the rest become `color`.
    Threshold {
        /// Lower luminance bound, inclusive.
        min: f64,
        /// Upper luminance bound, inclusive.
        max: f64,
        /// Color applied outside the luminance interval.
        color: Rgb,
    },
    /// Single-matrix convolution with an optional grayscale pre-pass.
    MatrixEdge {
        /// Convolution matrix.
        kernel: Kernel,
        /// Run the perceived-luminance pre-pass first.
        grayscale: bool,
        /// Scale applied to each weighted sum.
        factor: f64,
        /// Offset added after scaling.
        bias: f64,
    },
    /// X/Y gradient-magnitude convolution with an optional grayscale
    /// pre-pass.
    MatrixEdgeXy {
        /// Horizontal-gradient matrix.
        x_matrix: GradientMatrix,
        /// Vertical-gradient matrix.
        y_matrix: GradientMatrix,
        /// Run the perceived-luminance pre-pass first.
        grayscale: bool,
    },
    /// Sequential composition: each child's output feeds the next
    /// child's input.
    Chain(Vec<Filter>),
}

impl Filter {
    /// Build an unnamed filter of the given kind.
    #[must_use]
    pub const fn new(kind: FilterKind) -> Self {
        Self { name: None, kind }
    }

    /// Attach a display name, replacing any synthesized one.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The do-nothing filter.
    #[must_use]
    pub const fn noop() -> Self {
        Self::new(FilterKind::Noop)
    }

    /// Channel-averaging black-and-white filter.
    #[must_use]
    pub const fn black_white() -> Self {
        Self::new(FilterKind::BlackWhite)
    }

    /// Luminance-gated two-color filter.
    #[must_use]
    pub const fn threshold(min: f64, max: f64, color: Rgb) -> Self {
        Self::new(FilterKind::Threshold { min, max, color })
    }

    /// Single-matrix edge-detection filter.
    #[must_use]
    pub const fn matrix_edge(kernel: Kernel, grayscale: bool, factor: f64, bias: f64) -> Self {
        Self::new(FilterKind::MatrixEdge {
            kernel,
            grayscale,
            factor,
            bias,
        })
    }

    /// X/Y gradient-pair edge-detection filter.
    #[must_use]
    pub const fn matrix_edge_xy(
        x_matrix: GradientMatrix,
        y_matrix: GradientMatrix,
        grayscale: bool,
    ) -> Self {
        Self::new(FilterKind::MatrixEdgeXy {
            x_matrix,
            y_matrix,
            grayscale,
        })
    }

    /// Sequential composition of `filters`, applied front to back.
    #[must_use]
    pub const fn chain(filters: Vec<Self>) -> Self {
        Self::new(FilterKind::Chain(filters))
    }

    /// The filter's display name.
    ///
    /// The explicit name wins when set. Unnamed chains synthesize a
    /// name from their children in reverse order joined with `" of "`,
    /// so the outermost transformation reads first ("Laplacian of
    /// Gaussian" style).
    #[must_use]
    pub fn name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.kind {
            FilterKind::Noop => "None".to_owned(),
            FilterKind::BlackWhite => "Black and white".to_owned(),
            FilterKind::Threshold { .. } => "Threshold".to_owned(),
            FilterKind::MatrixEdge { .. } => "Matrix edge".to_owned(),
            FilterKind::MatrixEdgeXy { .. } => "Matrix edge (XY)".to_owned(),
            FilterKind::Chain(children) => children
                .iter()
                .rev()
                .map(Self::name)
                .collect::<Vec<_>>()
                .join(" of "),
        }
    }

    /// `true` when this is the do-nothing filter.
    ///
    /// The editor treats Noop as "no filter selected"; this is a tag
    /// comparison on the variant, not a type-identity check.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.kind, FilterKind::Noop)
    }

    /// The filter's variant.
    #[must_use]
    pub const fn kind(&self) -> &FilterKind {
        &self.kind
    }

    /// Apply the filter, producing a new buffer.
    ///
    /// Every variant allocates a fresh result; the no-op filter returns
    /// a pixel-identical copy rather than handing back the input.
    #[must_use = "filters return a new buffer; the input is unchanged"]
    pub fn apply(&self, src: &PixelBuffer) -> PixelBuffer {
        match &self.kind {
            FilterKind::Noop => src.clone(),
            FilterKind::BlackWhite => black_white(src),
            FilterKind::Threshold { min, max, color } => threshold(src, *min, *max, *color),
            FilterKind::MatrixEdge {
                kernel,
                grayscale,
                factor,
                bias,
            } => {
                if *grayscale {
                    convolve::simple_convolution(&convolve::grayscale(src), kernel, *factor, *bias)
                } else {
                    convolve::simple_convolution(src, kernel, *factor, *bias)
                }
            }
            FilterKind::MatrixEdgeXy {
                x_matrix,
                y_matrix,
                grayscale,
            } => {
                if *grayscale {
                    convolve::xy_convolution(&convolve::grayscale(src), x_matrix, y_matrix)
                } else {
                    convolve::xy_convolution(src, x_matrix, y_matrix)
                }
            }
            FilterKind::Chain(children) => {
                let mut current = src.clone();
                for child in children {
                    current = child.apply(&current);
                }
                current
            }
        }
    }
}

/// Arithmetic-mean grayscale: every channel becomes `(B + G + R) / 3`
/// (integer division), alpha forced to 255.
fn black_white(src: &PixelBuffer) -> PixelBuffer {
    let mut data = src.data().to_vec();
    for px in data.chunks_exact_mut(4) {
        let sum = u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2]);
        #[expect(clippy::cast_possible_truncation)]
        let avg = (sum / 3) as u8;
        px[0] = avg;
        px[1] = avg;
        px[2] = avg;
        px[3] = 255;
    }
    PixelBuffer::like(src, data)
}

/// Two-color luminance gate. Luminance is the perceived-luminance
/// formula over channels normalized to `[0, 1]`; both interval bounds
/// are inclusive.
#[expect(clippy::suboptimal_flops)]
fn threshold(src: &PixelBuffer, min: f64, max: f64, color: Rgb) -> PixelBuffer {
    let [r, g, b] = color;
    let mut data = src.data().to_vec();
    for px in data.chunks_exact_mut(4) {
        let luminance = f64::from(px[0]) / 255.0 * convolve::LUMA_B
            + f64::from(px[1]) / 255.0 * convolve::LUMA_G
            + f64::from(px[2]) / 255.0 * convolve::LUMA_R;
        if luminance >= min && luminance <= max {
            px[0] = 255;
            px[1] = 255;
            px[2] = 255;
        } else {
            px[0] = b;
            px[1] = g;
            px[2] = r;
        }
        px[3] = 255;
    }
    PixelBuffer::like(src, data)
}
