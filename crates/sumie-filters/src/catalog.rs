//! Pre-configured filter catalogs.
//!
//! The editor surfaces two fixed catalogs — pixel filters and
//! edge-detection filters — each with a "None" entry first, so "no
//! filter selected" is reachable through the catalog itself. The
//! [`presets`] module carries the wider kernel library for callers that
//! want more than the defaults.

use crate::filter::Filter;
use crate::kernel::Kernel;

/// The pixel (color-remap) filter catalog. Never empty; "None" first.
#[must_use]
pub fn pixel_filters() -> Vec<Filter> {
    vec![
        Filter::noop().with_name("None"),
        Filter::black_white().with_name("Black and white"),
        Filter::threshold(0.35, 0.65, [0, 0, 0]).with_name("Threshold filter (black)"),
    ]
}

/// The edge-detection filter catalog. Never empty; "None" first.
#[must_use]
pub fn edge_filters() -> Vec<Filter> {
    vec![
        Filter::noop().with_name("None"),
        Filter::matrix_edge(Kernel::laplacian_3x3(), false, 1.0, 0.0).with_name("Laplacian 3x3"),
        Filter::matrix_edge(Kernel::laplacian_3x3(), true, 1.0, 0.0)
            .with_name("Laplacian 3x3 (grayscale)"),
        Filter::matrix_edge(Kernel::laplacian_5x5(), false, 1.0, 0.0).with_name("Laplacian 5x5"),
        Filter::matrix_edge(Kernel::laplacian_5x5(), true, 1.0, 0.0)
            .with_name("Laplacian 5x5 (grayscale)"),
    ]
}

/// Edge-detection presets beyond the fixed catalog.
pub mod presets {
    use crate::filter::Filter;
    use crate::kernel::{
        KIRSCH_X, KIRSCH_Y, Kernel, PREWITT_X, PREWITT_Y, SOBEL_X, SOBEL_Y,
    };

    /// Sobel gradient-magnitude edge detection.
    #[must_use]
    pub fn sobel(grayscale: bool) -> Filter {
        Filter::matrix_edge_xy(SOBEL_X, SOBEL_Y, grayscale).with_name(if grayscale {
            "Sobel (grayscale)"
        } else {
            "Sobel"
        })
    }

    /// Prewitt gradient-magnitude edge detection.
    #[must_use]
    pub fn prewitt(grayscale: bool) -> Filter {
        Filter::matrix_edge_xy(PREWITT_X, PREWITT_Y, grayscale).with_name(if grayscale {
            "Prewitt (grayscale)"
        } else {
            "Prewitt"
        })
    }

    /// Kirsch gradient-magnitude edge detection.
    #[must_use]
    pub fn kirsch(grayscale: bool) -> Filter {
        Filter::matrix_edge_xy(KIRSCH_X, KIRSCH_Y, grayscale).with_name(if grayscale {
            "Kirsch (grayscale)"
        } else {
            "Kirsch"
        })
    }

    /// 5x5 Laplacian of Gaussian over a grayscale pre-pass.
    #[must_use]
    pub fn laplacian_of_gaussian() -> Filter {
        Filter::matrix_edge(Kernel::laplacian_of_gaussian(), true, 1.0, 0.0)
            .with_name("Laplacian of Gaussian")
    }

    /// 3x3 Gaussian smoothing, normalized by its weight sum.
    #[must_use]
    pub fn gaussian_3x3() -> Filter {
        Filter::matrix_edge(Kernel::gaussian_3x3(), false, 1.0 / 16.0, 0.0)
            .with_name("Gaussian 3x3")
    }

    /// Every preset, for name-based lookup alongside the catalogs.
    #[must_use]
    pub fn all() -> Vec<Filter> {
        vec![
            sobel(false),
            sobel(true),
            prewitt(false),
            prewitt(true),
            kirsch(false),
            kirsch(true),
            laplacian_of_gaussian(),
            gaussian_3x3(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterKind;

    #[test]
    fn catalogs_are_non_empty_with_none_first() {
        let pixel = pixel_filters();
        let edge = edge_filters();
        assert!(!pixel.is_empty());
        assert!(!edge.is_empty());
        assert!(pixel[0].is_noop());
        assert!(edge[0].is_noop());
        assert_eq!(pixel[0].name(), "None");
        assert_eq!(edge[0].name(), "None");
    }

    #[test]
    fn pixel_catalog_contents() {
        let names: Vec<String> = pixel_filters().iter().map(Filter::name).collect();
        assert_eq!(
            names,
            ["None", "Black and white", "Threshold filter (black)"],
        );
    }

    #[test]
    fn edge_catalog_contents() {
        let names: Vec<String> = edge_filters().iter().map(Filter::name).collect();
        assert_eq!(
            names,
            [
                "None",
                "Laplacian 3x3",
                "Laplacian 3x3 (grayscale)",
                "Laplacian 5x5",
                "Laplacian 5x5 (grayscale)",
            ],
        );
    }

    #[test]
    fn edge_catalog_kernels_are_configured() {
        for filter in edge_filters().iter().skip(1) {
            assert!(
                matches!(
                    filter.kind(),
                    FilterKind::MatrixEdge { factor, bias, .. }
                        if (factor - 1.0).abs() < f64::EPSILON && bias.abs() < f64::EPSILON
                ),
                "unexpected catalog variant: {:?}",
                filter.kind(),
            );
        }
    }

    #[test]
    fn presets_cover_gradient_pairs() {
        let all = presets::all();
        assert!(!all.is_empty());
        let xy_count = all
            .iter()
            .filter(|f| matches!(f.kind(), FilterKind::MatrixEdgeXy { .. }))
            .count();
        assert_eq!(xy_count, 6);
    }
}
