//! Derived editor state and status reporting.
//!
//! The editor never stores its state; it derives it from what it holds
//! — an image or not, a pixel filter or not, an edge filter or not —
//! and broadcasts the result to the viewer after every mutation.

use serde::{Deserialize, Serialize};

/// Severity of a status broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorStatus {
    /// Everything needed to save is configured.
    Ok,
    /// An image or a filter selection is still missing.
    Warning,
}

/// The editor's derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorState {
    /// No image has been loaded.
    NoImage,
    /// An image is loaded but neither filter is selected.
    NoFilter,
    /// An image and a pixel filter are set, but no edge filter.
    NoEdgeFilter,
    /// An image and an edge filter are set; ready to save.
    Ready,
}

impl EditorState {
    /// Derive the state from what the editor currently holds.
    ///
    /// An edge filter alone is enough for [`EditorState::Ready`]; the
    /// pixel filter only distinguishes [`EditorState::NoFilter`] from
    /// [`EditorState::NoEdgeFilter`].
    #[must_use]
    pub const fn derive(has_image: bool, has_pixel_filter: bool, has_edge_filter: bool) -> Self {
        if !has_image {
            Self::NoImage
        } else if !has_pixel_filter && !has_edge_filter {
            Self::NoFilter
        } else if !has_edge_filter {
            Self::NoEdgeFilter
        } else {
            Self::Ready
        }
    }

    /// Status severity for this state.
    #[must_use]
    pub const fn status(self) -> EditorStatus {
        match self {
            Self::NoImage | Self::NoFilter | Self::NoEdgeFilter => EditorStatus::Warning,
            Self::Ready => EditorStatus::Ok,
        }
    }

    /// Human-readable status message for this state.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoImage => "No image chosen",
            Self::NoFilter => "No filter applied",
            Self::NoEdgeFilter => "No edge detection filter applied",
            Self::Ready => "Edge detection applied. Ready to save.",
        }
    }

    /// Whether editing controls should be enabled: anything with an
    /// image loaded.
    #[must_use]
    pub const fn controls_enabled(self) -> bool {
        !matches!(self, Self::NoImage)
    }
}
