//! Editor and file-collaborator error types.

use std::path::PathBuf;

/// Errors surfaced by a [`crate::BitmapStore`] implementation.
///
/// The variants carry the offending path plus a display string rather
/// than a concrete source type, so the trait stays object-safe and
/// implementation-agnostic.
#[derive(Debug, thiserror::Error)]
pub enum FileIoError {
    /// The file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file exists but its content could not be decoded as an image.
    #[error("failed to decode {}: {reason}", path.display())]
    Decode {
        /// Path that was read.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// The bitmap could not be encoded to the destination format.
    #[error("failed to encode {}: {reason}", path.display())]
    Encode {
        /// Path that was written.
        path: PathBuf,
        /// Encoder message.
        reason: String,
    },

    /// Any other filesystem failure.
    #[error("i/o failure on {}: {reason}", path.display())]
    Io {
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying message.
        reason: String,
    },
}

/// Errors returned by [`crate::BitmapEditor`] operations.
///
/// Store failures pass through transparently — the editor neither wraps
/// nor translates them, and its own state is left untouched when one
/// occurs.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A save was requested with no image loaded.
    #[error("no image loaded")]
    NoImage,

    /// A failure propagated from the file collaborator.
    #[error(transparent)]
    Io(#[from] FileIoError),
}
