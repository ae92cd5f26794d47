//! Collaborator seams: file storage and the view.
//!
//! The editor talks to the outside world through these two traits.
//! `sumie-io` provides the filesystem [`BitmapStore`]; viewers range
//! from a GUI panel to the CLI's logging implementation. Both traits
//! are object-safe — the editor owns its collaborators as boxed trait
//! objects.

use std::path::Path;

use sumie_filters::PixelBuffer;

use crate::error::FileIoError;
use crate::state::EditorStatus;

/// Reads and writes bitmaps at filesystem paths.
pub trait BitmapStore {
    /// Decode the bitmap at `path`.
    ///
    /// # Errors
    ///
    /// [`FileIoError::NotFound`] when the path does not exist,
    /// [`FileIoError::Decode`] when its content is not a decodable
    /// image, [`FileIoError::Io`] for other filesystem failures.
    fn read_bitmap(&self, path: &Path) -> Result<PixelBuffer, FileIoError>;

    /// Encode `bitmap` to `path`, with the format chosen from the
    /// path's extension.
    ///
    /// # Errors
    ///
    /// [`FileIoError::Encode`] when encoding fails,
    /// [`FileIoError::Io`] for other filesystem failures.
    fn write_bitmap(&self, bitmap: &PixelBuffer, path: &Path) -> Result<(), FileIoError>;
}

/// Displays the editor's data: preview image, status line, and control
/// enablement.
pub trait BitmapViewer {
    /// Show the filtered preview.
    fn set_preview_bitmap(&mut self, bitmap: &PixelBuffer);

    /// Show a status message at the given severity.
    fn set_status_message(&mut self, status: EditorStatus, message: &str);

    /// Enable or disable editing controls.
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Side length, in pixels, of the square the preview must fit in.
    /// Queried once per bitmap load.
    fn preview_square_size(&self) -> u32;
}
