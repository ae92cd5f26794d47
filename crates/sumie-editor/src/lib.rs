//! sumie-editor: the bitmap editing state machine.
//!
//! Sits between the pure filter core (`sumie-filters`) and the outside
//! world. The [`BitmapEditor`] owns the loaded image, its preview, and
//! the two active filters; its collaborators — a [`BitmapStore`] for
//! files and a [`BitmapViewer`] for display — are trait objects
//! injected at construction.
//!
//! State is derived, never stored: after every mutation the editor
//! recomputes [`EditorState`] from what it holds and pushes the
//! resulting status, message, and control enablement at the viewer.

pub mod editor;
pub mod error;
pub mod preview;
pub mod state;
pub mod traits;

pub use editor::BitmapEditor;
pub use error::{EditorError, FileIoError};
pub use state::{EditorState, EditorStatus};
pub use traits::{BitmapStore, BitmapViewer};
