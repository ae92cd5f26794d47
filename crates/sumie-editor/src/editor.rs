//! The bitmap editing state machine.
//!
//! [`BitmapEditor`] owns the current original and preview buffers plus
//! the two active filters, and coordinates everything around them:
//! preview regeneration on load, filter application order (pixel filter
//! first, edge filter second — always), and state broadcasts to the
//! viewer after every mutation.

use std::path::Path;

use sumie_filters::{Filter, PixelBuffer, catalog};

use crate::error::EditorError;
use crate::preview::create_preview;
use crate::state::EditorState;
use crate::traits::{BitmapStore, BitmapViewer};

/// Coordinates image loading, filtering, preview generation, and
/// state reporting between a [`BitmapStore`] and a [`BitmapViewer`].
///
/// The editor exclusively owns its buffers: `original` and `preview`
/// are replaced wholesale on every load and never alias each other.
/// It is synchronous and single-threaded; share it across threads only
/// behind external synchronization.
pub struct BitmapEditor {
    store: Box<dyn BitmapStore>,
    view: Box<dyn BitmapViewer>,
    pixel_filter: Filter,
    edge_filter: Filter,
    original: Option<PixelBuffer>,
    preview: Option<PixelBuffer>,
}

impl BitmapEditor {
    /// Build an editor around its two collaborators and broadcast the
    /// initial (no image) state to the viewer.
    #[must_use]
    pub fn new(store: Box<dyn BitmapStore>, view: Box<dyn BitmapViewer>) -> Self {
        let mut editor = Self {
            store,
            view,
            pixel_filter: Filter::noop(),
            edge_filter: Filter::noop(),
            original: None,
            preview: None,
        };
        editor.check_editor_state();
        editor
    }

    /// The original bitmap with both filters applied, or `None` when no
    /// image is loaded.
    #[must_use]
    pub fn bitmap(&self) -> Option<PixelBuffer> {
        self.original.as_ref().map(|bmp| self.apply_filters(bmp))
    }

    /// Load a new bitmap: regenerate the preview at the viewer's square
    /// size, re-filter it, and re-broadcast the editor state.
    pub fn set_bitmap(&mut self, bitmap: PixelBuffer) {
        let square = self.view.preview_square_size();
        self.preview = Some(create_preview(&bitmap, square));
        self.original = Some(bitmap);
        self.apply_on_preview();
        self.check_editor_state();
    }

    /// Read the bitmap at `path` and load it.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`crate::FileIoError`] unchanged; the
    /// editor's state is untouched when the read fails.
    pub fn read_file(&mut self, path: &Path) -> Result<(), EditorError> {
        let bitmap = self.store.read_bitmap(path)?;
        self.set_bitmap(bitmap);
        Ok(())
    }

    /// Apply both filters to the original and write the result to
    /// `path`. Viewer state is not touched.
    ///
    /// # Errors
    ///
    /// [`EditorError::NoImage`] when nothing is loaded; otherwise the
    /// store's [`crate::FileIoError`] unchanged.
    pub fn write_file(&self, path: &Path) -> Result<(), EditorError> {
        let filtered = self.bitmap().ok_or(EditorError::NoImage)?;
        self.store.write_bitmap(&filtered, path)?;
        Ok(())
    }

    /// Re-filter the preview and send it to the viewer. Does nothing
    /// when no image is loaded.
    pub fn apply_on_preview(&mut self) {
        if !self.has_image() {
            return;
        }
        if let Some(preview) = &self.preview {
            let filtered = self.apply_filters(preview);
            self.view.set_preview_bitmap(&filtered);
        }
    }

    /// `true` when an image (and therefore its preview) is loaded.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.original.is_some() && self.preview.is_some()
    }

    /// `true` when the pixel filter is anything other than Noop.
    #[must_use]
    pub const fn has_pixel_filter(&self) -> bool {
        !self.pixel_filter.is_noop()
    }

    /// `true` when the edge filter is anything other than Noop.
    #[must_use]
    pub const fn has_edge_filter(&self) -> bool {
        !self.edge_filter.is_noop()
    }

    /// Select a new pixel filter, re-filter the preview, and
    /// re-broadcast the editor state.
    pub fn set_pixel_filter(&mut self, filter: Filter) {
        self.pixel_filter = filter;
        self.apply_on_preview();
        self.check_editor_state();
    }

    /// Reset the pixel filter to Noop.
    pub fn clear_pixel_filter(&mut self) {
        self.set_pixel_filter(Filter::noop());
    }

    /// Select a new edge filter, re-filter the preview, and
    /// re-broadcast the editor state.
    pub fn set_edge_filter(&mut self, filter: Filter) {
        self.edge_filter = filter;
        self.apply_on_preview();
        self.check_editor_state();
    }

    /// Reset the edge filter to Noop.
    pub fn clear_edge_filter(&mut self) {
        self.set_edge_filter(Filter::noop());
    }

    /// The fixed pixel-filter catalog. Never empty.
    #[must_use]
    pub fn pixel_filters(&self) -> Vec<Filter> {
        catalog::pixel_filters()
    }

    /// The fixed edge-filter catalog. Never empty.
    #[must_use]
    pub fn edge_filters(&self) -> Vec<Filter> {
        catalog::edge_filters()
    }

    /// Derive the current state and push controls enablement and the
    /// status message to the viewer.
    pub fn check_editor_state(&mut self) {
        let state = EditorState::derive(
            self.has_image(),
            self.has_pixel_filter(),
            self.has_edge_filter(),
        );
        self.view.set_controls_enabled(state.controls_enabled());
        self.view.set_status_message(state.status(), state.message());
    }

    /// Pixel filter first, edge filter second. Always.
    fn apply_filters(&self, bitmap: &PixelBuffer) -> PixelBuffer {
        self.edge_filter.apply(&self.pixel_filter.apply(bitmap))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use sumie_filters::FilterError;

    use super::*;
    use crate::error::FileIoError;
    use crate::state::EditorStatus;

    /// Everything the editor pushed at the viewer, in call order.
    #[derive(Debug, Clone, PartialEq)]
    enum ViewerEvent {
        Preview { width: u32, height: u32 },
        Controls(bool),
        Status(EditorStatus, String),
    }

    #[derive(Clone)]
    struct RecordingViewer {
        square: u32,
        events: Rc<RefCell<Vec<ViewerEvent>>>,
    }

    impl RecordingViewer {
        fn new(square: u32) -> (Self, Rc<RefCell<Vec<ViewerEvent>>>) {
            let events = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    square,
                    events: Rc::clone(&events),
                },
                events,
            )
        }
    }

    impl BitmapViewer for RecordingViewer {
        fn set_preview_bitmap(&mut self, bitmap: &PixelBuffer) {
            self.events.borrow_mut().push(ViewerEvent::Preview {
                width: bitmap.width(),
                height: bitmap.height(),
            });
        }

        fn set_status_message(&mut self, status: EditorStatus, message: &str) {
            self.events
                .borrow_mut()
                .push(ViewerEvent::Status(status, message.to_owned()));
        }

        fn set_controls_enabled(&mut self, enabled: bool) {
            self.events.borrow_mut().push(ViewerEvent::Controls(enabled));
        }

        fn preview_square_size(&self) -> u32 {
            self.square
        }
    }

    /// A store that serves a fixed bitmap (or an error) and records
    /// every write.
    #[derive(Clone)]
    struct StubStore {
        read_ok: Option<PixelBuffer>,
        fail_writes: bool,
        writes: Rc<RefCell<Vec<(PathBuf, PixelBuffer)>>>,
    }

    impl StubStore {
        fn serving(bitmap: PixelBuffer) -> Self {
            Self {
                read_ok: Some(bitmap),
                fail_writes: false,
                writes: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn failing() -> Self {
            Self {
                read_ok: None,
                fail_writes: true,
                writes: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl BitmapStore for StubStore {
        fn read_bitmap(&self, path: &Path) -> Result<PixelBuffer, FileIoError> {
            self.read_ok.clone().ok_or_else(|| FileIoError::NotFound {
                path: path.to_path_buf(),
            })
        }

        fn write_bitmap(&self, bitmap: &PixelBuffer, path: &Path) -> Result<(), FileIoError> {
            if self.fail_writes {
                return Err(FileIoError::Io {
                    path: path.to_path_buf(),
                    reason: "disk full".to_owned(),
                });
            }
            self.writes
                .borrow_mut()
                .push((path.to_path_buf(), bitmap.clone()));
            Ok(())
        }
    }

    fn checkerboard(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                buf.set_pixel(x, y, [v, v, v, 255]);
            }
        }
        buf
    }

    fn editor_with(
        store: StubStore,
        square: u32,
    ) -> (BitmapEditor, Rc<RefCell<Vec<ViewerEvent>>>) {
        let (viewer, events) = RecordingViewer::new(square);
        let editor = BitmapEditor::new(Box::new(store), Box::new(viewer));
        (editor, events)
    }

    #[test]
    fn construction_broadcasts_no_image_state() {
        let (_editor, events) = editor_with(StubStore::failing(), 100);
        assert_eq!(
            *events.borrow(),
            [
                ViewerEvent::Controls(false),
                ViewerEvent::Status(EditorStatus::Warning, "No image chosen".to_owned()),
            ],
        );
    }

    #[test]
    fn set_bitmap_generates_preview_and_warns_about_filters() {
        let (mut editor, events) = editor_with(StubStore::failing(), 100);
        events.borrow_mut().clear();

        editor.set_bitmap(checkerboard(200, 100));

        assert!(editor.has_image());
        assert_eq!(
            *events.borrow(),
            [
                ViewerEvent::Preview {
                    width: 100,
                    height: 50
                },
                ViewerEvent::Controls(true),
                ViewerEvent::Status(EditorStatus::Warning, "No filter applied".to_owned()),
            ],
        );
    }

    #[test]
    fn state_walk_through_filter_selection() {
        let (mut editor, events) = editor_with(StubStore::failing(), 64);
        editor.set_bitmap(checkerboard(64, 64));
        events.borrow_mut().clear();

        editor.set_pixel_filter(Filter::black_white());
        assert!(matches!(
            events.borrow().last(),
            Some(ViewerEvent::Status(EditorStatus::Warning, msg))
                if msg == "No edge detection filter applied"
        ));

        editor.set_edge_filter(Filter::black_white());
        assert!(matches!(
            events.borrow().last(),
            Some(ViewerEvent::Status(EditorStatus::Ok, msg))
                if msg == "Edge detection applied. Ready to save."
        ));
    }

    #[test]
    fn edge_filter_alone_reaches_ready() {
        let (mut editor, events) = editor_with(StubStore::failing(), 64);
        editor.set_bitmap(checkerboard(64, 64));
        editor.set_edge_filter(Filter::black_white());
        assert!(matches!(
            events.borrow().last(),
            Some(ViewerEvent::Status(EditorStatus::Ok, _))
        ));
    }

    #[test]
    fn clearing_filters_returns_to_no_filter_state() {
        let (mut editor, events) = editor_with(StubStore::failing(), 64);
        editor.set_bitmap(checkerboard(64, 64));
        editor.set_pixel_filter(Filter::black_white());
        editor.set_edge_filter(Filter::black_white());

        editor.clear_pixel_filter();
        editor.clear_edge_filter();

        assert!(!editor.has_pixel_filter());
        assert!(!editor.has_edge_filter());
        assert!(matches!(
            events.borrow().last(),
            Some(ViewerEvent::Status(EditorStatus::Warning, msg))
                if msg == "No filter applied"
        ));
    }

    #[test]
    fn pixel_filter_runs_before_edge_filter() {
        // The pixel filter paints everything red; the edge filter maps
        // red's luminance (0.3) to white. Reversing the order would
        // leave the image red.
        let (mut editor, _events) = editor_with(StubStore::failing(), 4);
        editor.set_bitmap(PixelBuffer::new(4, 4));
        editor.set_pixel_filter(Filter::threshold(2.0, 3.0, [255, 0, 0]));
        editor.set_edge_filter(Filter::threshold(0.25, 0.35, [0, 0, 255]));

        let out = editor.bitmap().unwrap();
        assert_eq!(out.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn bitmap_is_none_without_image() {
        let (editor, _events) = editor_with(StubStore::failing(), 4);
        assert!(editor.bitmap().is_none());
    }

    #[test]
    fn noop_filters_still_copy_the_original() {
        let (mut editor, _events) = editor_with(StubStore::failing(), 4);
        let original = checkerboard(4, 4);
        editor.set_bitmap(original.clone());
        let out = editor.bitmap().unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn read_file_loads_and_broadcasts() {
        let source = checkerboard(80, 40);
        let (mut editor, events) = editor_with(StubStore::serving(source), 40);
        events.borrow_mut().clear();

        editor.read_file(Path::new("in.png")).unwrap();

        assert!(editor.has_image());
        assert!(matches!(
            events.borrow().first(),
            Some(ViewerEvent::Preview {
                width: 40,
                height: 20
            })
        ));
    }

    #[test]
    fn failed_read_leaves_state_untouched() {
        let (mut editor, events) = editor_with(StubStore::failing(), 40);
        events.borrow_mut().clear();

        let result = editor.read_file(Path::new("missing.png"));

        assert!(matches!(
            result,
            Err(EditorError::Io(FileIoError::NotFound { .. }))
        ));
        assert!(!editor.has_image());
        assert!(events.borrow().is_empty(), "no broadcasts on failure");
    }

    #[test]
    fn write_file_saves_the_filtered_original() {
        let store = StubStore::serving(PixelBuffer::new(1, 1));
        let writes = Rc::clone(&store.writes);
        let (mut editor, _events) = editor_with(store, 4);

        let mut original = PixelBuffer::new(1, 1);
        original.set_pixel(0, 0, [10, 20, 31, 255]);
        editor.set_bitmap(original);
        editor.set_pixel_filter(Filter::black_white());

        editor.write_file(Path::new("out.png")).unwrap();

        let writes = writes.borrow();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, PathBuf::from("out.png"));
        // (10 + 20 + 31) / 3 = 20: the stored bitmap is the filtered one.
        assert_eq!(writes[0].1.pixel(0, 0), Some([20, 20, 20, 255]));
    }

    #[test]
    fn write_file_without_image_is_an_error() {
        let store = StubStore::serving(PixelBuffer::new(1, 1));
        let writes = Rc::clone(&store.writes);
        let (editor, events) = editor_with(store, 4);
        events.borrow_mut().clear();

        let result = editor.write_file(Path::new("out.png"));

        assert!(matches!(result, Err(EditorError::NoImage)));
        assert!(writes.borrow().is_empty());
        assert!(events.borrow().is_empty(), "write must not touch the view");
    }

    #[test]
    fn failed_write_propagates_without_viewer_traffic() {
        let (mut editor, events) = editor_with(StubStore::failing(), 4);
        editor.set_bitmap(checkerboard(4, 4));
        events.borrow_mut().clear();

        let result = editor.write_file(Path::new("out.png"));

        assert!(matches!(
            result,
            Err(EditorError::Io(FileIoError::Io { .. }))
        ));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn catalogs_are_available_through_the_editor() {
        let (editor, _events) = editor_with(StubStore::failing(), 4);
        assert!(!editor.pixel_filters().is_empty());
        assert!(!editor.edge_filters().is_empty());
    }

    #[test]
    fn catalog_noop_selection_counts_as_no_filter() {
        let (mut editor, _events) = editor_with(StubStore::failing(), 4);
        editor.set_bitmap(checkerboard(4, 4));

        let none = editor.pixel_filters().remove(0);
        editor.set_pixel_filter(none);
        assert!(!editor.has_pixel_filter());
    }

    #[test]
    fn kernel_validation_errors_surface_at_construction() {
        // Malformed kernels fail when the filter is built, long before
        // any apply call.
        let result = sumie_filters::Kernel::from_rows(vec![vec![1.0, 2.0]]);
        assert!(matches!(result, Err(FilterError::KernelNotSquare { .. })));
    }
}
