//! Command-line bitmap editor.
//!
//! Loads an image, applies a pixel filter and an edge-detection filter
//! selected by catalog name, and writes the filtered result. The
//! editor's viewer seam is implemented headlessly: status transitions
//! go to the log, and the filtered preview can optionally be written to
//! a file.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use sumie_editor::{BitmapEditor, BitmapStore, BitmapViewer, EditorStatus};
use sumie_filters::{Filter, PixelBuffer, catalog};
use sumie_io::FileBitmapStore;

/// Apply a pixel filter and an edge-detection filter to an image.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input image path (any format the decoder recognizes).
    input: Option<PathBuf>,

    /// Output image path; the extension picks the encoding
    /// (.bmp, .jpg/.jpeg, anything else becomes PNG).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixel filter name; several comma-separated names are applied as
    /// a chain. See --list-filters.
    #[arg(long, value_name = "NAME")]
    pixel_filter: Option<String>,

    /// Edge-detection filter name; several comma-separated names are
    /// applied as a chain. See --list-filters.
    #[arg(long, value_name = "NAME")]
    edge_filter: Option<String>,

    /// Side of the square the preview is fitted into.
    #[arg(long, value_name = "PIXELS", default_value_t = 512)]
    preview_size: u32,

    /// Also write the filtered preview to this path.
    #[arg(long, value_name = "PATH")]
    preview_out: Option<PathBuf>,

    /// List the selectable filter names and exit.
    #[arg(long)]
    list_filters: bool,
}

/// Headless viewer: status transitions go to the log, and the filtered
/// preview is written to disk when a path was given.
struct CliViewer {
    square: u32,
    preview_out: Option<PathBuf>,
    store: FileBitmapStore,
}

impl BitmapViewer for CliViewer {
    fn set_preview_bitmap(&mut self, bitmap: &PixelBuffer) {
        if let Some(path) = &self.preview_out {
            match self.store.write_bitmap(bitmap, path) {
                Ok(()) => log::info!("preview written to {}", path.display()),
                Err(err) => log::warn!("preview not written: {err}"),
            }
        }
    }

    fn set_status_message(&mut self, status: EditorStatus, message: &str) {
        match status {
            EditorStatus::Ok => log::info!("{message}"),
            EditorStatus::Warning => log::warn!("{message}"),
        }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        log::debug!("controls enabled: {enabled}");
    }

    fn preview_square_size(&self) -> u32 {
        self.square
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.list_filters {
        print_filters();
        return Ok(());
    }

    let (Some(input), Some(output)) = (args.input, args.output) else {
        return Err("an input path and --output are required (or use --list-filters)".into());
    };

    let pixel = args
        .pixel_filter
        .as_deref()
        .map(|names| resolve(names, &catalog::pixel_filters()))
        .transpose()?;
    let edge = args
        .edge_filter
        .as_deref()
        .map(|names| resolve(names, &edge_selection()))
        .transpose()?;

    let viewer = CliViewer {
        square: args.preview_size.max(1),
        preview_out: args.preview_out,
        store: FileBitmapStore::new(),
    };
    let mut editor = BitmapEditor::new(Box::new(FileBitmapStore::new()), Box::new(viewer));

    editor.read_file(&input)?;
    if let Some(filter) = pixel {
        log::info!("pixel filter: {}", filter.name());
        editor.set_pixel_filter(filter);
    }
    if let Some(filter) = edge {
        log::info!("edge filter: {}", filter.name());
        editor.set_edge_filter(filter);
    }

    editor.write_file(&output)?;
    log::info!("filtered image written to {}", output.display());
    Ok(())
}

fn print_filters() {
    println!("Pixel filters:");
    for filter in catalog::pixel_filters() {
        println!("  {}", filter.name());
    }
    println!("Edge filters:");
    for filter in edge_selection() {
        println!("  {}", filter.name());
    }
}

/// Edge filters selectable by name: the fixed catalog plus the preset
/// library (Sobel, Prewitt, Kirsch, ...).
fn edge_selection() -> Vec<Filter> {
    let mut filters = catalog::edge_filters();
    filters.extend(catalog::presets::all());
    filters
}

/// Resolve a `--pixel-filter`/`--edge-filter` value against a list of
/// selectable filters. Names match case-insensitively; several
/// comma-separated names become a chain applied front to back.
fn resolve(selection: &str, filters: &[Filter]) -> Result<Filter, String> {
    let mut resolved = Vec::new();
    for name in selection.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let filter = filters
            .iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| {
                let available: Vec<String> = filters.iter().map(Filter::name).collect();
                format!(
                    "unknown filter '{name}' (available: {})",
                    available.join(", "),
                )
            })?;
        resolved.push(filter);
    }

    if resolved.is_empty() {
        return Err(format!("no filter name in '{selection}'"));
    }
    if resolved.len() == 1 {
        return Ok(resolved.remove(0));
    }
    Ok(Filter::chain(resolved))
}
