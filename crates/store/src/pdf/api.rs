//! PDF Export Public API

use super::options::PdfExportOptions;
use super::writer::{PdfDocumentWriter, Result};
use doc_model::{Manual, Section};
use layout_engine::{Canvas, DocumentFormatter, LayoutConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use text_engine::StandardMetrics;

/// A rendered PDF and the number of pages it contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Serialize a laid-out canvas to PDF bytes.
///
/// Nothing is returned on failure; a partially written document is dropped.
///
/// # Example
///
/// ```ignore
/// use store::pdf::{render_canvas, PdfExportOptions};
///
/// let bytes = render_canvas(&canvas, &PdfExportOptions::new().with_title("Manual"))?;
/// ```
pub fn render_canvas(canvas: &Canvas, options: &PdfExportOptions) -> Result<Vec<u8>> {
    PdfDocumentWriter::new(options.clone()).write_to_bytes(canvas)
}

/// Serialize a laid-out canvas to a PDF file
pub fn write_canvas(
    canvas: &Canvas,
    path: impl AsRef<Path>,
    options: &PdfExportOptions,
) -> Result<()> {
    let bytes = render_canvas(canvas, options)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    std::io::Write::write_all(&mut writer, &bytes)?;
    std::io::Write::flush(&mut writer)?;
    Ok(())
}

/// Lay out sections with the standard font metrics and serialize them.
///
/// `title` is the project name; it heads the first page and, unless the
/// options already carry one, becomes the document title.
pub fn render_sections(
    title: Option<&str>,
    sections: &[Section],
    layout: &LayoutConfig,
    options: &PdfExportOptions,
) -> Result<RenderedPdf> {
    let metrics = StandardMetrics::new();
    let canvas = DocumentFormatter::new(layout, &metrics)?.format(title, sections);

    let mut options = options.clone();
    if options.title.is_none() {
        options.title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("{t} Documentation"));
    }

    let bytes = render_canvas(&canvas, &options)?;
    Ok(RenderedPdf {
        bytes,
        page_count: canvas.page_count(),
    })
}

/// Lay out and serialize a whole manual
pub fn render_manual(
    manual: &Manual,
    layout: &LayoutConfig,
    options: &PdfExportOptions,
) -> Result<RenderedPdf> {
    render_sections(manual.project_name.as_deref(), &manual.sections, layout, options)
}
