//! PDF Writer
//!
//! File structure (header, body, cross-reference table, trailer), object
//! numbering and optional Flate compression of streams.

use super::document::{create_catalog, create_pages, pdf_date, DocumentInfo, PdfVersion};
use super::fonts::standard_font_dict;
use super::objects::{to_bytes, PdfDictionary, PdfObject, PdfStream};
use super::options::PdfExportOptions;
use super::renderer::PdfRenderer;
use chrono::{DateTime, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use layout_engine::Canvas;
use std::io::{self, Write};
use thiserror::Error;

/// Error type for PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Layout error: {0}")]
    Layout(#[from] layout_engine::LayoutError),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Low-level PDF file writer tracking object offsets
pub struct PdfWriter<W: Write> {
    writer: W,
    position: u64,
    /// `(object number, byte offset)` of every written object
    offsets: Vec<(u32, u64)>,
    next_obj_num: u32,
    version: PdfVersion,
    compress: bool,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, version: PdfVersion) -> Self {
        Self {
            writer,
            position: 0,
            offsets: Vec::new(),
            next_obj_num: 1,
            version,
            compress: true,
        }
    }

    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.position += data.len() as u64;
        Ok(())
    }

    /// Reserve the next object number
    pub fn allocate_object(&mut self) -> u32 {
        let num = self.next_obj_num;
        self.next_obj_num += 1;
        num
    }

    /// Version line plus a binary marker comment
    pub fn write_header(&mut self) -> Result<()> {
        let header = format!("%PDF-{}\n", self.version.as_str());
        self.write_bytes(header.as_bytes())?;
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])
    }

    /// Write `object` as indirect object `obj_num`
    pub fn write_object(&mut self, obj_num: u32, object: &PdfObject) -> Result<()> {
        if obj_num == 0 || obj_num >= self.next_obj_num {
            return Err(PdfError::InvalidDocument(format!(
                "object {obj_num} was never allocated"
            )));
        }
        self.offsets.push((obj_num, self.position));
        self.write_bytes(format!("{obj_num} 0 obj\n").as_bytes())?;
        let body = to_bytes(object)?;
        self.write_bytes(&body)?;
        self.write_bytes(b"\nendobj\n")
    }

    /// Write a stream object, compressing it when enabled
    pub fn write_stream_object(&mut self, obj_num: u32, mut stream: PdfStream) -> Result<()> {
        if self.compress && !stream.is_filtered() {
            stream = compress_stream(stream)?;
        }
        stream.dict.insert("Length", stream.data.len());
        self.write_object(obj_num, &PdfObject::Stream(stream))
    }

    /// Cross-reference table, trailer and `%%EOF`
    pub fn write_xref_and_trailer(&mut self, catalog_ref: u32, info_ref: Option<u32>) -> Result<()> {
        let xref_offset = self.position;
        let size = self.next_obj_num;

        let mut offsets = vec![None; size as usize];
        for &(num, offset) in &self.offsets {
            offsets[num as usize] = Some(offset);
        }

        let mut table = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            match offset {
                Some(offset) => table.push_str(&format!("{offset:010} 00000 n \n")),
                None => table.push_str("0000000000 65535 f \n"),
            }
        }
        self.write_bytes(table.as_bytes())?;

        let mut trailer = PdfDictionary::new();
        trailer.insert("Size", PdfObject::Integer(size as i64));
        trailer.insert("Root", PdfObject::Reference(catalog_ref));
        if let Some(info) = info_ref {
            trailer.insert("Info", PdfObject::Reference(info));
        }
        self.write_bytes(b"trailer\n")?;
        let trailer = to_bytes(&trailer.into())?;
        self.write_bytes(&trailer)?;
        self.write_bytes(format!("\nstartxref\n{xref_offset}\n%%EOF\n").as_bytes())
    }

    /// Flush and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn compress_stream(mut stream: PdfStream) -> Result<PdfStream> {
    let compression_error = |e: io::Error| PdfError::Compression(e.to_string());
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&stream.data).map_err(compression_error)?;
    stream.data = encoder.finish().map_err(compression_error)?;
    stream.dict.insert("Filter", PdfObject::name("FlateDecode"));
    Ok(stream)
}

/// Check a canvas before any bytes are written
pub fn validate_canvas(canvas: &Canvas) -> Result<()> {
    if canvas.pages().is_empty() {
        return Err(PdfError::InvalidDocument("No pages to export".to_string()));
    }
    for page in canvas.pages() {
        let size_ok = [page.width, page.height].iter().all(|d| d.is_finite() && *d > 0.0);
        if !size_ok {
            return Err(PdfError::InvalidDocument(format!(
                "page {} has invalid size {}x{}",
                page.index + 1,
                page.width,
                page.height
            )));
        }
        for line in page.lines() {
            if !(line.x.is_finite() && line.y.is_finite() && line.size.is_finite() && line.size > 0.0) {
                return Err(PdfError::InvalidDocument(format!(
                    "line {:?} on page {} has an invalid position or size",
                    line.text,
                    page.index + 1
                )));
            }
        }
    }
    Ok(())
}

/// Writes a laid-out canvas as a complete PDF document
pub struct PdfDocumentWriter {
    options: PdfExportOptions,
    creation_date: Option<DateTime<Utc>>,
}

impl PdfDocumentWriter {
    pub fn new(options: PdfExportOptions) -> Self {
        Self {
            options,
            creation_date: None,
        }
    }

    /// Record a creation date in the document information dictionary
    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Write the document: catalog, page tree, info, fonts, then one page
    /// and content stream per canvas page
    pub fn write<W: Write>(&self, canvas: &Canvas, writer: W) -> Result<()> {
        validate_canvas(canvas)?;

        let mut pdf = PdfWriter::new(writer, self.options.pdf_version);
        pdf.set_compression(self.options.compress);
        pdf.write_header()?;

        let catalog_ref = pdf.allocate_object();
        let pages_ref = pdf.allocate_object();
        let info_ref = pdf.allocate_object();

        // Render first so every font is known before resources are written
        let mut renderer = PdfRenderer::new();
        let contents: Vec<_> = canvas
            .pages()
            .iter()
            .map(|page| (page, renderer.render_page(page)))
            .collect();

        let font_refs: Vec<_> = renderer
            .fonts()
            .fonts()
            .iter()
            .map(|resource| (resource, pdf.allocate_object()))
            .collect();
        let page_refs: Vec<(u32, u32)> = contents
            .iter()
            .map(|_| (pdf.allocate_object(), pdf.allocate_object()))
            .collect();

        pdf.write_object(catalog_ref, &create_catalog(pages_ref).into())?;
        let kids: Vec<u32> = page_refs.iter().map(|(page, _)| *page).collect();
        pdf.write_object(pages_ref, &create_pages(&kids).into())?;

        let mut info = DocumentInfo::new();
        info.title = self.options.title.clone();
        info.author = self.options.author.clone();
        info.subject = self.options.subject.clone();
        info.keywords = self.options.keywords.clone();
        info.creation_date = self.creation_date.map(pdf_date);
        pdf.write_object(info_ref, &info.to_dictionary().into())?;

        let mut font_resources = PdfDictionary::new();
        for (resource, obj_ref) in &font_refs {
            pdf.write_object(*obj_ref, &standard_font_dict(resource.font).into())?;
            font_resources.insert(resource.name.clone(), PdfObject::Reference(*obj_ref));
        }

        let mut resources = PdfDictionary::new();
        if !font_resources.is_empty() {
            resources.insert("Font", font_resources);
        }
        resources.insert(
            "ProcSet",
            vec![PdfObject::name("PDF"), PdfObject::name("Text")],
        );

        for ((page, content), (page_ref, content_ref)) in contents.into_iter().zip(page_refs) {
            pdf.write_stream_object(content_ref, PdfStream::new(content.into_bytes()))?;

            let mut page_dict = PdfDictionary::typed("Page");
            page_dict.insert("Parent", PdfObject::Reference(pages_ref));
            page_dict.insert("MediaBox", PdfObject::rect(page.width as f64, page.height as f64));
            page_dict.insert("Contents", PdfObject::Reference(content_ref));
            page_dict.insert("Resources", resources.clone());
            pdf.write_object(page_ref, &page_dict.into())?;
        }

        pdf.write_xref_and_trailer(catalog_ref, Some(info_ref))?;
        pdf.finish()?;
        Ok(())
    }

    /// Write the document to a byte vector
    pub fn write_to_bytes(&self, canvas: &Canvas) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(canvas, &mut buffer)?;
        Ok(buffer)
    }
}
