//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.
//!
//! A [`PdfWriter`] moves through [`WriterState::Open`] (objects and pages can
//! be added), [`WriterState::Finalizing`] (page tree resolved, registry
//! sealed) and ends in [`WriterState::Written`] or [`WriterState::Failed`].

use super::content_stream::{ContentStreamBuilder, LineCap, LineJoin};
use super::registry::{IndirectHandle, ObjectRegistry};
use super::resolver::{resolve, Native};
use super::xref::{CountingWriter, XrefTable};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dictionary, Object};
use serde::{Deserialize, Serialize};
use std::io::{self, BufWriter, Write};

/// Binary marker comment written after the version line.
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// Configuration for PDF generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Producing library
    pub producer: Option<String>,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: None,
            producer: None,
        }
    }
}

impl PdfWriterConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the PDF version written in the header.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set document keywords.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    /// Set creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set producing library.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    /// Build the Info dictionary, or `None` when no metadata is set.
    fn info_dictionary(&self) -> Option<Dictionary> {
        let entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        let dict: Dictionary = entries
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, Object::string(v))))
            .collect();
        (!dict.is_empty()).then_some(dict)
    }
}

/// Lifecycle of a [`PdfWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Accepting objects, pages and drawing commands
    Open,
    /// Structure resolved; no new objects can be registered
    Finalizing,
    /// Output fully emitted
    Written,
    /// A write error occurred; partial output may exist
    Failed,
}

impl WriterState {
    /// Name of the state, for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            WriterState::Open => "Open",
            WriterState::Finalizing => "Finalizing",
            WriterState::Written => "Written",
            WriterState::Failed => "Failed",
        }
    }
}

/// A page being built.
///
/// Drawing commands accumulate into the page's content stream.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Handle of the page object.
    pub fn handle(&self) -> IndirectHandle {
        self.writer.pages[self.page_index].handle
    }

    /// Index of this page in the document.
    pub fn index(&self) -> usize {
        self.page_index
    }

    /// Direct access to the page's content stream builder.
    pub fn content(&mut self) -> &mut ContentStreamBuilder {
        &mut self.writer.pages[self.page_index].content_builder
    }

    /// Start a new subpath at the given point.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.content().move_to(x, y);
        self
    }

    /// Append a straight line from the current point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.content().line_to(x, y);
        self
    }

    /// Bézier curve to (x3, y3) with control points (x1, y1) and (x2, y2).
    pub fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> &mut Self {
        self.content().curve_to(x1, y1, x2, y2, x3, y3);
        self
    }

    /// Bézier curve using the current point as first control point.
    pub fn curve_to_v(&mut self, x2: f32, y2: f32, x3: f32, y3: f32) -> &mut Self {
        self.content().curve_to_v(x2, y2, x3, y3);
        self
    }

    /// Bézier curve using the end point as second control point.
    pub fn curve_to_y(&mut self, x1: f32, y1: f32, x3: f32, y3: f32) -> &mut Self {
        self.content().curve_to_y(x1, y1, x3, y3);
        self
    }

    /// Append a rectangle subpath.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.content().rect(x, y, width, height);
        self
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) -> &mut Self {
        self.content().close_path();
        self
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.content().stroke();
        self
    }

    /// Close and stroke the current path.
    pub fn close_stroke(&mut self) -> &mut Self {
        self.content().close_stroke();
        self
    }

    /// Fill the current path (non-zero winding).
    pub fn fill(&mut self) -> &mut Self {
        self.content().fill();
        self
    }

    /// Fill the current path (even-odd).
    pub fn fill_even_odd(&mut self) -> &mut Self {
        self.content().fill_even_odd();
        self
    }

    /// Fill and stroke the current path.
    pub fn fill_stroke(&mut self) -> &mut Self {
        self.content().fill_stroke();
        self
    }

    /// End the path without painting it.
    pub fn end_path(&mut self) -> &mut Self {
        self.content().end_path();
        self
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.content().set_line_width(width);
        self
    }

    /// Set line cap style.
    pub fn set_line_cap(&mut self, cap: LineCap) -> &mut Self {
        self.content().set_line_cap(cap);
        self
    }

    /// Set line join style.
    pub fn set_line_join(&mut self, join: LineJoin) -> &mut Self {
        self.content().set_line_join(join);
        self
    }

    /// Set miter limit.
    pub fn set_miter_limit(&mut self, limit: f32) -> &mut Self {
        self.content().set_miter_limit(limit);
        self
    }

    /// Set dash pattern.
    pub fn set_dash_pattern(&mut self, pattern: Vec<f32>, phase: f32) -> &mut Self {
        self.content().set_dash_pattern(pattern, phase);
        self
    }

    /// Set stroke color (RGB, 0.0-1.0).
    pub fn set_stroke_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.content().set_stroke_color(r, g, b);
        self
    }

    /// Set fill color (RGB, 0.0-1.0).
    pub fn set_fill_color(&mut self, r: f32, g: f32, b: f32) -> &mut Self {
        self.content().set_fill_color(r, g, b);
        self
    }

    /// Set stroke gray level.
    pub fn set_stroke_gray(&mut self, gray: f32) -> &mut Self {
        self.content().set_stroke_gray(gray);
        self
    }

    /// Set fill gray level.
    pub fn set_fill_gray(&mut self, gray: f32) -> &mut Self {
        self.content().set_fill_gray(gray);
        self
    }

    /// Save graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.content().save_state();
        self
    }

    /// Restore graphics state.
    pub fn restore_state(&mut self) -> &mut Self {
        self.content().restore_state();
        self
    }

    /// Concatenate a transformation matrix.
    pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> &mut Self {
        self.content().transform(a, b, c, d, e, f);
        self
    }

    /// Finish building this page and return to the writer.
    pub fn finish(self) -> &'a mut PdfWriter {
        self.writer
    }
}

/// Internal page data.
#[derive(Debug)]
struct PageData {
    handle: IndirectHandle,
    contents: IndirectHandle,
    media_box: Rect,
    content_builder: ContentStreamBuilder,
}

/// PDF document writer.
///
/// Owns the document's indirect objects. The catalog and the page tree are
/// registered first, so the catalog is always object 1 and can point at the
/// page tree before the page tree's content is known.
pub struct PdfWriter {
    config: PdfWriterConfig,
    registry: ObjectRegistry,
    state: WriterState,
    catalog: IndirectHandle,
    page_tree: IndirectHandle,
    info: Option<IndirectHandle>,
    pages: Vec<PageData>,
    sink: Option<Box<dyn Write>>,
}

impl std::fmt::Debug for PdfWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfWriter")
            .field("state", &self.state)
            .field("objects", &self.registry.len())
            .field("pages", &self.pages.len())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl PdfWriter {
    /// Create a new PDF writer with default config and no sink.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config and no sink.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        let mut registry = ObjectRegistry::new();
        let catalog = registry.reserve();
        let page_tree = registry.reserve();

        let catalog_dict = Dictionary::new()
            .with("Type", Object::name("Catalog"))
            .with("Pages", page_tree);
        registry.set(catalog, catalog_dict.into());

        let info = config.info_dictionary().map(|dict| {
            let handle = registry.reserve();
            registry.set(handle, dict.into());
            handle
        });

        Self {
            config,
            registry,
            state: WriterState::Open,
            catalog,
            page_tree,
            info,
            pages: Vec::new(),
            sink: None,
        }
    }

    /// Bind an output sink used by [`write`](Self::write).
    pub fn with_sink(mut self, sink: impl Write + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    /// Bind or replace the output sink.
    pub fn set_sink(&mut self, sink: impl Write + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Remove and return the bound sink.
    pub fn take_sink(&mut self) -> Option<Box<dyn Write>> {
        self.sink.take()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Writer configuration.
    pub fn config(&self) -> &PdfWriterConfig {
        &self.config
    }

    /// Handle of the document catalog (the trailer's Root).
    pub fn catalog(&self) -> IndirectHandle {
        self.catalog
    }

    /// Handle of the page tree root.
    pub fn page_tree(&self) -> IndirectHandle {
        self.page_tree
    }

    /// Handle of the Info dictionary, when metadata is configured.
    pub fn info(&self) -> Option<IndirectHandle> {
        self.info
    }

    /// The document's indirect objects.
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Mutable access to the document's indirect objects.
    pub fn registry_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.registry
    }

    /// Reserve a new indirect object (placeholder null).
    pub fn register(&mut self) -> Result<IndirectHandle> {
        self.registry.register()
    }

    /// Resolve native data and store it as the content of `handle`.
    pub fn resolve(&mut self, handle: IndirectHandle, value: impl Into<Native>) -> Result<()> {
        let object = resolve(value)?;
        self.registry.resolve(handle, object)
    }

    /// Register a new indirect object built from native data.
    pub fn add_object(&mut self, value: impl Into<Native>) -> Result<IndirectHandle> {
        let object = resolve(value)?;
        self.registry.add(object)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page with the given dimensions.
    ///
    /// Fails with [`Error::UnsupportedType`] when a dimension is NaN or infinite.
    pub fn new_page(&mut self, width: f64, height: f64) -> Result<PageBuilder<'_>> {
        self.expect_state(WriterState::Open)?;
        if !(width.is_finite() && height.is_finite()) {
            return Err(Error::UnsupportedType(format!(
                "page size {} x {}",
                width, height
            )));
        }
        let handle = self.registry.register()?;
        let contents = self.registry.register()?;
        let page_index = self.pages.len();
        self.pages.push(PageData {
            handle,
            contents,
            media_box: Rect::new(0.0, 0.0, width, height),
            content_builder: ContentStreamBuilder::new(),
        });
        log::debug!("Added page {} ({} x {})", page_index, width, height);
        Ok(PageBuilder {
            writer: self,
            page_index,
        })
    }

    /// Add a US Letter sized page (8.5" x 11").
    pub fn add_letter_page(&mut self) -> Result<PageBuilder<'_>> {
        self.new_page(612.0, 792.0)
    }

    /// Add an A4 sized page (210mm x 297mm).
    pub fn add_a4_page(&mut self) -> Result<PageBuilder<'_>> {
        self.new_page(595.0, 842.0)
    }

    /// Reopen an existing page for drawing.
    ///
    /// Returns `None` for an unknown index or once the document is no longer open.
    pub fn page(&mut self, index: usize) -> Option<PageBuilder<'_>> {
        if self.state != WriterState::Open || index >= self.pages.len() {
            return None;
        }
        Some(PageBuilder {
            writer: self,
            page_index: index,
        })
    }

    /// The most recently added page.
    pub fn current_page(&mut self) -> Option<PageBuilder<'_>> {
        let last = self.pages.len().checked_sub(1)?;
        self.page(last)
    }

    /// Resolve deferred structure and seal the registry.
    ///
    /// Each page dictionary and content stream is built, then the page tree
    /// with its kids and count. Calling this again while finalizing is a no-op.
    pub fn finalize(&mut self) -> Result<()> {
        match self.state {
            WriterState::Open => {},
            WriterState::Finalizing => return Ok(()),
            _ => return Err(self.state_error(WriterState::Open)),
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = page.content_builder.build()?;
            self.registry.resolve(page.contents, Object::stream(content))?;

            let page_dict = Dictionary::new()
                .with("Type", Object::name("Page"))
                .with("Parent", self.page_tree)
                .with("MediaBox", resolve(page.media_box)?)
                .with("Resources", Dictionary::new())
                .with("Contents", page.contents);
            self.registry.resolve(page.handle, page_dict)?;
            kids.push(Object::from(page.handle));
        }

        let page_tree = Dictionary::new()
            .with("Type", Object::name("Pages"))
            .with("Kids", kids)
            .with("Count", self.pages.len());
        self.registry.resolve(self.page_tree, page_tree)?;

        self.registry.seal();
        self.state = WriterState::Finalizing;
        log::debug!(
            "Finalized document: {} pages, {} objects",
            self.pages.len(),
            self.registry.len()
        );
        Ok(())
    }

    /// Write the document to the bound sink, returning the bytes written.
    pub fn write(&mut self) -> Result<u64> {
        let mut sink = self.sink.take().ok_or(Error::UninitializedSink)?;
        let result = self.write_to(&mut sink);
        self.sink = Some(sink);
        result
    }

    /// Write the document to a caller-owned sink, returning the bytes written.
    ///
    /// The sink is flushed but not closed. On an I/O failure the error
    /// carries the number of bytes that reached the sink.
    pub fn write_to<W: Write>(&mut self, sink: &mut W) -> Result<u64> {
        let validated = self
            .finalize()
            .and_then(|_| self.registry.validate_references())
            .and_then(|_| self.registry.validate_numbers());
        if let Err(e) = validated {
            if self.state == WriterState::Finalizing {
                self.state = WriterState::Failed;
            }
            return Err(e);
        }

        let mut out = CountingWriter::new(sink);
        match self.emit(&mut out) {
            Ok(()) => {
                self.state = WriterState::Written;
                log::debug!("Wrote document: {} bytes", out.written());
                Ok(out.written())
            },
            Err(source) => {
                self.state = WriterState::Failed;
                let written = out.written();
                log::warn!("Writing document failed after {} bytes: {}", written, source);
                Err(Error::Io { written, source })
            },
        }
    }

    /// Write the document into memory.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Build the complete PDF document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.to_bytes()
    }

    /// Save the PDF to a file, returning the bytes written.
    ///
    /// The file is closed on every exit path.
    pub fn save(&mut self, path: impl AsRef<std::path::Path>) -> Result<u64> {
        let file = std::fs::File::create(path)?;
        let mut w = BufWriter::new(file);
        self.write_to(&mut w)
    }

    /// Header, body, cross-reference table and trailer, in that order.
    fn emit<W: Write>(&mut self, out: &mut CountingWriter<W>) -> io::Result<()> {
        writeln!(out, "%PDF-{}", self.config.version)?;
        out.write_all(BINARY_MARKER)?;
        out.write_all(b"\n")?;

        for index in 0..self.registry.len() {
            let offset = out.written();
            let object = self.registry.fix_offset(index, offset);
            log::trace!("Object {} at offset {}", object.number(), offset);
            let body = object.body();
            out.write_all(&body)?;
        }

        let xref_start = out.written();
        let xref = XrefTable::from_registry(&self.registry);
        out.write_all(&xref.to_bytes())?;

        let mut trailer = Dictionary::new()
            .with("Size", xref.size())
            .with("Root", self.catalog);
        if let Some(info) = self.info {
            trailer.put("Info", info);
        }
        out.write_all(b"trailer\n")?;
        out.write_all(&super::ObjectSerializer::new().serialize(&trailer.into()))?;
        write!(out, "\nstartxref\n{}\n%%EOF\n", xref_start)?;
        out.flush()
    }

    fn expect_state(&self, expected: WriterState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.state_error(expected))
        }
    }

    fn state_error(&self, expected: WriterState) -> Error {
        Error::InvalidState {
            expected: expected.as_str(),
            found: self.state.as_str(),
        }
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).to_string()
    }

    #[test]
    fn test_create_empty_pdf() {
        let mut writer = PdfWriter::new();
        let bytes = writer.to_bytes().unwrap();
        let content = text(&bytes);

        assert!(content.starts_with("%PDF-1.7\n"));
        assert!(content.contains("1 0 obj\n<<\n/Type /Catalog\n/Pages 2 0 R\n>>\nendobj\n"));
        assert!(content.contains("2 0 obj\n<<\n/Type /Pages\n/Kids [ ]\n/Count 0\n>>\nendobj\n"));
        assert!(content.ends_with("%%EOF\n"));
        assert_eq!(writer.state(), WriterState::Written);
    }

    #[test]
    fn test_header_has_binary_marker_and_blank_line() {
        let bytes = PdfWriter::new().finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n\n1 0 obj\n"));
        assert!(bytes[9..15].iter().any(|b| *b > 127));
    }

    #[test]
    fn test_exact_minimal_document() {
        let bytes = PdfWriter::new().finish().unwrap();
        let expected_body = "1 0 obj\n<<\n/Type /Catalog\n/Pages 2 0 R\n>>\nendobj\n\
                             2 0 obj\n<<\n/Type /Pages\n/Kids [ ]\n/Count 0\n>>\nendobj\n";
        let header_len = 9 + BINARY_MARKER.len() + 1;
        let obj2_offset = header_len + "1 0 obj\n<<\n/Type /Catalog\n/Pages 2 0 R\n>>\nendobj\n".len();
        let xref_start = header_len + expected_body.len();
        let tail = format!(
            "xref\n0 3\n0000000000 65535 f\r\n{:010} 00000 n\r\n{:010} 00000 n\r\n\
             trailer\n<<\n/Size 3\n/Root 1 0 R\n>>\nstartxref\n{}\n%%EOF\n",
            header_len, obj2_offset, xref_start
        );
        assert_eq!(text(&bytes[header_len..]), format!("{}{}", expected_body, tail));
    }

    #[test]
    fn test_page_with_drawing_commands() {
        let mut writer = PdfWriter::new();
        writer
            .new_page(200.0, 100.0)
            .unwrap()
            .set_line_width(2.0)
            .move_to(10.0, 10.0)
            .line_to(190.0, 90.0)
            .stroke();

        let content = text(&writer.to_bytes().unwrap());
        assert!(content.contains(
            "3 0 obj\n<<\n/Type /Page\n/Parent 2 0 R\n/MediaBox [ 0 0 200 100 ]\n/Resources <<\n>>\n/Contents 4 0 R\n>>\nendobj\n"
        ));
        let payload = "2 w\n10 10 m\n190 90 l\nS\n";
        assert!(content.contains(&format!(
            "4 0 obj\n<<\n/Length {}\n>>\nstream\n{}\nendstream\nendobj\n",
            payload.len(),
            payload
        )));
        assert!(content.contains("/Kids [ 3 0 R ]\n/Count 1"));
    }

    #[test]
    fn test_multiple_pages() {
        let mut writer = PdfWriter::new();
        writer.add_letter_page().unwrap().finish();
        writer.add_a4_page().unwrap().finish();

        let content = text(&writer.finish().unwrap());
        assert!(content.contains("/Count 2"));
        assert!(content.contains("/Kids [ 3 0 R 5 0 R ]"));
        assert!(content.contains("[ 0 0 612 792 ]"));
        assert!(content.contains("[ 0 0 595 842 ]"));
    }

    #[test]
    fn test_current_page_accumulates_commands() {
        let mut writer = PdfWriter::new();
        assert!(writer.current_page().is_none());
        writer.new_page(100.0, 100.0).unwrap().move_to(0.0, 0.0);
        writer.current_page().unwrap().line_to(5.0, 5.0).stroke();

        let content = text(&writer.to_bytes().unwrap());
        assert!(content.contains("stream\n0 0 m\n5 5 l\nS\n\nendstream"));
    }

    #[test]
    fn test_pdf_with_metadata() {
        let config = PdfWriterConfig::default()
            .with_title("Test Document")
            .with_author("Test Author");

        let mut writer = PdfWriter::with_config(config);
        assert_eq!(writer.info().map(|h| h.number()), Some(3));

        let content = text(&writer.to_bytes().unwrap());
        assert!(content.contains("3 0 obj\n<<\n/Title (Test Document)\n/Author (Test Author)\n>>"));
        assert!(content.contains("trailer\n<<\n/Size 4\n/Root 1 0 R\n/Info 3 0 R\n>>"));
    }

    #[test]
    fn test_config_version_in_header() {
        let mut writer = PdfWriter::with_config(PdfWriterConfig::default().with_version("1.4"));
        assert!(writer.to_bytes().unwrap().starts_with(b"%PDF-1.4\n"));
    }

    #[test]
    fn test_config_from_json() {
        let config = PdfWriterConfig::from_json(r#"{"title": "Report"}"#).unwrap();
        assert_eq!(config.version, "1.7");
        assert_eq!(config.title.as_deref(), Some("Report"));
        assert!(matches!(PdfWriterConfig::from_json("{"), Err(Error::Config(_))));
    }

    #[test]
    fn test_write_without_sink_fails() {
        let mut writer = PdfWriter::new();
        assert!(matches!(writer.write(), Err(Error::UninitializedSink)));
        assert_eq!(writer.state(), WriterState::Open);
    }

    #[test]
    fn test_second_write_is_rejected() {
        let mut writer = PdfWriter::new();
        writer.to_bytes().unwrap();
        assert!(matches!(
            writer.to_bytes(),
            Err(Error::InvalidState { expected: "Open", found: "Written" })
        ));
    }

    #[test]
    fn test_no_pages_after_finalize() {
        let mut writer = PdfWriter::new();
        writer.finalize().unwrap();
        assert_eq!(writer.state(), WriterState::Finalizing);
        assert!(matches!(writer.new_page(10.0, 10.0), Err(Error::InvalidState { .. })));
        assert!(matches!(writer.register(), Err(Error::RegistrySealed)));
        assert!(writer.finalize().is_ok());
    }

    #[test]
    fn test_dangling_reference_aborts_before_output() {
        let mut writer = PdfWriter::new();
        let handle = writer.register().unwrap();
        writer
            .resolve(handle, Object::Reference(crate::object::ObjectRef::new(99, 0)))
            .unwrap();

        let mut buf = Vec::new();
        assert!(matches!(writer.write_to(&mut buf), Err(Error::InvalidHandle(_))));
        assert!(buf.is_empty());
        assert_eq!(writer.state(), WriterState::Failed);
    }

    #[test]
    fn test_non_finite_page_size_is_rejected() {
        let mut writer = PdfWriter::new();
        assert!(matches!(
            writer.new_page(f64::INFINITY, f64::NAN),
            Err(Error::UnsupportedType(_))
        ));
        assert_eq!(writer.page_count(), 0);
        assert_eq!(writer.registry().len(), 2);
    }

    #[test]
    fn test_non_finite_drawing_operand_aborts_write() {
        let mut writer = PdfWriter::new();
        writer.new_page(100.0, 100.0).unwrap().move_to(f32::NAN, 1.0).stroke();

        let mut buf = Vec::new();
        assert!(matches!(writer.write_to(&mut buf), Err(Error::UnsupportedType(_))));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_non_finite_registered_number_aborts_write() {
        let mut writer = PdfWriter::new();
        writer.registry_mut().add(Object::Number(f64::NAN)).unwrap();

        let mut buf = Vec::new();
        assert!(matches!(writer.write_to(&mut buf), Err(Error::UnsupportedType(_))));
        assert!(buf.is_empty());
        assert_eq!(writer.state(), WriterState::Failed);
    }

    #[test]
    fn test_unsupported_native_value_is_reported() {
        let mut writer = PdfWriter::new();
        assert!(matches!(writer.add_object(f64::INFINITY), Err(Error::UnsupportedType(_))));
    }
}
