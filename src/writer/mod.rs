//! PDF writing module for generating PDF files.
//!
//! ## Architecture
//!
//! ```text
//! native data
//!     ↓
//! [resolve] (native values → Object)
//!     ↓
//! [ObjectRegistry] (indirect objects, numbering, forward references)
//!     ↓
//! [PdfWriter] (catalog, page tree, header/body/xref/trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use pdf_scribe::writer::PdfWriter;
//!
//! let mut writer = PdfWriter::new();
//! writer
//!     .add_letter_page()?
//!     .set_stroke_color(1.0, 0.0, 0.0)
//!     .rect(72.0, 72.0, 200.0, 100.0)
//!     .stroke();
//! let bytes = writer.finish()?;
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! # Ok::<(), pdf_scribe::Error>(())
//! ```

mod content_stream;
mod object_serializer;
mod pdf_writer;
mod registry;
mod resolver;
mod xref;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp, LineCap, LineJoin};
pub use object_serializer::{format_number, ObjectSerializer};
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig, WriterState};
pub use registry::{IndirectHandle, IndirectObject, ObjectRegistry};
pub use resolver::{resolve, ArrayElement, Native, ToObject};
pub use xref::{CountingWriter, XrefTable, FREE_HEAD_ENTRY};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _serializer = ObjectSerializer::new();
        let _builder = ContentStreamBuilder::new();
        let _registry = ObjectRegistry::new();
        assert_eq!(PdfWriter::new().state(), WriterState::Open);
    }
}
