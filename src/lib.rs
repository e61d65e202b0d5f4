// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]

//! # PDF Scribe
//!
//! A PDF object model and serializer.
//!
//! ## Core Features
//!
//! - **Object Model**: Boolean, Number, String, Name, Array, Dictionary,
//!   Stream, Null and indirect references ([`object::Object`])
//! - **Resolver**: Converts native Rust data (numbers, strings, vectors, maps,
//!   JSON values, custom types) into PDF objects ([`writer::resolve`])
//! - **Indirect Objects**: Registry with forward references and stable
//!   object numbering ([`writer::ObjectRegistry`])
//! - **Document Writer**: Header, body, cross-reference table and trailer
//!   with exact byte offsets ([`writer::PdfWriter`])
//! - **Vector Drawing**: Path construction, painting and graphics state
//!   operators for page content
//!
//! ## Quick Start
//!
//! ```
//! use pdf_scribe::writer::{PdfWriter, PdfWriterConfig};
//!
//! # fn main() -> pdf_scribe::Result<()> {
//! let config = PdfWriterConfig::default().with_title("Shapes");
//! let mut writer = PdfWriter::with_config(config);
//!
//! writer
//!     .new_page(200.0, 200.0)?
//!     .move_to(10.0, 10.0)
//!     .line_to(190.0, 190.0)
//!     .stroke();
//!
//! let bytes = writer.to_bytes()?;
//! assert!(bytes.ends_with(b"%%EOF\n"));
//! # Ok(())
//! # }
//! ```
//!
//! Out of scope: parsing existing PDFs, compression filters, encryption,
//! fonts and text, images, object streams and incremental updates.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Object model
pub mod object;

// Page geometry
pub mod geometry;

// PDF writing
pub mod writer;

// Re-exports
pub use error::{Error, Result};
pub use object::{Dictionary, Object, ObjectRef};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf_scribe");
    }
}
