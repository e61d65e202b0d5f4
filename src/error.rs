//! Error types for the PDF writer.
//!
//! This module defines all error types that can occur while building and
//! serializing a PDF document.

use crate::object::ObjectRef;

/// Result type alias for PDF writer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Native data that has no PDF object representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Write requested but no output sink is bound to the document
    #[error("No output sink configured; cannot write the document")]
    UninitializedSink,

    /// Writing to the sink failed
    #[error("IO error after {written} bytes: {source}")]
    Io {
        /// Bytes successfully written before the failure
        written: u64,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reference to an indirect object that this document never registered
    #[error("Invalid indirect object handle: {0}")]
    InvalidHandle(ObjectRef),

    /// Registration attempted after the document was finalized
    #[error("Object registry is sealed; no new indirect objects can be registered")]
    RegistrySealed,

    /// Operation not legal in the writer's current state
    #[error("Invalid writer state: expected {expected}, found {found}")]
    InvalidState {
        /// State the operation requires
        expected: &'static str,
        /// State the writer is in
        found: &'static str,
    },

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Number of bytes already written when this error occurred.
    ///
    /// Only I/O failures happen mid-write; every other error is raised
    /// before the first byte reaches the sink.
    pub fn bytes_written(&self) -> u64 {
        match self {
            Error::Io { written, .. } => *written,
            _ => 0,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { written: 0, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_error() {
        let err = Error::UnsupportedType("map key of kind Int".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Unsupported type"));
        assert!(msg.contains("map key of kind Int"));
    }

    #[test]
    fn test_uninitialized_sink_error() {
        let msg = format!("{}", Error::UninitializedSink);
        assert!(msg.contains("No output sink"));
    }

    #[test]
    fn test_io_error_reports_written_bytes() {
        let err = Error::Io {
            written: 1234,
            source: std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("1234"));
        assert!(msg.contains("disk full"));
        assert_eq!(err.bytes_written(), 1234);
    }

    #[test]
    fn test_invalid_handle_error() {
        let err = Error::InvalidHandle(ObjectRef::new(10, 0));
        let msg = format!("{}", err);
        assert!(msg.contains("10 0 R"));
        assert_eq!(err.bytes_written(), 0);
    }

    #[test]
    fn test_plain_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { written: 0, .. }));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
