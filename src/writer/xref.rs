//! Cross-reference table and byte accounting for the write pass.

use super::registry::{IndirectObject, ObjectRegistry};
use std::io::{self, Write};

/// The synthetic head of the free list, entry 0 of every table.
pub const FREE_HEAD_ENTRY: &[u8] = b"0000000000 65535 f\r\n";

/// Sink adapter that counts every byte the inner writer accepted.
///
/// The count includes bytes of a partially successful `write_all`, so after a
/// failure it still tells how much output exists.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Bytes accepted by the inner writer so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Cross-reference section for objects numbered 1..=n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XrefTable {
    entries: Vec<Vec<u8>>,
}

impl XrefTable {
    /// Collect the entry of every object in a registry.
    ///
    /// Objects that were never written report offset zero.
    pub fn from_registry(registry: &ObjectRegistry) -> Self {
        Self {
            entries: registry.iter().map(IndirectObject::xref_entry).collect(),
        }
    }

    /// Number of entries including the free-list head.
    pub fn size(&self) -> usize {
        self.entries.len() + 1
    }

    /// Render the `xref` section.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = format!("xref\n0 {}\n", self.size()).into_bytes();
        buf.extend_from_slice(FREE_HEAD_ENTRY);
        for entry in &self.entries {
            buf.extend_from_slice(entry);
        }
        buf
    }
}
