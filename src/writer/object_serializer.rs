//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation. The layout is fixed
//! so that output, and therefore every cross-reference offset, is exactly
//! reproducible:
//!
//! - arrays: `[ a b c ]`, empty `[ ]`
//! - dictionaries: `<<\n/Key value\n>>`, empty `<<\n>>`
//! - streams: `<<\n/Length n\n>>\nstream\n...\nendstream`
//!
//! Strings and names are written verbatim; no escaping is applied.

use crate::object::{Dictionary, Object, ObjectRef};

/// Serializer for PDF objects.
///
/// Converts PDF Object types to their byte representation following
/// PDF syntax rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a new object serializer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize an object to bytes.
    pub fn serialize(&self, obj: &Object) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_object(&mut buf, obj);
        buf
    }

    /// Serialize an object to a string (for debugging).
    pub fn serialize_to_string(&self, obj: &Object) -> String {
        String::from_utf8_lossy(&self.serialize(obj)).to_string()
    }

    /// Serialize an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn serialize_indirect(&self, id: u32, gen: u16, obj: &Object) -> Vec<u8> {
        let mut buf = format!("{} {} obj\n", id, gen).into_bytes();
        self.write_object(&mut buf, obj);
        buf.extend_from_slice(b"\nendobj\n");
        buf
    }

    /// Serialize the inline reference token `{id} {gen} R`.
    pub fn serialize_reference(&self, r: ObjectRef) -> Vec<u8> {
        r.to_string().into_bytes()
    }

    /// Write an object to a buffer.
    fn write_object(&self, buf: &mut Vec<u8>, obj: &Object) {
        match obj {
            Object::Null => buf.extend_from_slice(b"null"),
            Object::Boolean(b) => buf.extend_from_slice(if *b { b"true" } else { b"false" }),
            Object::Number(n) => buf.extend_from_slice(format_number(*n).as_bytes()),
            Object::String(s) => {
                buf.push(b'(');
                buf.extend_from_slice(s);
                buf.push(b')');
            },
            Object::Name(n) => {
                buf.push(b'/');
                buf.extend_from_slice(n.as_bytes());
            },
            Object::Array(arr) => self.write_array(buf, arr),
            Object::Dictionary(dict) => self.write_dictionary(buf, dict),
            Object::Stream(data) => self.write_stream(buf, data),
            Object::Reference(r) => buf.extend_from_slice(&self.serialize_reference(*r)),
        }
    }

    /// Write a PDF array.
    fn write_array(&self, buf: &mut Vec<u8>, arr: &[Object]) {
        buf.extend_from_slice(b"[ ");
        for obj in arr {
            self.write_object(buf, obj);
            buf.push(b' ');
        }
        buf.push(b']');
    }

    /// Write a PDF dictionary, one entry per line, in insertion order.
    fn write_dictionary(&self, buf: &mut Vec<u8>, dict: &Dictionary) {
        buf.extend_from_slice(b"<<\n");
        for (key, value) in dict.iter() {
            buf.push(b'/');
            buf.extend_from_slice(key.as_bytes());
            buf.push(b' ');
            self.write_object(buf, value);
            buf.push(b'\n');
        }
        buf.extend_from_slice(b">>");
    }

    /// Write a PDF stream with its derived Length dictionary.
    fn write_stream(&self, buf: &mut Vec<u8>, data: &[u8]) {
        let dict = Dictionary::new().with("Length", data.len());
        self.write_dictionary(buf, &dict);
        buf.extend_from_slice(b"\nstream\n");
        buf.extend_from_slice(data);
        buf.extend_from_slice(b"\nendstream");
    }
}

/// Format a number the way PDF's number grammar expects it.
///
/// Produces the shortest decimal string that parses back to the same `f64`,
/// without exponent notation and without a trailing `.0` on whole numbers.
/// Negative zero is written as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    // Display for f64 is shortest-round-trip and never uses exponents.
    format!("{}", value)
}

/// Widen an `f32` to the `f64` with the same shortest decimal form,
/// so `0.1f32` stays `0.1` instead of `0.10000000149011612`.
pub(crate) fn widen_f32(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}
