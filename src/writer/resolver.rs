//! Conversion of native Rust data into PDF objects.
//!
//! [`resolve`] dispatches over the closed [`Native`] enumeration. Domain types
//! that know their own PDF form implement [`ToObject`] and enter the
//! enumeration through [`Native::Custom`], or are converted directly.
//!
//! Mapping order: `IndexMap` and [`Native::Map`] keep insertion order,
//! `BTreeMap` and JSON objects iterate in key order, and `HashMap` keys are
//! sorted first so the output does not depend on hash seeds.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// Capability of producing a PDF object.
pub trait ToObject {
    /// Build the PDF object for this value.
    fn to_object(&self) -> Result<Object>;
}

impl ToObject for Object {
    fn to_object(&self) -> Result<Object> {
        Ok(self.clone())
    }
}

impl ToObject for crate::object::ObjectRef {
    fn to_object(&self) -> Result<Object> {
        Ok(Object::Reference(*self))
    }
}

/// Native data accepted by [`resolve`].
pub enum Native {
    /// Absent value
    Nil,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating-point number
    Float(f64),
    /// Text, written as a PDF string
    Str(String),
    /// Raw bytes, written as a stream
    Bytes(bytes::Bytes),
    /// An already-built object, passed through unchanged
    Object(Object),
    /// Ordered sequence
    Seq(Vec<Native>),
    /// Key/value pairs in insertion order; keys must be [`Native::Str`]
    Map(Vec<(Native, Native)>),
    /// A value that produces its own object
    Custom(Box<dyn ToObject>),
}

impl Native {
    /// Wrap a domain value implementing [`ToObject`].
    pub fn custom(value: impl ToObject + 'static) -> Self {
        Native::Custom(Box::new(value))
    }

    fn kind(&self) -> &'static str {
        match self {
            Native::Nil => "Nil",
            Native::Bool(_) => "Bool",
            Native::Int(_) => "Int",
            Native::UInt(_) => "UInt",
            Native::Float(_) => "Float",
            Native::Str(_) => "Str",
            Native::Bytes(_) => "Bytes",
            Native::Object(_) => "Object",
            Native::Seq(_) => "Seq",
            Native::Map(_) => "Map",
            Native::Custom(_) => "Custom",
        }
    }
}

impl std::fmt::Debug for Native {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Native::Nil => write!(f, "Nil"),
            Native::Bool(b) => write!(f, "Bool({})", b),
            Native::Int(i) => write!(f, "Int({})", i),
            Native::UInt(u) => write!(f, "UInt({})", u),
            Native::Float(x) => write!(f, "Float({})", x),
            Native::Str(s) => write!(f, "Str({:?})", s),
            Native::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Native::Object(o) => write!(f, "Object({:?})", o),
            Native::Seq(items) => f.debug_tuple("Seq").field(items).finish(),
            Native::Map(pairs) => f.debug_tuple("Map").field(pairs).finish(),
            Native::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Convert native data into a PDF object.
///
/// Sequences and mappings are resolved recursively. Fails with
/// [`Error::UnsupportedType`] for a mapping key that is not a string and for
/// NaN or infinite numbers, which PDF cannot express.
pub fn resolve(value: impl Into<Native>) -> Result<Object> {
    resolve_native(value.into())
}

fn resolve_native(value: Native) -> Result<Object> {
    match value {
        Native::Nil => Ok(Object::Null),
        Native::Bool(b) => Ok(Object::Boolean(b)),
        Native::Int(i) => Ok(Object::Number(i as f64)),
        Native::UInt(u) => Ok(Object::Number(u as f64)),
        Native::Float(x) if x.is_finite() => Ok(Object::Number(x)),
        Native::Float(x) => Err(Error::UnsupportedType(format!("non-finite number {}", x))),
        Native::Str(s) => Ok(Object::String(s.into_bytes())),
        Native::Bytes(b) => Ok(Object::Stream(b)),
        Native::Object(o) => Ok(o),
        Native::Seq(items) => items
            .into_iter()
            .map(resolve_native)
            .collect::<Result<Vec<_>>>()
            .map(Object::Array),
        Native::Map(pairs) => {
            let mut dict = Dictionary::new();
            for (key, value) in pairs {
                let key = match key {
                    Native::Str(k) => k,
                    other => {
                        return Err(Error::UnsupportedType(format!(
                            "dictionary key of kind {}",
                            other.kind()
                        )))
                    },
                };
                dict.put(key, resolve_native(value)?);
            }
            Ok(Object::Dictionary(dict))
        },
        Native::Custom(c) => c.to_object(),
    }
}

impl From<()> for Native {
    fn from(_: ()) -> Self {
        Native::Nil
    }
}

impl From<bool> for Native {
    fn from(b: bool) -> Self {
        Native::Bool(b)
    }
}

macro_rules! native_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Native {
            fn from(v: $t) -> Self {
                Native::Int(v as i64)
            }
        })*
    };
}

macro_rules! native_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Native {
            fn from(v: $t) -> Self {
                Native::UInt(v as u64)
            }
        })*
    };
}

native_from_signed!(i8, i16, i32, i64, isize);
native_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Native {
    fn from(v: f32) -> Self {
        Native::Float(super::object_serializer::widen_f32(v))
    }
}

impl From<f64> for Native {
    fn from(v: f64) -> Self {
        Native::Float(v)
    }
}

impl From<&str> for Native {
    fn from(s: &str) -> Self {
        Native::Str(s.to_string())
    }
}

impl From<String> for Native {
    fn from(s: String) -> Self {
        Native::Str(s)
    }
}

impl From<&[u8]> for Native {
    fn from(b: &[u8]) -> Self {
        Native::Bytes(bytes::Bytes::copy_from_slice(b))
    }
}

impl From<bytes::Bytes> for Native {
    fn from(b: bytes::Bytes) -> Self {
        Native::Bytes(b)
    }
}

impl From<Object> for Native {
    fn from(o: Object) -> Self {
        Native::Object(o)
    }
}

impl From<super::registry::IndirectHandle> for Native {
    fn from(h: super::registry::IndirectHandle) -> Self {
        Native::Object(h.into())
    }
}

impl From<crate::geometry::Rect> for Native {
    fn from(r: crate::geometry::Rect) -> Self {
        Native::custom(r)
    }
}

impl<T: Into<Native>> From<Option<T>> for Native {
    fn from(v: Option<T>) -> Self {
        v.map_or(Native::Nil, Into::into)
    }
}

/// Byte vectors become streams; sequences of anything else become arrays.
impl From<Vec<u8>> for Native {
    fn from(b: Vec<u8>) -> Self {
        Native::Bytes(b.into())
    }
}

/// Values that resolve to one element of an array.
///
/// Every native type except `u8` qualifies, since byte sequences resolve to
/// streams rather than arrays of numbers.
pub trait ArrayElement: Into<Native> {}

macro_rules! array_element {
    ($($t:ty),*) => {
        $(impl ArrayElement for $t {})*
    };
}

array_element!(
    (), bool, i8, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64, &str, String,
    bytes::Bytes, Object, Native, super::registry::IndirectHandle, crate::geometry::Rect,
    serde_json::Value, Vec<u8>
);

impl<T: Into<Native>> ArrayElement for Option<T> {}
impl<T: ArrayElement> ArrayElement for Vec<T> {}
impl<T: ArrayElement, const N: usize> ArrayElement for [T; N] {}
impl<T: Into<Native>> ArrayElement for IndexMap<String, T> {}
impl<T: Into<Native>> ArrayElement for BTreeMap<String, T> {}
impl<T: Into<Native>> ArrayElement for HashMap<String, T> {}

impl<T: ArrayElement> From<Vec<T>> for Native {
    fn from(items: Vec<T>) -> Self {
        Native::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: ArrayElement, const N: usize> From<[T; N]> for Native {
    fn from(items: [T; N]) -> Self {
        Native::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: ArrayElement + Clone> From<&[T]> for Native {
    fn from(items: &[T]) -> Self {
        Native::Seq(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Native>> From<IndexMap<String, T>> for Native {
    fn from(map: IndexMap<String, T>) -> Self {
        Native::Map(map.into_iter().map(|(k, v)| (Native::Str(k), v.into())).collect())
    }
}

impl<T: Into<Native>> From<BTreeMap<String, T>> for Native {
    fn from(map: BTreeMap<String, T>) -> Self {
        Native::Map(map.into_iter().map(|(k, v)| (Native::Str(k), v.into())).collect())
    }
}

impl<T: Into<Native>> From<HashMap<String, T>> for Native {
    fn from(map: HashMap<String, T>) -> Self {
        let mut entries: Vec<(String, T)> = map.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Native::Map(entries.into_iter().map(|(k, v)| (Native::Str(k), v.into())).collect())
    }
}

impl From<serde_json::Value> for Native {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Native::Nil,
            Value::Bool(b) => Native::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Native::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Native::UInt(u)
                } else {
                    Native::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            },
            Value::String(s) => Native::Str(s),
            Value::Array(items) => Native::Seq(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                Native::Map(map.into_iter().map(|(k, v)| (Native::Str(k), v.into())).collect())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectRef;
    use crate::writer::ObjectSerializer;

    fn render(value: impl Into<Native>) -> String {
        ObjectSerializer::new().serialize_to_string(&resolve(value).unwrap())
    }

    #[test]
    fn test_resolve_scalars() {
        assert_eq!(render(()), "null");
        assert_eq!(render(true), "true");
        assert_eq!(render(-10), "-10");
        assert_eq!(render(2.0), "2");
        assert_eq!(render(0.1f32), "0.1");
        assert_eq!(render(""), "()");
        assert_eq!(render(String::from("hello")), "(hello)");
    }

    #[test]
    fn test_resolve_option() {
        assert_eq!(render(None::<i32>), "null");
        assert_eq!(render(Some(3)), "3");
    }

    #[test]
    fn test_resolve_sequences() {
        assert_eq!(render(vec![1.1]), "[ 1.1 ]");
        assert_eq!(render(Vec::<f64>::new()), "[ ]");
        assert_eq!(
            render(vec![Native::from(2), Native::from("text"), Native::Nil]),
            "[ 2 (text) null ]"
        );
    }

    #[test]
    fn test_resolve_array_including_array_and_dictionary() {
        let mut dict = BTreeMap::new();
        dict.insert("A".to_string(), 1i32);
        let value = vec![Native::from(vec![1i32, 2]), Native::from(dict)];
        assert_eq!(render(value), "[ [ 1 2 ] <<\n/A 1\n>> ]");
    }

    #[test]
    fn test_resolve_nested_collections_without_wrapping() {
        assert_eq!(render(vec![vec![1i32, 2], vec![]]), "[ [ 1 2 ] [ ] ]");
        assert_eq!(render(vec![Some(1.5f64), None]), "[ 1.5 null ]");
        assert_eq!(render([0.0f64, 0.0, 612.0, 792.0]), "[ 0 0 612 792 ]");
        assert_eq!(render(&["a", "b"][..]), "[ (a) (b) ]");
        assert_eq!(
            render(vec![b"xy".to_vec()]),
            "[ <<\n/Length 2\n>>\nstream\nxy\nendstream ]"
        );

        let mut page = IndexMap::new();
        page.insert("Type".to_string(), Native::Object(Object::name("Page")));
        assert_eq!(render(vec![page]), "[ <<\n/Type /Page\n>> ]");

        let mut counts = HashMap::new();
        counts.insert("n".to_string(), 2u32);
        assert_eq!(render(vec![counts]), "[ <<\n/n 2\n>> ]");
    }

    #[test]
    fn test_resolve_handles_and_rects_in_arrays() {
        use crate::geometry::Rect;
        use crate::writer::ObjectRegistry;

        let mut registry = ObjectRegistry::new();
        let kids = vec![registry.register().unwrap(), registry.register().unwrap()];
        assert_eq!(render(kids), "[ 1 0 R 2 0 R ]");
        assert_eq!(render(vec![Rect::new(0.0, 0.0, 1.0, 2.0)]), "[ [ 0 0 1 2 ] ]");
    }

    #[test]
    fn test_resolve_bytes_as_stream() {
        assert_eq!(render(b"abc".to_vec()), "<<\n/Length 3\n>>\nstream\nabc\nendstream");
        assert_eq!(render(&b""[..]), "<<\n/Length 0\n>>\nstream\n\nendstream");
    }

    #[test]
    fn test_resolve_object_passthrough() {
        let obj = Object::name("Catalog");
        assert_eq!(resolve(obj.clone()).unwrap(), obj);
    }

    #[test]
    fn test_resolve_index_map_keeps_insertion_order() {
        let mut map = IndexMap::new();
        map.insert("Z".to_string(), 1);
        map.insert("A".to_string(), 2);
        assert_eq!(render(map), "<<\n/Z 1\n/A 2\n>>");
    }

    #[test]
    fn test_resolve_hash_map_sorts_keys() {
        let mut map = HashMap::new();
        map.insert("b".to_string(), 2);
        map.insert("a".to_string(), 1);
        map.insert("c".to_string(), 3);
        assert_eq!(render(map), "<<\n/a 1\n/b 2\n/c 3\n>>");
    }

    #[test]
    fn test_resolve_single_entry_map() {
        let mut map = BTreeMap::new();
        map.insert("A".to_string(), 1);
        assert_eq!(render(map), "<<\n/A 1\n>>");
    }

    #[test]
    fn test_resolve_nested_map() {
        let mut inner = IndexMap::new();
        inner.insert("Kids".to_string(), Native::from(Vec::<i32>::new()));
        let mut outer = IndexMap::new();
        outer.insert("Pages".to_string(), Native::from(inner));
        assert_eq!(render(outer), "<<\n/Pages <<\n/Kids [ ]\n>>\n>>");
    }

    #[test]
    fn test_resolve_non_string_key_fails() {
        let map = Native::Map(vec![(Native::Int(1), Native::Bool(true))]);
        match resolve(map) {
            Err(Error::UnsupportedType(msg)) => assert!(msg.contains("Int")),
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_nested_failure_propagates() {
        let seq = Native::Seq(vec![Native::Int(1), Native::Float(f64::NAN)]);
        assert!(matches!(resolve(seq), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_resolve_custom_hook() {
        struct Marker;
        impl ToObject for Marker {
            fn to_object(&self) -> Result<Object> {
                Ok(Object::name("Marker"))
            }
        }
        assert_eq!(render(Native::custom(Marker)), "/Marker");
        assert_eq!(render(Native::custom(ObjectRef::new(4, 0))), "4 0 R");
    }

    #[test]
    fn test_resolve_json() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"Type": "Annot", "Rect": [0, 0, 10.5, 20], "Open": false, "P": null}"#)
                .unwrap();
        assert_eq!(
            render(value),
            "<<\n/Open false\n/P null\n/Rect [ 0 0 10.5 20 ]\n/Type (Annot)\n>>"
        );
    }
}
