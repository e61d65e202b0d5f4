//! PDF object types.
//!
//! The eight PDF value kinds plus the indirect reference token. Every value
//! that ends up in a document is an [`Object`]; indirect objects embed each
//! other through [`Object::Reference`] and are never inlined.

use indexmap::IndexMap;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Object {
    /// Null object
    #[default]
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer or real number
    Number(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (written with a leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (ordered, unique keys)
    Dictionary(Dictionary),
    /// Stream payload; its Length entry is derived when serialized
    Stream(bytes::Bytes),
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

/// An insertion-ordered PDF dictionary.
///
/// Keys are unique. [`Dictionary::put`] replaces the value of an existing key
/// in place and appends new keys at the end, so the serialized order is the
/// order in which keys were first inserted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: IndexMap<String, Object>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, returning the previous value if the key existed.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Object>) -> Option<Object> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style [`put`](Self::put).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Object>) -> Self {
        self.put(key, value);
        self
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    /// Position of a key in insertion order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Object)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Object> {
        self.entries.values()
    }
}

impl<K: Into<String>, V: Into<Object>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (k, v) in iter {
            dict.put(k, v);
        }
        dict
    }
}

impl Object {
    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Number(_) => "Number",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream(_) => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Create a Name object.
    pub fn name(s: impl Into<String>) -> Object {
        Object::Name(s.into())
    }

    /// Create a String object from text.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Create a Stream object from a payload.
    pub fn stream(data: impl Into<bytes::Bytes>) -> Object {
        Object::Stream(data.into())
    }

    /// Try to cast to number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Try to cast to mutable dictionary.
    pub fn as_dict_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to mutable array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to cast to string (bytes).
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to stream payload.
    pub fn as_stream(&self) -> Option<&[u8]> {
        match self {
            Object::Stream(data) => Some(data),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Visit every indirect reference embedded in this object, depth first.
    pub fn for_each_reference(&self, f: &mut impl FnMut(ObjectRef)) {
        match self {
            Object::Reference(r) => f(*r),
            Object::Array(items) => items.iter().for_each(|o| o.for_each_reference(f)),
            Object::Dictionary(dict) => dict.values().for_each(|o| o.for_each_reference(f)),
            _ => {},
        }
    }

    /// Visit every number in this object, depth first.
    pub fn for_each_number(&self, f: &mut impl FnMut(f64)) {
        match self {
            Object::Number(n) => f(*n),
            Object::Array(items) => items.iter().for_each(|o| o.for_each_number(f)),
            Object::Dictionary(dict) => dict.values().for_each(|o| o.for_each_number(f)),
            _ => {},
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<f64> for Object {
    fn from(n: f64) -> Self {
        Object::Number(n)
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Object::Number(n as f64)
    }
}

impl From<i32> for Object {
    fn from(n: i32) -> Self {
        Object::Number(f64::from(n))
    }
}

impl From<u32> for Object {
    fn from(n: u32) -> Self {
        Object::Number(f64::from(n))
    }
}

impl From<usize> for Object {
    fn from(n: usize) -> Self {
        Object::Number(n as f64)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::string(s)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::Array(items)
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}

impl From<ObjectRef> for Object {
    fn from(r: ObjectRef) -> Self {
        Object::Reference(r)
    }
}
