//! Indirect object registry.
//!
//! The registry is the arena every indirect object of a document lives in.
//! [`ObjectRegistry::register`] hands out a [`IndirectHandle`] that can be
//! embedded into other objects right away, before the referenced content
//! exists. Content is supplied later through [`ObjectRegistry::resolve`].

use super::object_serializer::ObjectSerializer;
use super::resolver::ToObject;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_REGISTRY_ID: AtomicU32 = AtomicU32::new(1);

/// A value promoted to its own object number and byte offset.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    number: u32,
    offset: Option<u64>,
    object: Object,
}

impl IndirectObject {
    fn placeholder(number: u32) -> Self {
        Self {
            number,
            offset: None,
            object: Object::Null,
        }
    }

    /// Object number, unique within the document.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Byte offset of the body in the output, once written.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// The wrapped value.
    pub fn object(&self) -> &Object {
        &self.object
    }

    /// Reference to this object.
    pub fn reference(&self) -> ObjectRef {
        ObjectRef::new(self.number, 0)
    }

    /// Inline reference token, e.g. `3 0 R`.
    pub fn reference_token(&self) -> Vec<u8> {
        ObjectSerializer::new().serialize_reference(self.reference())
    }

    /// Serialized body for the file's body section.
    pub fn body(&self) -> Vec<u8> {
        ObjectSerializer::new().serialize_indirect(self.number, 0, &self.object)
    }

    /// Cross-reference table line: 10-digit offset, generation, `n`, CRLF.
    ///
    /// An object that has not been written yet reports offset zero.
    pub fn xref_entry(&self) -> Vec<u8> {
        format!("{:010} {:05} n\r\n", self.offset.unwrap_or(0), 0).into_bytes()
    }
}

/// Handle to an object registered with a specific [`ObjectRegistry`].
///
/// Handles are cheap to copy and stay valid for the lifetime of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndirectHandle {
    registry: u32,
    reference: ObjectRef,
}

impl IndirectHandle {
    /// The object number this handle points at.
    pub fn number(&self) -> u32 {
        self.reference.id
    }

    /// Reference token value for embedding into other objects.
    pub fn reference(&self) -> ObjectRef {
        self.reference
    }
}

impl From<IndirectHandle> for Object {
    fn from(handle: IndirectHandle) -> Self {
        Object::Reference(handle.reference)
    }
}

impl ToObject for IndirectHandle {
    fn to_object(&self) -> Result<Object> {
        Ok(Object::Reference(self.reference))
    }
}

/// Ordered store of a document's indirect objects.
#[derive(Debug)]
pub struct ObjectRegistry {
    id: u32,
    objects: Vec<IndirectObject>,
    sealed: bool,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            objects: Vec::new(),
            sealed: false,
        }
    }

    /// Reserve the next object number with a null placeholder.
    pub fn register(&mut self) -> Result<IndirectHandle> {
        if self.sealed {
            return Err(Error::RegistrySealed);
        }
        Ok(self.reserve())
    }

    /// Register without the sealed check, for structure owned by the writer.
    pub(crate) fn reserve(&mut self) -> IndirectHandle {
        let number = self.objects.len() as u32 + 1;
        self.objects.push(IndirectObject::placeholder(number));
        log::trace!("Registered indirect object {}", number);
        IndirectHandle {
            registry: self.id,
            reference: ObjectRef::new(number, 0),
        }
    }

    /// Set the content of a handle this registry just issued.
    pub(crate) fn set(&mut self, handle: IndirectHandle, object: Object) {
        let index = handle.reference.id as usize - 1;
        self.objects[index].object = object;
    }

    /// Register an object and set its content in one step.
    pub fn add(&mut self, object: impl Into<Object>) -> Result<IndirectHandle> {
        let handle = self.register()?;
        self.resolve(handle, object)?;
        Ok(handle)
    }

    /// Replace the content of a registered object. The last value set wins.
    pub fn resolve(&mut self, handle: IndirectHandle, object: impl Into<Object>) -> Result<()> {
        let index = self.index_of(handle)?;
        self.objects[index].object = object.into();
        Ok(())
    }

    /// Inline reference token for a registered object.
    pub fn reference_token(&self, handle: IndirectHandle) -> Result<Vec<u8>> {
        Ok(self.get(handle)?.reference_token())
    }

    /// Look up a registered object.
    pub fn get(&self, handle: IndirectHandle) -> Result<&IndirectObject> {
        let index = self.index_of(handle)?;
        Ok(&self.objects[index])
    }

    /// Number of registered objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if no object has been registered.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over objects in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &IndirectObject> {
        self.objects.iter()
    }

    /// Whether new registrations are refused.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Refuse further registrations. Resolution stays possible.
    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    /// Check that every reference embedded in any object points at a
    /// registered object.
    pub fn validate_references(&self) -> Result<()> {
        let count = self.objects.len() as u32;
        let mut dangling = None;
        for obj in &self.objects {
            obj.object.for_each_reference(&mut |r| {
                if dangling.is_none() && (r.id == 0 || r.id > count || r.gen != 0) {
                    dangling = Some(r);
                }
            });
            if let Some(r) = dangling {
                return Err(Error::InvalidHandle(r));
            }
        }
        Ok(())
    }

    /// Check that every number held by any object is finite.
    ///
    /// NaN and infinities have no representation in the number grammar, so
    /// they are reported as [`Error::UnsupportedType`] before writing.
    pub fn validate_numbers(&self) -> Result<()> {
        for obj in &self.objects {
            let mut bad = None;
            obj.object.for_each_number(&mut |n| {
                if bad.is_none() && !n.is_finite() {
                    bad = Some(n);
                }
            });
            if let Some(n) = bad {
                return Err(Error::UnsupportedType(format!(
                    "non-finite number {} in object {}",
                    n, obj.number
                )));
            }
        }
        Ok(())
    }

    /// Record the body offset of the object at `index` (registration order).
    pub(crate) fn fix_offset(&mut self, index: usize, offset: u64) -> &IndirectObject {
        let obj = &mut self.objects[index];
        debug_assert!(obj.offset.is_none(), "offset of object {} set twice", obj.number);
        obj.offset = Some(offset);
        obj
    }

    fn index_of(&self, handle: IndirectHandle) -> Result<usize> {
        let number = handle.reference.id;
        if handle.registry != self.id || number == 0 || number as usize > self.objects.len() {
            return Err(Error::InvalidHandle(handle.reference));
        }
        Ok(number as usize - 1)
    }
}
