//! Field values and object references.
//!
//! Heap words are tagged rather than sign-overloaded: a reference is never
//! confused with a scalar, and "no reference" is an explicit variant instead
//! of a reserved integer.

use std::fmt;

/// Address of an object in the active semi-space.
///
/// The wrapped offset is the word index of the object's header. A reference
/// is only meaningful until the next collection; afterwards only references
/// that were reachable from the root set (and were rewritten by the
/// collector) are valid.
///
/// # Examples
///
/// ```
/// use core_types::ObjectRef;
///
/// let obj = ObjectRef::new(7);
/// assert_eq!(obj.offset(), 7);
/// assert_eq!(obj.index(), 7usize);
/// assert_eq!(obj.to_string(), "@7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectRef(u32);

impl ObjectRef {
    /// Creates a reference to the object whose header is at `offset`.
    pub const fn new(offset: u32) -> Self {
        ObjectRef(offset)
    }

    /// Returns the word offset of the object's header.
    pub const fn offset(self) -> u32 {
        self.0
    }

    /// Returns the word offset as a slice index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Content of a field slot or a root.
///
/// Only [`Value::Ref`] is traced and relocated by the collector. Scalars and
/// nulls pass through a collection unchanged.
///
/// # Examples
///
/// ```
/// use core_types::{ObjectRef, Value};
///
/// assert_eq!(Value::default(), Value::Null);
/// assert_eq!(Value::Int(-3).as_int(), Some(-3));
/// assert_eq!(Value::from(ObjectRef::new(2)).as_object(), Some(ObjectRef::new(2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// No reference
    #[default]
    Null,
    /// Scalar payload
    Int(i64),
    /// Reference to another object
    Ref(ObjectRef),
}

impl Value {
    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the referenced object, if this value is a reference.
    pub fn as_object(&self) -> Option<ObjectRef> {
        match self {
            Value::Ref(obj) => Some(*obj),
            _ => None,
        }
    }

    /// Returns the scalar payload, if this value is a scalar.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Ref(obj)
    }
}

impl From<Option<ObjectRef>> for Value {
    fn from(obj: Option<ObjectRef>) -> Self {
        obj.map_or(Value::Null, Value::Ref)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Ref(obj) => write!(f, "{}", obj),
        }
    }
}
