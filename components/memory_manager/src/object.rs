//! Object layout within a semi-space.
//!
//! An object with `n` fields occupies `1 + n` consecutive words: a header
//! word followed by `n` field slots. The header normally records the object
//! size; once the collector has copied the object it is overwritten with the
//! object's new address.

use core_types::{ObjectRef, Value};

/// Header word of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    /// Live object occupying this many words, header included (always >= 1)
    Size(u32),
    /// Object already copied to to-space during the current collection
    Forwarded(ObjectRef),
}

impl HeaderState {
    /// Returns the object size in words, unless the object was forwarded.
    pub fn size(&self) -> Option<usize> {
        match self {
            HeaderState::Size(size) => Some(*size as usize),
            HeaderState::Forwarded(_) => None,
        }
    }

    /// Returns the forwarding address, if the object was copied.
    pub fn forwarding(&self) -> Option<ObjectRef> {
        match self {
            HeaderState::Forwarded(dest) => Some(*dest),
            HeaderState::Size(_) => None,
        }
    }

    /// Returns true if this object has been forwarded.
    pub fn is_forwarded(&self) -> bool {
        matches!(self, HeaderState::Forwarded(_))
    }
}

/// A single storage unit of a semi-space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    /// Object header
    Header(HeaderState),
    /// Field slot
    Field(Value),
}

impl Word {
    /// Contents of every word outside an allocated object.
    pub const EMPTY: Word = Word::Field(Value::Null);

    /// Returns the header state, if this word is a header.
    pub fn header(&self) -> Option<HeaderState> {
        match self {
            Word::Header(header) => Some(*header),
            Word::Field(_) => None,
        }
    }

    /// Returns the field value, if this word is a field slot.
    pub fn value(&self) -> Option<Value> {
        match self {
            Word::Field(value) => Some(*value),
            Word::Header(_) => None,
        }
    }
}

impl Default for Word {
    fn default() -> Self {
        Word::EMPTY
    }
}

/// Number of words occupied by an object with `num_fields` fields.
///
/// Returns `None` if the size does not fit in a `usize`.
pub const fn object_size(num_fields: usize) -> Option<usize> {
    num_fields.checked_add(1)
}

/// Size of the unforwarded object whose header is at `obj`.
///
/// Returns `None` when `obj` is out of range, points at a field slot or at a
/// forwarded header, or when the object would extend past the end of `space`.
pub(crate) fn live_size(space: &[Word], obj: ObjectRef) -> Option<usize> {
    match space.get(obj.index()) {
        Some(Word::Header(HeaderState::Size(size))) => {
            let size = *size as usize;
            let end = obj.index().checked_add(size)?;
            (size >= 1 && end <= space.len()).then_some(size)
        }
        _ => None,
    }
}
