//! Heap and collector error types.

use thiserror::Error;

use crate::ObjectRef;

/// Failures surfaced by the heap and the collector.
///
/// All errors are reported synchronously to the caller of the operation that
/// triggered them; nothing is retried internally.
///
/// # Examples
///
/// ```
/// use core_types::{GcError, ObjectRef};
///
/// let err = GcError::InvalidField {
///     object: ObjectRef::new(0),
///     index: 2,
///     num_fields: 1,
/// };
/// assert_eq!(err.to_string(), "field 2 out of bounds for @0 with 1 fields");
/// assert!(!err.is_recoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GcError {
    /// From-space has no room for the requested object. Collecting and
    /// retrying may succeed.
    #[error("out of memory: requested {requested} words, {available} available")]
    OutOfMemory {
        /// Words the allocation needed, header included
        requested: usize,
        /// Words left in from-space
        available: usize,
    },

    /// To-space filled up while copying live objects. The heap is left
    /// poisoned.
    #[error("heap overflow during collection: {required} words required, capacity is {capacity}")]
    HeapOverflow {
        /// To-space words needed to finish the copy in progress
        required: usize,
        /// To-space capacity in words
        capacity: usize,
    },

    /// Field index outside the object's declared field count.
    #[error("field {index} out of bounds for {object} with {num_fields} fields")]
    InvalidField {
        /// Object being accessed
        object: ObjectRef,
        /// Requested field index
        index: usize,
        /// Number of fields the object declares
        num_fields: usize,
    },

    /// Address does not name a live object header in the active space.
    #[error("{0} does not address a live object")]
    InvalidObject(ObjectRef),

    /// Heap configuration was rejected.
    #[error("invalid heap configuration: {0}")]
    InvalidConfig(String),

    /// A previous collection failed part-way and the heap contents are
    /// undefined.
    #[error("heap is poisoned by a failed collection")]
    Poisoned,
}

impl GcError {
    /// Returns whether the mutator can recover from this error by collecting
    /// and retrying the operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GcError::OutOfMemory { .. })
    }

    /// Returns whether this error leaves the heap unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GcError::HeapOverflow { .. } | GcError::Poisoned)
    }
}

/// Result type for heap operations
pub type GcResult<T> = Result<T, GcError>;
