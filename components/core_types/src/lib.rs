//! Core value types and error handling for the managed heap.
//!
//! This crate provides the types shared between the heap, the collector and
//! the mutator that drives them.
//!
//! # Overview
//!
//! - [`ObjectRef`] - Typed address of an object in the active semi-space
//! - [`Value`] - Content of a field slot or root: null, scalar or reference
//! - [`GcError`] - Failures raised by allocation, field access and collection
//! - [`GcResult`] - Result alias used throughout the heap API
//!
//! # Examples
//!
//! ```
//! use core_types::{GcError, ObjectRef, Value};
//!
//! let obj = ObjectRef::new(4);
//! let field = Value::Ref(obj);
//! assert_eq!(field.as_object(), Some(obj));
//! assert!(Value::Null.is_null());
//!
//! let err = GcError::OutOfMemory { requested: 3, available: 1 };
//! assert!(err.is_recoverable());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{GcError, GcResult};
pub use value::{ObjectRef, Value};
