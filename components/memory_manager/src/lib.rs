//! Memory Manager - Semi-space copying garbage collector and heap management
//!
//! This component provides:
//! - A heap of fixed-field objects with bump-pointer allocation
//! - Cheney-style copying collection that compacts live objects
//! - Forwarding headers guaranteeing each live object is copied exactly once
//! - Heap configuration, statistics and integrity verification
//!
//! The collector is stop-the-world and single-threaded: every operation
//! takes the heap by exclusive reference and runs to completion.

pub mod config;
pub mod gc;
pub mod heap;
pub mod object;

// Re-export main types
pub use config::{HeapConfig, DEFAULT_SPACE_SIZE, MAX_SPACE_SIZE};
pub use core_types::{GcError, GcResult, ObjectRef, Value};
pub use gc::{CollectionStats, Collector};
pub use heap::{GcStats, Heap, Objects};
pub use object::{object_size, HeaderState, Word};
