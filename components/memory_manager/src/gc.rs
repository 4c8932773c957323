//! Semi-space copying garbage collector.
//!
//! This module implements Cheney's algorithm for copying garbage collection:
//! - Copy every object named by a root into to-space
//! - Scan to-space breadth-first, copying each referenced object on first
//!   sight and rewriting the reference to its new address
//! - Leave a forwarding header behind in from-space so that an object is
//!   copied exactly once, however many paths lead to it
//!
//! The region of to-space between the scan cursor and the allocation cursor
//! is the work queue; no separate mark phase or visited set is needed.
//! Swapping the spaces afterwards is the job of [`Heap`](crate::Heap).

use core_types::{GcError, GcResult, ObjectRef, Value};
use log::trace;

use crate::config::MAX_SPACE_SIZE;
use crate::object::{HeaderState, Word};

/// Outcome of a single collection cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    /// Number of live objects copied to to-space
    pub objects_copied: usize,
    /// Words occupied by live objects after the collection
    pub live_words: usize,
    /// Words of from-space occupied by unreachable objects
    pub words_reclaimed: usize,
}

/// One copying-collection cycle over a pair of spaces.
///
/// `from_space` should span exactly the words in use; `to_space` must be
/// entirely free. After [`Collector::run`] succeeds, `to_space[..live_words]`
/// holds the compacted live objects and every copied object's header in
/// `from_space` holds its forwarding address.
pub struct Collector<'a> {
    /// Space being evacuated
    from_space: &'a mut [Word],
    /// Space receiving the live objects
    to_space: &'a mut [Word],
    /// Next free word in to-space
    free_to: usize,
    /// Next to-space object whose fields have not been scanned
    scan: usize,
    /// Objects copied so far
    objects_copied: usize,
}

impl<'a> Collector<'a> {
    /// Creates a collector that evacuates `from_space` into `to_space`.
    pub fn new(from_space: &'a mut [Word], to_space: &'a mut [Word]) -> Self {
        Collector {
            from_space,
            to_space,
            free_to: 0,
            scan: 0,
            objects_copied: 0,
        }
    }

    /// Runs a full collection cycle.
    ///
    /// Every [`Value::Ref`] in `roots` is replaced by the object's to-space
    /// address; nulls and scalars are left untouched.
    ///
    /// # Errors
    ///
    /// - `HeapOverflow` if the live objects do not fit in to-space
    /// - `InvalidObject` if a root or field does not address an object
    ///
    /// On error both spaces are left partially evacuated.
    pub fn run(mut self, roots: &mut [Value]) -> GcResult<CollectionStats> {
        if self.to_space.len() > MAX_SPACE_SIZE {
            return Err(GcError::InvalidConfig(format!(
                "to-space of {} words exceeds the maximum of {} words",
                self.to_space.len(),
                MAX_SPACE_SIZE
            )));
        }

        for root in roots.iter_mut() {
            if let Value::Ref(obj) = *root {
                *root = Value::Ref(self.copy_object(obj)?);
            }
        }

        self.scan_to_space()?;

        Ok(CollectionStats {
            objects_copied: self.objects_copied,
            live_words: self.free_to,
            words_reclaimed: self.from_space.len().saturating_sub(self.free_to),
        })
    }

    /// Scans copied objects until the scan cursor catches up with the
    /// allocation cursor.
    fn scan_to_space(&mut self) -> GcResult<()> {
        while self.scan < self.free_to {
            let size = match self.to_space[self.scan] {
                Word::Header(HeaderState::Size(size)) if size >= 1 => size as usize,
                // to-space offsets are bounded by MAX_SPACE_SIZE
                _ => return Err(GcError::InvalidObject(ObjectRef::new(self.scan as u32))),
            };

            for slot in self.scan + 1..self.scan + size {
                if let Word::Field(Value::Ref(target)) = self.to_space[slot] {
                    let moved = self.copy_object(target)?;
                    self.to_space[slot] = Word::Field(Value::Ref(moved));
                }
            }

            self.scan += size;
        }
        Ok(())
    }

    /// Copies a single object to to-space, or returns its forwarding address
    /// if it has already been copied.
    ///
    /// The forwarding header is installed before any of the object's fields
    /// are scanned, so self-references and cycles resolve to the copy.
    fn copy_object(&mut self, src: ObjectRef) -> GcResult<ObjectRef> {
        let start = src.index();
        let size = match self.from_space.get(start) {
            Some(Word::Header(HeaderState::Forwarded(dest))) => return Ok(*dest),
            Some(Word::Header(HeaderState::Size(size))) if *size >= 1 => *size as usize,
            _ => return Err(GcError::InvalidObject(src)),
        };
        let end = start + size;
        if end > self.from_space.len() {
            return Err(GcError::InvalidObject(src));
        }

        let dest = self.free_to;
        let required = dest + size;
        if required > self.to_space.len() {
            return Err(GcError::HeapOverflow {
                required,
                capacity: self.to_space.len(),
            });
        }

        self.to_space[dest..required].copy_from_slice(&self.from_space[start..end]);
        // dest < to_space.len() <= MAX_SPACE_SIZE
        let dest_ref = ObjectRef::new(dest as u32);
        self.from_space[start] = Word::Header(HeaderState::Forwarded(dest_ref));
        self.free_to = required;
        self.objects_copied += 1;

        trace!("copied {} -> {} ({} words)", src, dest_ref, size);
        Ok(dest_ref)
    }
}
