//! Heap management with a semi-space copying collector.
//!
//! This module implements a heap with:
//! - Two equal-sized semi-spaces (from-space and to-space)
//! - Bump-pointer allocation in from-space
//! - Field access with bounds checking
//! - Collection by evacuating live objects to to-space and swapping spaces

use std::fmt;

use core_types::{GcError, GcResult, ObjectRef, Value};
use log::{debug, warn};

use crate::config::HeapConfig;
use crate::gc::{CollectionStats, Collector};
use crate::object::{live_size, object_size, HeaderState, Word};

/// Cumulative statistics over the lifetime of a heap.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GcStats {
    /// Number of collections completed
    pub collections: usize,
    /// Total objects copied across all collections
    pub objects_copied: usize,
    /// Total words copied across all collections
    pub words_copied: usize,
    /// Total words reclaimed from unreachable objects
    pub words_reclaimed: usize,
}

impl GcStats {
    fn record(&mut self, cycle: &CollectionStats) {
        self.collections += 1;
        self.objects_copied += cycle.objects_copied;
        self.words_copied += cycle.live_words;
        self.words_reclaimed += cycle.words_reclaimed;
    }
}

/// A garbage-collected heap of fixed-field objects.
///
/// Objects are addressed by [`ObjectRef`] into the active space (from-space).
/// Any reference held outside the root set passed to [`Heap::collect`] is
/// stale after the collection.
///
/// # Examples
///
/// ```
/// use memory_manager::{Heap, Value};
///
/// let mut heap = Heap::with_capacity(20).unwrap();
/// let a = heap.allocate(1).unwrap();
/// let b = heap.allocate(1).unwrap();
/// heap.set_field(a, 0, Value::Ref(b)).unwrap();
/// heap.set_field(b, 0, Value::Ref(a)).unwrap();
///
/// let mut roots = [Value::Ref(a)];
/// heap.collect(&mut roots).unwrap();
///
/// let a = roots[0].as_object().unwrap();
/// let b = heap.get_field(a, 0).unwrap().as_object().unwrap();
/// assert_eq!(heap.get_field(b, 0).unwrap(), Value::Ref(a));
/// assert_eq!(heap.used(), 4);
/// ```
pub struct Heap {
    /// Space serving allocations
    from_space: Box<[Word]>,
    /// Space receiving live objects during collection; all words are empty
    /// between collections
    to_space: Box<[Word]>,
    /// Next free word in from-space
    free: usize,
    /// Configuration the heap was built with
    config: HeapConfig,
    /// Cumulative collection statistics
    stats: GcStats,
    /// Set when a collection fails part-way
    poisoned: bool,
}

impl Heap {
    /// Creates a new heap with the default configuration.
    pub fn new() -> Self {
        Self::from_validated(HeapConfig::default())
    }

    /// Creates a heap from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn with_config(config: HeapConfig) -> GcResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Creates a heap whose semi-spaces each hold `space_size` words.
    pub fn with_capacity(space_size: usize) -> GcResult<Self> {
        Self::with_config(HeapConfig::with_space_size(space_size))
    }

    fn from_validated(config: HeapConfig) -> Self {
        let space_size = config.space_size;
        Heap {
            from_space: vec![Word::EMPTY; space_size].into_boxed_slice(),
            to_space: vec![Word::EMPTY; space_size].into_boxed_slice(),
            free: 0,
            config,
            stats: GcStats::default(),
            poisoned: false,
        }
    }

    /// Allocates an object with `num_fields` field slots, all set to null.
    ///
    /// # Errors
    ///
    /// Returns `OutOfMemory` if from-space cannot fit the object; the heap is
    /// left unchanged and the caller may collect and retry.
    pub fn allocate(&mut self, num_fields: usize) -> GcResult<ObjectRef> {
        self.check_poisoned()?;

        let available = self.available();
        let size = match object_size(num_fields) {
            Some(size) if size <= available => size,
            _ => {
                let requested = num_fields.saturating_add(1);
                debug!(
                    "allocation of {} words failed: {} of {} words available",
                    requested,
                    available,
                    self.capacity()
                );
                return Err(GcError::OutOfMemory {
                    requested,
                    available,
                });
            }
        };

        let addr = self.free;
        // addr + size <= space_size <= MAX_SPACE_SIZE
        self.from_space[addr] = Word::Header(HeaderState::Size(size as u32));
        self.from_space[addr + 1..addr + size].fill(Word::EMPTY);
        self.free += size;

        Ok(ObjectRef::new(addr as u32))
    }

    /// Stores `value` into field `index` of `obj`.
    ///
    /// # Errors
    ///
    /// - `InvalidObject` if `obj`, or the object referenced by `value`, is not
    ///   a live object
    /// - `InvalidField` if `index` is out of bounds
    pub fn set_field(&mut self, obj: ObjectRef, index: usize, value: Value) -> GcResult<()> {
        self.check_poisoned()?;
        let slot = self.field_slot(obj, index)?;
        if let Value::Ref(target) = value {
            self.object_size(target)?;
        }
        self.from_space[slot] = Word::Field(value);
        Ok(())
    }

    /// Reads field `index` of `obj`.
    ///
    /// # Errors
    ///
    /// Same as [`Heap::set_field`].
    pub fn get_field(&self, obj: ObjectRef, index: usize) -> GcResult<Value> {
        self.check_poisoned()?;
        let slot = self.field_slot(obj, index)?;
        self.from_space[slot]
            .value()
            .ok_or(GcError::InvalidObject(obj))
    }

    /// Returns the number of fields declared by `obj`.
    pub fn num_fields(&self, obj: ObjectRef) -> GcResult<usize> {
        self.check_poisoned()?;
        Ok(self.object_size(obj)? - 1)
    }

    /// Returns whether `obj` addresses a live object header.
    pub fn contains(&self, obj: ObjectRef) -> bool {
        !self.poisoned && self.object_size(obj).is_ok()
    }

    /// Performs a full garbage collection.
    ///
    /// Every object transitively reachable from `roots` is copied to the
    /// other semi-space, compacted in breadth-first order, and every
    /// [`Value::Ref`] in `roots` is rewritten to the object's new address.
    /// Unreachable objects are discarded and the spaces are swapped.
    ///
    /// # Errors
    ///
    /// - `InvalidObject` if a root does not address a live object; the heap
    ///   is left unchanged
    /// - `HeapOverflow` if the live set does not fit in to-space; the heap
    ///   is poisoned
    pub fn collect(&mut self, roots: &mut [Value]) -> GcResult<CollectionStats> {
        self.check_poisoned()?;
        for root in roots.iter() {
            if let Value::Ref(obj) = root {
                self.object_size(*obj)?;
            }
        }

        let used = self.free;
        debug!(
            "collection {} starting: {} roots, {} of {} words in use",
            self.stats.collections + 1,
            roots.len(),
            used,
            self.capacity()
        );

        let result = Collector::new(&mut self.from_space[..used], &mut self.to_space).run(roots);
        let cycle = match result {
            Ok(cycle) => cycle,
            Err(err) => {
                self.poisoned = true;
                warn!("collection failed, heap poisoned: {}", err);
                return Err(err);
            }
        };

        std::mem::swap(&mut self.from_space, &mut self.to_space);
        self.free = cycle.live_words;
        // Only the evacuated prefix was ever written
        self.to_space[..used].fill(Word::EMPTY);
        self.stats.record(&cycle);

        debug!(
            "collection {} finished: {} objects copied, {} live words, {} words reclaimed",
            self.stats.collections, cycle.objects_copied, cycle.live_words, cycle.words_reclaimed
        );
        Ok(cycle)
    }

    /// Iterates over the objects in from-space in address order, yielding
    /// each object's address and field count.
    pub fn objects(&self) -> Objects<'_> {
        let space: &[Word] = if self.poisoned {
            &[]
        } else {
            &self.from_space[..self.free]
        };
        Objects { space, cursor: 0 }
    }

    /// Checks the structural integrity of from-space.
    ///
    /// Walks every object between 0 and the allocation cursor, checking that
    /// each header holds a valid size, that field slots hold field values,
    /// and that every reference names a live object header.
    ///
    /// # Errors
    ///
    /// Returns `InvalidObject` naming the first object that violates an
    /// invariant.
    pub fn verify(&self) -> GcResult<()> {
        self.check_poisoned()?;
        let space = &self.from_space[..self.free];

        let mut is_header = vec![false; space.len()];
        let mut cursor = 0;
        while cursor < space.len() {
            let obj = ObjectRef::new(cursor as u32);
            let size = live_size(space, obj).ok_or(GcError::InvalidObject(obj))?;
            is_header[cursor] = true;
            cursor += size;
        }

        for (obj, _) in self.objects() {
            let start = obj.index();
            let size = live_size(space, obj).ok_or(GcError::InvalidObject(obj))?;
            for word in &space[start + 1..start + size] {
                match word {
                    Word::Field(Value::Ref(target)) => {
                        if !is_header.get(target.index()).copied().unwrap_or(false) {
                            return Err(GcError::InvalidObject(obj));
                        }
                    }
                    Word::Field(_) => {}
                    Word::Header(_) => return Err(GcError::InvalidObject(obj)),
                }
            }
        }
        Ok(())
    }

    /// Returns the capacity of each semi-space in words.
    pub fn capacity(&self) -> usize {
        self.config.space_size
    }

    /// Returns the number of words currently allocated in from-space.
    pub fn used(&self) -> usize {
        self.free
    }

    /// Returns the number of words available for allocation.
    pub fn available(&self) -> usize {
        self.capacity() - self.free
    }

    /// Returns the number of garbage collections performed.
    pub fn collection_count(&self) -> usize {
        self.stats.collections
    }

    /// Returns cumulative collection statistics.
    pub fn stats(&self) -> &GcStats {
        &self.stats
    }

    /// Returns the configuration the heap was built with.
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Returns whether a failed collection has left the heap unusable.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    fn check_poisoned(&self) -> GcResult<()> {
        if self.poisoned {
            Err(GcError::Poisoned)
        } else {
            Ok(())
        }
    }

    /// Size of the live object at `obj`, checked against the allocated part
    /// of from-space.
    fn object_size(&self, obj: ObjectRef) -> GcResult<usize> {
        live_size(&self.from_space[..self.free], obj).ok_or(GcError::InvalidObject(obj))
    }

    fn field_slot(&self, obj: ObjectRef, index: usize) -> GcResult<usize> {
        let num_fields = self.object_size(obj)? - 1;
        if index >= num_fields {
            return Err(GcError::InvalidField {
                object: obj,
                index,
                num_fields,
            });
        }
        Ok(obj.index() + 1 + index)
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Heap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("space_size", &self.config.space_size)
            .field("used", &self.free)
            .field("stats", &self.stats)
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

/// Iterator over the objects of a heap, created by [`Heap::objects`].
pub struct Objects<'a> {
    space: &'a [Word],
    cursor: usize,
}

impl<'a> Iterator for Objects<'a> {
    type Item = (ObjectRef, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let obj = ObjectRef::new(self.cursor as u32);
        let size = live_size(self.space, obj)?;
        self.cursor += size;
        Some((obj, size - 1))
    }
}
