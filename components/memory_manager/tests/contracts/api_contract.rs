//! Contract tests pinning the public memory_manager API.
//! These tests ensure all exported types and functions exist with correct signatures
//! and honour the documented error behaviour.

use memory_manager::{
    CollectionStats, GcError, GcResult, Heap, HeapConfig, ObjectRef, Value, DEFAULT_SPACE_SIZE,
};

/// Test Heap contract: new() -> Self
#[test]
fn contract_heap_new() {
    let heap = Heap::new();
    assert_eq!(heap.capacity(), DEFAULT_SPACE_SIZE);
    assert_eq!(heap.used(), 0);
}

/// Test Heap contract: with_config(HeapConfig) -> GcResult<Heap>
#[test]
fn contract_heap_with_config() {
    let heap = Heap::with_config(HeapConfig::with_space_size(20)).unwrap();
    assert_eq!(heap.capacity(), 20);
    assert_eq!(heap.config().space_size, 20);
}

/// Test Heap contract: allocate(num_fields: usize) -> GcResult<ObjectRef>
#[test]
fn contract_heap_allocate() {
    let mut heap = Heap::with_capacity(20).unwrap();
    let obj: GcResult<ObjectRef> = heap.allocate(1);
    assert_eq!(obj, Ok(ObjectRef::new(0)));
    assert_eq!(heap.used(), 2);
}

/// Test allocate contract: exhaustion reports OutOfMemory
#[test]
fn contract_heap_allocate_out_of_memory() {
    let mut heap = Heap::with_capacity(2).unwrap();
    heap.allocate(1).unwrap();
    let err = heap.allocate(0).unwrap_err();
    assert!(matches!(err, GcError::OutOfMemory { .. }));
    assert!(err.is_recoverable());
}

/// Test Heap contract: set_field(obj, index, value) -> GcResult<()>
#[test]
fn contract_heap_set_field() {
    let mut heap = Heap::with_capacity(20).unwrap();
    let obj = heap.allocate(1).unwrap();
    let result: GcResult<()> = heap.set_field(obj, 0, Value::Int(42));
    assert!(result.is_ok());
}

/// Test Heap contract: get_field(obj, index) -> GcResult<Value>
#[test]
fn contract_heap_get_field() {
    let mut heap = Heap::with_capacity(20).unwrap();
    let obj = heap.allocate(1).unwrap();
    heap.set_field(obj, 0, Value::Int(42)).unwrap();
    let value: GcResult<Value> = heap.get_field(obj, 0);
    assert_eq!(value, Ok(Value::Int(42)));
}

/// Test field contract: out-of-bounds index reports InvalidField
#[test]
fn contract_heap_invalid_field() {
    let mut heap = Heap::with_capacity(20).unwrap();
    let obj = heap.allocate(0).unwrap();
    assert!(matches!(
        heap.get_field(obj, 0),
        Err(GcError::InvalidField { num_fields: 0, .. })
    ));
    assert!(matches!(
        heap.set_field(obj, 0, Value::Null),
        Err(GcError::InvalidField { index: 0, .. })
    ));
}

/// Test Heap contract: collect(roots: &mut [Value]) -> GcResult<CollectionStats>
#[test]
fn contract_heap_collect() {
    let mut heap = Heap::with_capacity(20).unwrap();
    let obj = heap.allocate(0).unwrap();
    let mut roots = vec![Value::Ref(obj), Value::Null];
    let stats: GcResult<CollectionStats> = heap.collect(&mut roots);
    assert_eq!(stats.unwrap().objects_copied, 1);
    assert_eq!(roots[1], Value::Null);
    assert_eq!(heap.collection_count(), 1);
}

/// Test HeapConfig contract: from_json(&str) -> GcResult<HeapConfig>
#[test]
fn contract_heap_config_from_json() {
    let config = HeapConfig::from_json(r#"{ "space_size": 64 }"#).unwrap();
    let heap = Heap::with_config(config).unwrap();
    assert_eq!(heap.capacity(), 64);
}

/// Test Heap is movable across threads between uses
#[test]
fn contract_heap_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Heap>();
}
