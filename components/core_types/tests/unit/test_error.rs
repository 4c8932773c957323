//! Unit tests for GcError

use core_types::{GcError, GcResult, ObjectRef};

#[cfg(test)]
mod gc_error_tests {
    use super::*;

    #[test]
    fn test_out_of_memory_message() {
        let err = GcError::OutOfMemory {
            requested: 3,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "out of memory: requested 3 words, 1 available"
        );
    }

    #[test]
    fn test_heap_overflow_message() {
        let err = GcError::HeapOverflow {
            required: 12,
            capacity: 10,
        };
        assert_eq!(
            err.to_string(),
            "heap overflow during collection: 12 words required, capacity is 10"
        );
    }

    #[test]
    fn test_invalid_config_message() {
        let err = GcError::InvalidConfig("space_size must be greater than 0".to_string());
        assert!(err.to_string().contains("space_size"));
    }

    #[test]
    fn test_only_out_of_memory_is_recoverable() {
        let errors = [
            GcError::HeapOverflow {
                required: 1,
                capacity: 0,
            },
            GcError::InvalidField {
                object: ObjectRef::new(0),
                index: 0,
                num_fields: 0,
            },
            GcError::InvalidObject(ObjectRef::new(1)),
            GcError::InvalidConfig(String::new()),
            GcError::Poisoned,
        ];
        for err in errors {
            assert!(!err.is_recoverable(), "{:?} should not be recoverable", err);
        }
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
        assert_error(&GcError::Poisoned);
    }

    #[test]
    fn test_result_alias_with_question_mark() {
        fn fails() -> GcResult<()> {
            Err(GcError::InvalidObject(ObjectRef::new(9)))
        }
        fn propagates() -> GcResult<u32> {
            fails()?;
            Ok(1)
        }
        assert_eq!(
            propagates(),
            Err(GcError::InvalidObject(ObjectRef::new(9)))
        );
    }
}
