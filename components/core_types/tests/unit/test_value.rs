//! Unit tests for ObjectRef and Value

use core_types::{ObjectRef, Value};
use std::collections::HashSet;

#[cfg(test)]
mod object_ref_tests {
    use super::*;

    #[test]
    fn test_object_ref_zero_is_valid_address() {
        let obj = ObjectRef::new(0);
        assert_eq!(obj.index(), 0);
        assert_eq!(Value::Ref(obj).as_object(), Some(obj));
    }

    #[test]
    fn test_object_ref_equality() {
        assert_eq!(ObjectRef::new(5), ObjectRef::new(5));
        assert_ne!(ObjectRef::new(5), ObjectRef::new(6));
    }

    #[test]
    fn test_object_ref_hashable() {
        let set: HashSet<ObjectRef> = [ObjectRef::new(1), ObjectRef::new(1), ObjectRef::new(2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_object_ref_max_offset() {
        let obj = ObjectRef::new(u32::MAX);
        assert_eq!(obj.index(), u32::MAX as usize);
    }
}

#[cfg(test)]
mod value_tests {
    use super::*;

    #[test]
    fn test_value_default_is_null() {
        assert!(matches!(Value::default(), Value::Null));
    }

    #[test]
    fn test_negative_scalar_is_not_null() {
        // -1 is an ordinary scalar; null is its own variant
        let val = Value::Int(-1);
        assert!(!val.is_null());
        assert_eq!(val.as_int(), Some(-1));
        assert_eq!(val.as_object(), None);
    }

    #[test]
    fn test_value_from_conversions() {
        assert_eq!(Value::from(7i64), Value::Int(7));
        assert_eq!(Value::from(ObjectRef::new(3)), Value::Ref(ObjectRef::new(3)));
        assert_eq!(Value::from(None::<ObjectRef>), Value::Null);
    }

    #[test]
    fn test_value_is_copy() {
        let a = Value::Ref(ObjectRef::new(1));
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn test_value_debug() {
        let debug_str = format!("{:?}", Value::Ref(ObjectRef::new(4)));
        assert!(debug_str.contains("Ref"));
        assert!(debug_str.contains('4'));
    }
}
