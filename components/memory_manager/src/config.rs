//! Heap configuration.

use core_types::{GcError, GcResult};
use serde::{Deserialize, Serialize};

/// Default semi-space capacity (64 Ki words)
pub const DEFAULT_SPACE_SIZE: usize = 64 * 1024;

/// Largest supported semi-space; every address must fit in an `ObjectRef`.
pub const MAX_SPACE_SIZE: usize = u32::MAX as usize;

/// Configuration for a [`Heap`](crate::Heap).
///
/// # Examples
///
/// ```
/// use memory_manager::HeapConfig;
///
/// let config = HeapConfig::from_json(r#"{ "space_size": 128 }"#).unwrap();
/// assert_eq!(config.space_size, 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeapConfig {
    /// Words available in each of the two semi-spaces. Bounds both
    /// allocation (`OutOfMemory`) and collection (`HeapOverflow`).
    pub space_size: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig {
            space_size: DEFAULT_SPACE_SIZE,
        }
    }
}

impl HeapConfig {
    /// Creates a configuration with the given semi-space capacity in words.
    pub fn with_space_size(space_size: usize) -> Self {
        HeapConfig { space_size }
    }

    /// Checks that the configuration describes a usable heap.
    pub fn validate(&self) -> GcResult<()> {
        if self.space_size == 0 {
            return Err(GcError::InvalidConfig(
                "space_size must be greater than 0".to_string(),
            ));
        }
        if self.space_size > MAX_SPACE_SIZE {
            return Err(GcError::InvalidConfig(format!(
                "space_size {} exceeds the maximum of {} words",
                self.space_size, MAX_SPACE_SIZE
            )));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON. Missing keys take
    /// their default values.
    pub fn from_json(json: &str) -> GcResult<Self> {
        let config: HeapConfig =
            serde_json::from_str(json).map_err(|e| GcError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
