//! Storage seam between the registry and the persistence engine.

use std::collections::HashMap;

use crate::value::PrefValue;

/// Capability the registry needs from the preference persistence engine.
///
/// The engine itself (file format, encryption, cloud sync) lives outside
/// this crate. Implementations can be swapped without touching registration
/// or access logic; only keyed read/write of current values is required.
pub trait PrefStore: Send {
    /// Current persisted value for `key`, if one was ever written.
    fn get(&self, key: &str) -> Option<PrefValue>;

    /// Persist `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: PrefValue);
}

/// In-memory [`PrefStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, PrefValue>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with values that survived a previous run.
    #[must_use]
    pub fn with_persisted<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, PrefValue)>,
        K: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl PrefStore for MemoryStore {
    fn get(&self, key: &str) -> Option<PrefValue> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: PrefValue) {
        self.values.insert(key.to_string(), value);
    }
}
