//! Client-held session markers.

use std::{collections::HashMap, fmt};

use zeroize::Zeroizing;

/// Key/value storage for session markers, in the manner of browser local
/// storage.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Forget `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str);

    /// Whether anything is stored under `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Process-local [`SessionStore`]; values are wiped from memory on removal.
#[derive(Default)]
pub struct MemorySessionStore {
    values: HashMap<String, Zeroizing<String>>,
}

impl fmt::Debug for MemorySessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySessionStore")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single marker.
    #[must_use]
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();

        store.set(key, value);

        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|value| value.as_str())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), Zeroizing::new(value.to_string()));
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}
