use crate::error::PersistenceError;
use ahash::AHashMap;

/// The key-value collaborator persistence writes through: browser
/// localStorage, a file, or an in-memory map. Values are plain JSON; the
/// engine never hands it functions or opaque handles.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError>;
    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<(), PersistenceError>;
}

/// An in-memory store, useful for tests and headless embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: AHashMap<String, serde_json::Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
