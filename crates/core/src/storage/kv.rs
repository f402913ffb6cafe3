use std::collections::BTreeMap;

use crate::errors::CoreError;

/// Minimal string key-value store, the shape of the browser's `localStorage`.
///
/// Every blob the core persists goes through this trait, so the same code
/// runs against `localStorage` in the browser and an in-memory map in tests.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError>;

    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

/// In-process store backed by a sorted map.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// The page's `window.localStorage` (WASM only).
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    /// Fails when there is no window or storage is disabled (e.g. private mode).
    pub fn open() -> Result<Self, CoreError> {
        let window = web_sys::window()
            .ok_or_else(|| CoreError::Storage("no window object available".into()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CoreError::Storage(format!("localStorage unavailable: {e:?}")))?
            .ok_or_else(|| CoreError::Storage("localStorage is disabled".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| CoreError::Storage(format!("failed to read '{key}': {e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CoreError::Storage(format!("failed to write '{key}': {e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CoreError::Storage(format!("failed to remove '{key}': {e:?}")))
    }
}
