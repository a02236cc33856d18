//! Persistence port for previewer state.
//!
//! The previewer only ever stores two raw strings, so the port is a plain
//! string key/value interface. The browser implementation lives in
//! `mdpreview-browser`; [`MemoryStore`] covers tests and native targets.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StoreError;

/// A synchronous string key/value store.
pub trait KeyValueStore {
    /// Read `key`. A missing key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("markdown"), Ok(None));
        assert!(store.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let store = MemoryStore::new();
        store.set("markdown", "a").unwrap();
        store.set("markdown", "b").unwrap();
        assert_eq!(store.get("markdown"), Ok(Some("b".to_string())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::with_entries([("darkMode", "true")]);
        let other = store.clone();
        other.set("markdown", "# hi").unwrap();
        assert_eq!(store.get("markdown"), Ok(Some("# hi".to_string())));
        assert_eq!(store.get("darkMode"), Ok(Some("true".to_string())));
    }
}
