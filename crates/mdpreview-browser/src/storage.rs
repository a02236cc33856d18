//! `window.localStorage` implementation of the persistence port.
//!
//! Values are stored raw, not JSON-encoded, so the entries stay readable
//! by anything else inspecting the page's storage.

use mdpreview_core::{KeyValueStore, StoreError};

use crate::error::describe;

#[derive(Clone, Debug)]
pub struct BrowserStore {
    storage: web_sys::Storage,
}

impl BrowserStore {
    /// The page's local storage.
    ///
    /// Fails when there is no window or storage is disabled (private mode in
    /// some browsers, sandboxed iframes).
    pub fn local() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no global window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(describe(e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|e| StoreError::Read {
            key: key.to_string(),
            reason: describe(e),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| StoreError::Write {
            key: key.to_string(),
            reason: describe(e),
        })
    }
}
