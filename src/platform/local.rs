//! Browser LocalStorage backend (WASM only)

use super::storage::KeyValueStore;
use crate::error::StorageError;

pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// The window's LocalStorage, if the browser exposes one
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{:?}", e))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}
