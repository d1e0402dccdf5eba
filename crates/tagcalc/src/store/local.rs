//! Browser `localStorage` backend

use super::KeyValueStore;
use crate::error::{StoreError, StoreResult};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Store backed by `window.localStorage`
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Opens the window's local storage
    pub fn open() -> StoreResult<Self> {
        let window = web_sys::window().ok_or_else(|| StoreError::backend("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error(&e))?
            .ok_or_else(|| StoreError::backend("localStorage unavailable"))?;
        Ok(Self { storage })
    }
}

fn js_error(value: &JsValue) -> StoreError {
    StoreError::backend(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage.get_item(key).map_err(|e| js_error(&e))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage.set_item(key, value).map_err(|e| js_error(&e))
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.storage.remove_item(key).map_err(|e| js_error(&e))
    }
}
