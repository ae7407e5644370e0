//! localStorage-backed preference store.

use web_sys::Storage;

use super::{js_detail, js_error, window};
use crate::error::ThemeError;
use crate::theme::PreferenceStore;

pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    // Looked up on every access: privacy modes can revoke it mid-session
    fn storage(&self) -> Result<Storage, ThemeError> {
        window()?
            .local_storage()
            .map_err(|e| js_error("localStorage", e))?
            .ok_or(ThemeError::StorageUnavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self) -> Result<Option<String>, ThemeError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| ThemeError::Storage(format!("getItem: {}", js_detail(&e))))
    }

    fn save(&self, value: &str) -> Result<(), ThemeError> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|e| ThemeError::Storage(format!("setItem: {}", js_detail(&e))))
    }
}
