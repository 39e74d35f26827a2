use fx_core::prefs::PreferenceStore;
use fx_core::{FxError, FxResult};
use web_sys as web;

/// `window.localStorage`, if the browser grants it.
pub struct LocalStorageStore {
    storage: Option<web::Storage>,
}

impl LocalStorageStore {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| match w.local_storage() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("[prefs] localStorage blocked: {:?}", e);
                None
            }
        });
        Self { storage }
    }

    fn storage(&self) -> FxResult<&web::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| FxError::Storage("localStorage unavailable".into()))
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> FxResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| FxError::Storage(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> FxResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| FxError::Storage(format!("{:?}", e)))
    }
}
