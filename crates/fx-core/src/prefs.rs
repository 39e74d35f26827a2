//! Persisted user preferences (string key/value, like `localStorage`).

use crate::error::{FxError, FxResult};
use fnv::FnvHashMap;

pub const SOUND_MUTED_KEY: &str = "sound-muted";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> FxResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> FxResult<()>;
}

/// Sound starts muted until the visitor has turned it on once; after that
/// only a stored `"true"` mutes.
pub fn load_muted<S: PreferenceStore + ?Sized>(store: &S) -> bool {
    match store.get(SOUND_MUTED_KEY) {
        Ok(Some(v)) => v == "true",
        Ok(None) => true,
        Err(e) => {
            log::warn!("[prefs] reading {SOUND_MUTED_KEY}: {e}");
            true
        }
    }
}

pub fn save_muted<S: PreferenceStore + ?Sized>(store: &mut S, muted: bool) {
    let value = if muted { "true" } else { "false" };
    if let Err(e) = store.set(SOUND_MUTED_KEY, value) {
        log::warn!("[prefs] writing {SOUND_MUTED_KEY}: {e}");
    }
}

/// In-process store for native hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FnvHashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes, like storage in a locked-down private window.
    pub fn read_only() -> Self {
        Self {
            values: FnvHashMap::default(),
            read_only: true,
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> FxResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> FxResult<()> {
        if self.read_only {
            return Err(FxError::Storage(format!("{key} is read-only")));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
