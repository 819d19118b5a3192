//! `localStorage`-backed implementation of [`platform_host::PrefsStore`].
//!
//! The browser API is synchronous; the async trait methods resolve immediately.

use platform_host::{PrefsStore, PrefsStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Key/value store backed by `window.localStorage`.
pub struct WebPrefsStore;

impl WebPrefsStore {
    #[cfg(target_arch = "wasm32")]
    fn storage() -> Result<web_sys::Storage, String> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())
    }

    /// Reads the raw string under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the read throws.
    pub fn read(self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    /// Writes `raw_json` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (quota, privacy mode).
    pub fn write(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .set_item(key, raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn remove(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::storage()?
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl PrefsStore for WebPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { store.read(key) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.write(key, raw_json) })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.remove(key) })
    }
}
