//! Key/value storage contracts for persisted desktop data.
//!
//! Values are JSON text. Typed helpers wrap payloads in a [`PersistedEnvelope`] so stored data
//! carries a schema version and can be migrated or discarded on read.

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for JSON values stored as text under string keys.
pub trait PrefsStore {
    /// Loads the raw JSON string stored under `key`.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON string stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Removes `key`.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that keeps nothing. Used when the host has no storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store. Clones share the same map.
pub struct MemoryPrefsStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPrefsStore {
    /// Returns a store pre-populated with `raw_json` under `key`.
    pub fn with_entry(key: &str, raw_json: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        store
    }

    /// Raw value currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.entries.borrow_mut().remove(key);
            Ok(())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Versioned wrapper written under each persisted key: `{"state": ..., "version": N}`.
pub struct PersistedEnvelope<T> {
    /// Stored payload.
    pub state: T,
    /// Payload schema version.
    pub version: u32,
}

/// Loads and deserializes a raw JSON value.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| format!("{key}: {e}"))
}

/// Serializes and saves a raw JSON value.
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| format!("{key}: {e}"))?;
    store.save_pref(key, &raw).await
}

/// Loads a [`PersistedEnvelope`] payload written with schema `version`.
///
/// Envelopes with a different version are treated as absent.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub async fn load_persisted_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
    version: u32,
) -> Result<Option<T>, String> {
    let envelope: Option<PersistedEnvelope<T>> = load_pref_with(store, key).await?;
    Ok(envelope
        .filter(|envelope| envelope.version == version)
        .map(|envelope| envelope.state))
}

/// Saves `state` inside a [`PersistedEnvelope`] tagged with `version`.
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_persisted_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    version: u32,
    state: &T,
) -> Result<(), String> {
    save_pref_with(store, key, &PersistedEnvelope { state, version }).await
}
