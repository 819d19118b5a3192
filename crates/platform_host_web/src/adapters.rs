use std::rc::Rc;

use platform_host::{
    HostCapabilities, HostServices, HostStrategy, MemoryPrefsStore, PrefsStore, PrefsStoreFuture,
    SpeechRecognitionService,
};

use crate::{WebPrefsStore, WebScheduler, WebSpeechRecognition, WebViewport};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(target_arch = "wasm32")]
    {
        HostStrategy::Browser
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        HostStrategy::Headless
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete prefs backend behind [`PrefsStore`].
#[derive(Debug, Clone)]
pub enum PrefsStoreAdapter {
    /// Browser `localStorage`.
    Browser(WebPrefsStore),
    /// Process memory, lost on exit.
    Memory(MemoryPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Memory(store) => store.load_pref(key),
        }
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::Memory(store) => store.save_pref(key, raw_json),
        }
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Memory(store) => store.delete_pref(key),
        }
    }
}

/// Builds the prefs adapter for the selected strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Headless => PrefsStoreAdapter::Memory(MemoryPrefsStore::default()),
    }
}

/// Capability snapshot for the selected strategy given the speech adapter in use.
pub fn host_capabilities(speech: &dyn SpeechRecognitionService) -> HostCapabilities {
    match selected_host_strategy() {
        HostStrategy::Browser => HostCapabilities::browser(speech.is_supported()),
        HostStrategy::Headless => HostCapabilities::headless(),
    }
}

/// Builds the full service bundle consumed by `desktop_runtime::DesktopProvider`.
pub fn build_host_services() -> HostServices {
    let speech = WebSpeechRecognition::new();
    HostServices {
        prefs: Rc::new(prefs_store()),
        capabilities: host_capabilities(&speech),
        speech: Rc::new(speech),
        scheduler: Rc::new(WebScheduler),
        viewport: Rc::new(WebViewport),
        host_strategy: selected_host_strategy(),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use futures::executor::block_on;
    use platform_host::CapabilityStatus;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn native_builds_select_headless_adapters() {
        assert_eq!(host_strategy_name(), "headless");
        let services = build_host_services();
        assert_eq!(services.host_strategy, HostStrategy::Headless);
        assert_eq!(
            services.capabilities.speech_recognition,
            CapabilityStatus::Unavailable
        );
        assert!(!services.speech.is_supported());
    }

    #[test]
    fn headless_prefs_round_trip_in_memory() {
        let store = prefs_store();
        block_on(store.save_pref("snackos-wallpaper", "{\"state\":2,\"version\":0}"))
            .expect("save");
        assert_eq!(
            block_on(store.load_pref("snackos-wallpaper")).expect("load"),
            Some("{\"state\":2,\"version\":0}".to_string())
        );
    }
}
