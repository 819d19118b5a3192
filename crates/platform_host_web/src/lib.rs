//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Every adapter compiles on native targets too, where it degrades to an inert fallback so the
//! workspace can be tested without a browser.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod scheduler;
pub mod speech;
pub mod storage;
pub mod viewport;

pub use adapters::{
    build_host_services, host_capabilities, host_strategy_name, prefs_store,
    selected_host_strategy, PrefsStoreAdapter,
};
pub use scheduler::WebScheduler;
pub use speech::{WebSpeechRecognition, RECOGNITION_LANG};
pub use storage::local_prefs::WebPrefsStore;
pub use viewport::WebViewport;
