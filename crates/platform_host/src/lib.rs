//! Host service contracts used by the desktop runtime, with in-memory implementations.
//!
//! Browser adapters for these contracts live in `platform_host_web`. Everything here compiles on
//! any target so the runtime can be unit tested natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod random;
pub mod scheduler;
pub mod speech;
pub mod storage;
pub mod time;
pub mod viewport;

pub use host::{CapabilityStatus, HostCapabilities, HostServices, HostStrategy};
pub use random::{random_offset, random_unit};
pub use scheduler::{DeferredTask, ManualScheduler, NoopScheduler, TaskScheduler};
pub use speech::{
    NoopSpeechRecognition, ScriptedSpeechRecognition, SpeechError, SpeechErrorKind, SpeechEvent,
    SpeechListener, SpeechRecognitionService,
};
pub use storage::prefs::{
    load_persisted_with, load_pref_with, save_persisted_with, save_pref_with, MemoryPrefsStore,
    NoopPrefsStore, PersistedEnvelope, PrefsStore, PrefsStoreFuture,
};
pub use time::{local_now, next_monotonic_timestamp_ms, unix_time_ms_now, utc_now};
pub use viewport::{FixedViewport, ViewportService, ViewportSize};
