//! Host service bundle injected into the desktop runtime.

use std::rc::Rc;

use crate::{
    FixedViewport, ManualScheduler, MemoryPrefsStore, NoopSpeechRecognition, PrefsStore,
    SpeechRecognitionService, TaskScheduler, ViewportService,
};

/// Host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser adapters over `window`, `localStorage` and the Web Speech API.
    Browser,
    /// In-process adapters with no browser APIs.
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Availability of one optional host capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Usable now.
    Available,
    /// Not implemented on this host.
    Unavailable,
    /// Exists but needs a user gesture or permission grant first.
    RequiresUserActivation,
}

impl CapabilityStatus {
    /// Returns whether the capability can be used immediately.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Host capability snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Speech recognition engine.
    pub speech_recognition: CapabilityStatus,
    /// Storage that survives a reload.
    pub persistent_storage: CapabilityStatus,
}

impl HostCapabilities {
    /// Browser posture. Microphone access is granted on first start.
    pub const fn browser(speech_supported: bool) -> Self {
        Self {
            speech_recognition: if speech_supported {
                CapabilityStatus::RequiresUserActivation
            } else {
                CapabilityStatus::Unavailable
            },
            persistent_storage: CapabilityStatus::Available,
        }
    }

    /// Headless posture.
    pub const fn headless() -> Self {
        Self {
            speech_recognition: CapabilityStatus::Unavailable,
            persistent_storage: CapabilityStatus::Unavailable,
        }
    }
}

/// Service bundle handed to the desktop runtime.
///
/// Environment-specific adapter selection happens before this bundle is built, so the runtime
/// only sees the trait objects.
#[derive(Clone)]
pub struct HostServices {
    /// Key/value JSON storage.
    pub prefs: Rc<dyn PrefsStore>,
    /// Speech recognition engine.
    pub speech: Rc<dyn SpeechRecognitionService>,
    /// Deferred task timer.
    pub scheduler: Rc<dyn TaskScheduler>,
    /// Viewport size source.
    pub viewport: Rc<dyn ViewportService>,
    /// Capability snapshot.
    pub capabilities: HostCapabilities,
    /// Strategy used to build this bundle.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// In-memory bundle: memory storage, no speech, a manual scheduler and a fixed viewport.
    pub fn headless() -> Self {
        Self {
            prefs: Rc::new(MemoryPrefsStore::default()),
            speech: Rc::new(NoopSpeechRecognition),
            scheduler: Rc::new(ManualScheduler::default()),
            viewport: Rc::new(FixedViewport::default()),
            capabilities: HostCapabilities::headless(),
            host_strategy: HostStrategy::Headless,
        }
    }
}

impl Default for HostServices {
    fn default() -> Self {
        Self::headless()
    }
}
