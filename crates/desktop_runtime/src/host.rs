//! Host-side runtime helpers for executing reducer effects and reaching injected host services.
//!
//! Reducer semantics stay pure; persistence, timers, speech and viewport queries go through the
//! [`HostServices`] bundle handed to [`crate::DesktopProvider`], so tests can inject in-memory
//! adapters.

mod boot;
mod persistence_effects;

use std::rc::Rc;

use leptos::{logging, Callback};
use platform_host::{
    DeferredTask, HostServices, PrefsStore, SpeechRecognitionService,
    TaskScheduler, ViewportSize,
};

use crate::{
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    services: HostServices,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(HostServices::headless())
    }
}

impl DesktopHostContext {
    /// Creates a host context from an injected service bundle.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Returns the configured preference store.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs.clone()
    }

    /// Returns the configured speech engine.
    pub fn speech(&self) -> Rc<dyn SpeechRecognitionService> {
        self.services.speech.clone()
    }

    /// Current viewport size.
    pub fn viewport(&self) -> ViewportSize {
        self.services.viewport.viewport()
    }

    /// Runs `task` after `delay_ms` on the host timer. Returns whether the host accepted it.
    pub fn schedule(&self, delay_ms: u32, task: DeferredTask) -> bool {
        match self.services.scheduler.schedule(delay_ms, task) {
            Ok(()) => true,
            Err(err) => {
                logging::warn!("failed to schedule deferred task: {err}");
                false
            }
        }
    }

    /// Loads persisted records and hydrates the reducer once the provider mounts.
    pub fn install_boot_hydration(&self, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistAppData => {
                persistence_effects::persist_app_data(self.clone(), runtime)
            }
            RuntimeEffect::PersistTodos => persistence_effects::persist_todos(self.clone(), runtime),
            RuntimeEffect::PersistWallpaper => {
                persistence_effects::persist_wallpaper(self.clone(), runtime)
            }
            RuntimeEffect::CommandDropped { domain } => {
                logging::warn!("dropped pending {domain:?} command: target window closed");
            }
        }
    }
}
