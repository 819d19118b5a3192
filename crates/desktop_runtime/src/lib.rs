//! SnackOS desktop runtime: window manager reducer, voice command dispatch and the Leptos shell.

pub mod app_data;
pub mod apps;
pub mod assistant;
pub mod components;
pub mod config;
pub mod dispatcher;
mod effect_executor;
pub mod feedback;
pub mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod voice;
pub mod wallpaper;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{DeliveryMode, ShellMetrics, VoiceTimings};
pub use dispatcher::{plan_intent, DispatchContext, DispatchPlan};
pub use model::*;
pub use persistence::{load_boot_data, BootData};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use voice::{ListenerDirective, ListenerEvent, VoiceListener};
