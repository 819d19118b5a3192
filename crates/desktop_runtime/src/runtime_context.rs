//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, runtime effect queue, voice assistant state
//! and host bootstrap wiring. UI composition stays in [`crate::components`].

use desktop_app_contract::{AppCommand, AppData, AppId};
use leptos::*;
use platform_host::{random_offset, utc_now, HostServices, ViewportSize};

use crate::{
    assistant,
    config::VoiceTimings,
    effect_executor,
    feedback::FeedbackState,
    host::DesktopHostContext,
    model::{DesktopState, InteractionState, OpenWindowRequest, WindowId},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    voice::VoiceListener,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the shell.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Last measured viewport.
    pub viewport: RwSignal<ViewportSize>,
    /// Speech listener state machine.
    pub voice: RwSignal<VoiceListener>,
    /// Voice assistant toast.
    pub feedback: RwSignal<FeedbackState>,
    /// Last transcript heard.
    pub transcript: RwSignal<Option<String>>,
    /// Voice assistant delays and delivery strategy.
    pub timings: VoiceTimings,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Creates runtime signals seeded with default records.
    ///
    /// Nothing is installed: call [`install_runtime_orchestration`] to start effects, boot
    /// hydration and speech.
    pub fn new(host_services: HostServices, timings: VoiceTimings) -> Self {
        let speech_supported = host_services.speech.is_supported();
        let host = DesktopHostContext::new(host_services);
        let viewport = create_rw_signal(host.viewport());
        let host = store_value(host);
        let state = create_rw_signal(DesktopState {
            app_data: AppData::with_defaults(utc_now()),
            ..DesktopState::default()
        });
        let interaction = create_rw_signal(InteractionState::default());
        let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

        let dispatch = Callback::new(move |action: DesktopAction| {
            let mut desktop = state.get_untracked();
            let mut ui = interaction.get_untracked();
            let previous_desktop = desktop.clone();
            let previous_ui = ui.clone();

            match reduce_desktop(&mut desktop, &mut ui, action) {
                Ok(new_effects) => {
                    if desktop != previous_desktop {
                        state.set(desktop);
                    }
                    if ui != previous_ui {
                        interaction.set(ui);
                    }
                    if !new_effects.is_empty() {
                        let mut queue = effects.get_untracked();
                        queue.extend(new_effects);
                        effects.set(queue);
                    }
                }
                Err(err) => logging::warn!("desktop reducer error: {err}"),
            }
        });

        Self {
            host,
            state,
            interaction,
            effects,
            viewport,
            voice: create_rw_signal(VoiceListener::new(speech_supported, timings)),
            feedback: create_rw_signal(FeedbackState::default()),
            transcript: create_rw_signal(None),
            timings,
            dispatch,
        }
    }

    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Open request for `app_id` placed against the current viewport with fresh jitter.
    pub fn open_request(&self, app_id: AppId) -> OpenWindowRequest {
        let span = self.state.with_untracked(|state| state.metrics.placement_jitter);
        OpenWindowRequest::new(app_id, self.viewport.get_untracked())
            .with_jitter(random_offset(span), random_offset(span))
    }

    /// Dock activation: restore the first minimized window of the app, else open normally.
    pub fn activate_from_dock(&self, app_id: AppId) {
        let minimized = self.state.with_untracked(|state| {
            state
                .windows
                .iter()
                .find(|w| w.app_id == app_id && w.minimized)
                .map(|w| w.id)
        });
        match minimized {
            Some(window_id) => self.dispatch_action(DesktopAction::FocusWindow { window_id }),
            None => self.dispatch_action(DesktopAction::OpenWindow(
                self.open_request(app_id).maximized(app_id.opens_maximized()),
            )),
        }
    }

    /// Routes a request from the app hosted in `window_id`.
    pub fn handle_app_command(&self, window_id: WindowId, command: AppCommand) {
        let action = match command {
            AppCommand::Mounted => DesktopAction::AppMounted { window_id },
            AppCommand::ConsumeCommand => {
                let domain = self.state.with_untracked(|state| {
                    state
                        .window(window_id)
                        .and_then(|window| window.app_id.command_domain())
                });
                let Some(domain) = domain else {
                    return;
                };
                DesktopAction::ConsumeCommand { domain }
            }
            AppCommand::Close => DesktopAction::CloseWindow { window_id },
            AppCommand::Mutate(mutation) => DesktopAction::MutateData {
                mutation,
                now: utc_now(),
            },
        };
        self.dispatch_action(action);
    }
}

/// Starts effect execution, boot hydration and the voice assistant for `runtime`.
pub fn install_runtime_orchestration(runtime: DesktopRuntimeContext) {
    runtime
        .host
        .get_value()
        .install_boot_hydration(runtime.dispatch);
    effect_executor::install(runtime);
    assistant::install(runtime);
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and boots persisted state.
pub fn DesktopProvider(
    /// Injected browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let runtime = DesktopRuntimeContext::new(host_services, VoiceTimings::default());

    provide_context(runtime);

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
