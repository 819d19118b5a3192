//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use chrono::{DateTime, Utc};
use desktop_app_contract::{AppId, CommandDomain, CommandEnvelope, DataMutation, SlotCommand};
use platform_host::ViewportSize;
use thiserror::Error;

use crate::{
    app_data::{apply_mutation, MutatedCollection},
    model::{
        DesktopState, DragSession, InteractionState, OpenWindowRequest, PendingMutation,
        PointerPosition, ResizeSession, SnapSide, WindowId,
    },
    persistence::BootData,
    wallpaper::WALLPAPERS,
    window_manager::{self, OpenOutcome},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open an app, reusing an existing window when there is one.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Close every window.
    CloseAllWindows,
    /// Focus (and raise) a window by id.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Flip a window between maximized and its stored geometry.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Fill the left or right half of the usable screen.
    SnapWindow {
        /// Window to snap.
        window_id: WindowId,
        /// Target half.
        side: SnapSide,
        /// Current viewport.
        viewport: ViewportSize,
    },
    /// Set a window's top-left corner.
    UpdateWindowPosition {
        /// Window to move.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Set a window's size, clamped to the minimum window size.
    UpdateWindowSize {
        /// Window to resize.
        window_id: WindowId,
        /// New width.
        width: i32,
        /// New height.
        height: i32,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress drag and its snap zone.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Current viewport.
        viewport: ViewportSize,
    },
    /// Release the drag: snap when a zone is armed, otherwise commit the dropped position.
    EndMove {
        /// Current viewport.
        viewport: ViewportSize,
    },
    /// Begin dragging the bottom-right resize grip.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress resize.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// End the active resize.
    EndResize,
    /// The app in `window_id` mounted and subscribed to its command slot.
    AppMounted {
        /// Window whose app is ready.
        window_id: WindowId,
    },
    /// Deliver a command once its app is ready: immediately when mounted, else on mount.
    DeliverCommand {
        /// Command to deliver.
        envelope: CommandEnvelope<SlotCommand>,
    },
    /// Write straight into the slot without waiting for readiness.
    WriteCommandSlot {
        /// Command to write.
        envelope: CommandEnvelope<SlotCommand>,
    },
    /// An app read its slot; clear it.
    ConsumeCommand {
        /// Slot to clear.
        domain: CommandDomain,
    },
    /// Apply a record mutation.
    MutateData {
        /// Mutation to apply.
        mutation: DataMutation,
        /// Time used for modified timestamps.
        now: DateTime<Utc>,
    },
    /// Advance to the next wallpaper.
    CycleWallpaper,
    /// Persisted records started loading. Mutations are held for replay until [`Self::Hydrate`].
    BeginBoot,
    /// Install persisted records, then replay mutations made while they were loading.
    Hydrate {
        /// Loaded state. `None` fields keep the seeded defaults.
        boot: BootData,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Persist notes, events and files.
    PersistAppData,
    /// Persist the to-do list.
    PersistTodos,
    /// Persist the wallpaper selection.
    PersistWallpaper,
    /// An undelivered command was discarded because its app closed.
    CommandDropped {
        /// Slot the command was addressed to.
        domain: CommandDomain,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum ReducerError {
    /// An interactive gesture targeted a window that is not present.
    #[error("window not found")]
    WindowNotFound,
    /// A record mutation referenced an unknown id.
    #[error("record `{0}` not found")]
    RecordNotFound(String),
    /// A record mutation was structurally invalid.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Applies a [`DesktopAction`] to the desktop runtime state and collects resulting side effects.
///
/// Window-manager actions on unknown ids are no-ops that return no effects.
///
/// # Errors
///
/// Returns [`ReducerError::WindowNotFound`] when a drag or resize starts on a missing window, and
/// [`ReducerError::RecordNotFound`] / [`ReducerError::InvalidRecord`] for rejected mutations.
/// State is unchanged on error.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(request) => {
            if let OpenOutcome::Created(window_id) = window_manager::open_window(state, &request) {
                if request.app_id.command_domain().is_none() {
                    state.mounted.insert(window_id);
                }
            }
        }
        DesktopAction::CloseWindow { window_id } => {
            if let Some(record) = window_manager::close_window(state, window_id) {
                clear_drag_for(interaction, window_id);
                drop_orphaned_commands(state, record.app_id, &mut effects);
            }
        }
        DesktopAction::CloseAllWindows => {
            let closed = window_manager::close_all_windows(state);
            *interaction = InteractionState::default();
            for domain in [
                CommandDomain::Calculator,
                CommandDomain::Calendar,
                CommandDomain::Paint,
            ] {
                if closed.iter().any(|w| w.app_id == domain.app_id()) {
                    drop_orphaned_commands(state, domain.app_id(), &mut effects);
                }
            }
        }
        DesktopAction::FocusWindow { window_id } => {
            window_manager::focus_window(state, window_id);
        }
        DesktopAction::MinimizeWindow { window_id } => {
            window_manager::minimize_window(state, window_id);
        }
        DesktopAction::ToggleMaximize { window_id } => {
            window_manager::toggle_maximize(state, window_id);
        }
        DesktopAction::SnapWindow {
            window_id,
            side,
            viewport,
        } => {
            window_manager::snap_window(state, window_id, side, viewport);
        }
        DesktopAction::UpdateWindowPosition { window_id, x, y } => {
            window_manager::set_window_position(state, window_id, x, y);
        }
        DesktopAction::UpdateWindowSize {
            window_id,
            width,
            height,
        } => {
            window_manager::set_window_size(state, window_id, width, height);
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let window = state
                .window(window_id)
                .ok_or(ReducerError::WindowNotFound)?;
            let (rect_start, maximized) = (window.rect, window.maximized);
            window_manager::focus_window(state, window_id);
            if !maximized {
                interaction.dragging = Some(DragSession {
                    window_id,
                    pointer_start: pointer,
                    rect_start,
                    preview: rect_start,
                    snap_zone: None,
                });
            }
        }
        DesktopAction::UpdateMove { pointer, viewport } => {
            let metrics = state.metrics;
            if let Some(session) = interaction.dragging.as_mut() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                session.preview = window_manager::clamp_drag_rect(
                    session.rect_start.offset(dx, dy),
                    viewport,
                    metrics,
                );
                session.snap_zone = window_manager::snap_zone_for(pointer.x, viewport, metrics);
            }
        }
        DesktopAction::EndMove { viewport } => {
            if let Some(session) = interaction.dragging.take() {
                match session.snap_zone {
                    Some(side) => {
                        window_manager::snap_window(state, session.window_id, side, viewport);
                    }
                    None => {
                        window_manager::set_window_position(
                            state,
                            session.window_id,
                            session.preview.x,
                            session.preview.y,
                        );
                    }
                }
            }
        }
        DesktopAction::BeginResize { window_id, pointer } => {
            let rect_start = state
                .window(window_id)
                .ok_or(ReducerError::WindowNotFound)?
                .rect;
            window_manager::focus_window(state, window_id);
            interaction.resizing = Some(ResizeSession {
                window_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                window_manager::set_window_size(
                    state,
                    session.window_id,
                    session.rect_start.w + dx,
                    session.rect_start.h + dy,
                );
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::AppMounted { window_id } => {
            if let Some(app_id) = state.window(window_id).map(|w| w.app_id) {
                state.mounted.insert(window_id);
                if let Some(envelope) = app_id
                    .command_domain()
                    .and_then(|domain| state.stashed.take(domain))
                {
                    state.slots.write(envelope);
                }
            }
        }
        DesktopAction::DeliverCommand { envelope } => {
            let app_id = envelope.payload.domain().app_id();
            if state.has_mounted_window(app_id) {
                state.slots.write(envelope);
            } else if state.is_app_running(app_id) {
                state.stashed.write(envelope);
            } else {
                effects.push(RuntimeEffect::CommandDropped {
                    domain: envelope.payload.domain(),
                });
            }
        }
        DesktopAction::WriteCommandSlot { envelope } => {
            if state.is_app_running(envelope.payload.domain().app_id()) {
                state.slots.write(envelope);
            } else {
                effects.push(RuntimeEffect::CommandDropped {
                    domain: envelope.payload.domain(),
                });
            }
        }
        DesktopAction::ConsumeCommand { domain } => {
            state.slots.take(domain);
        }
        DesktopAction::MutateData { mutation, now } => {
            let replay = state.boot_pending.then(|| mutation.clone());
            let collection = apply_mutation(&mut state.app_data, &mut state.todos, mutation, now)?;
            match replay {
                Some(mutation) => state
                    .pre_boot_mutations
                    .push(PendingMutation { mutation, now }),
                None => effects.push(persist_effect(collection)),
            }
        }
        DesktopAction::CycleWallpaper => {
            state.wallpaper_index = (state.wallpaper_index + 1) % WALLPAPERS.len();
            effects.push(RuntimeEffect::PersistWallpaper);
        }
        DesktopAction::BeginBoot => {
            state.boot_pending = true;
        }
        DesktopAction::Hydrate { boot } => {
            state.boot_pending = false;
            let replay = std::mem::take(&mut state.pre_boot_mutations);
            if let Some(data) = boot.app_data {
                state.app_data = data;
            }
            if let Some(todos) = boot.todos {
                state.todos = todos;
            }
            if let Some(index) = boot.wallpaper_index {
                state.wallpaper_index = index % WALLPAPERS.len();
            }
            // Mutations whose record is absent from the loaded data are dropped.
            for PendingMutation { mutation, now } in replay {
                let Ok(collection) =
                    apply_mutation(&mut state.app_data, &mut state.todos, mutation, now)
                else {
                    continue;
                };
                let effect = persist_effect(collection);
                if !effects.contains(&effect) {
                    effects.push(effect);
                }
            }
        }
    }

    Ok(effects)
}

fn persist_effect(collection: MutatedCollection) -> RuntimeEffect {
    match collection {
        MutatedCollection::AppData => RuntimeEffect::PersistAppData,
        MutatedCollection::Todos => RuntimeEffect::PersistTodos,
    }
}

fn clear_drag_for(interaction: &mut InteractionState, window_id: WindowId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| session.window_id == window_id)
    {
        interaction.resizing = None;
    }
}

/// Discards stashed and unconsumed commands for `app_id` once its last window is gone.
fn drop_orphaned_commands(
    state: &mut DesktopState,
    app_id: AppId,
    effects: &mut Vec<RuntimeEffect>,
) {
    let Some(domain) = app_id.command_domain() else {
        return;
    };
    if state.is_app_running(app_id) {
        return;
    }
    let stashed = state.stashed.take(domain).is_some();
    let unread = state.slots.take(domain).is_some();
    if stashed || unread {
        effects.push(RuntimeEffect::CommandDropped { domain });
    }
}
