//! Desktop shell UI composition and interaction surfaces.

mod dock;
mod voice_assistant;
mod window;

use std::time::Duration;

use chrono::NaiveDateTime;
use leptos::*;
use platform_host::local_now;

use self::{dock::Dock, voice_assistant::VoiceAssistant, window::DesktopWindow};

use crate::{
    model::{DesktopState, InteractionState, PointerPosition, SnapSide, WindowRect},
    reducer::DesktopAction,
    wallpaper::wallpaper_at,
    window_manager::snap_rect,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell: wallpaper, menu bar, windows, dock and voice assistant.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let resize_listener = window_event_listener(ev::resize, move |_| {
        runtime.viewport.set(runtime.host.get_value().viewport());
    });
    on_cleanup(move || resize_listener.remove());

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        let pointer = pointer_from_pointer_event(&ev);
        let interaction = runtime.interaction.get_untracked();

        if interaction.dragging.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateMove {
                pointer,
                viewport: runtime.viewport.get_untracked(),
            });
        }
        if interaction.resizing.is_some() {
            runtime.dispatch_action(DesktopAction::UpdateResize { pointer });
        }
    };
    let on_pointer_end = move |_| end_active_pointer_interaction(runtime);

    let wallpaper_style = move || {
        format!(
            "background-image:url('{}');",
            wallpaper_at(state.get().wallpaper_index).path
        )
    };

    view! {
        <div
            id="desktop-shell-root"
            class="desktop"
            style=wallpaper_style
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_end
            on:pointercancel=on_pointer_end
        >
            <MenuBar state=state />

            <SnapPreview interaction=runtime.interaction />

            <div class="window-layer">
                <For
                    each=move || state.get().windows
                    key=|win| win.id.0
                    let:win
                >
                    <DesktopWindow window_id=win.id />
                </For>
            </div>

            <Dock />
            <VoiceAssistant />
        </div>
    }
}

#[component]
fn MenuBar(state: RwSignal<DesktopState>) -> impl IntoView {
    let clock_now = create_rw_signal(local_now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(local_now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    let focused_title = move || {
        state.with(|desktop| {
            desktop
                .focused
                .and_then(|id| desktop.window(id))
                .map(|win| win.title.clone())
        })
    };

    view! {
        <header class="menu-bar" style=format!("height:{}px;", state.get_untracked().metrics.menu_bar_height)>
            <div class="menu-left">
                <div class="menu-logo">"SnackOS"</div>
                <div class="menu-app-title">{move || focused_title().unwrap_or_default()}</div>
            </div>
            <div class="menu-right">
                <time class="menu-time">{move || format_menu_clock(clock_now.get())}</time>
            </div>
        </header>
    }
}

#[component]
fn SnapPreview(interaction: RwSignal<InteractionState>) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let preview = move || {
        interaction.get().snap_zone().map(|side| {
            let metrics = runtime.state.with(|state| state.metrics);
            (side, snap_rect(side, runtime.viewport.get(), metrics))
        })
    };

    move || {
        preview().map(|(side, rect)| {
            view! {
                <div
                    class=format!("snap-preview {}", snap_side_class(side))
                    style=rect_style(rect, None)
                    aria-hidden="true"
                />
            }
        })
    }
}

/// Menu bar clock text, e.g. `Mon, Jan 5, 03:04 PM`.
fn format_menu_clock(now: NaiveDateTime) -> String {
    now.format("%a, %b %-d, %I:%M %p").to_string()
}

fn snap_side_class(side: SnapSide) -> &'static str {
    match side {
        SnapSide::Left => "snap-left",
        SnapSide::Right => "snap-right",
    }
}

fn rect_style(rect: WindowRect, z_index: Option<u32>) -> String {
    let mut style = format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;",
        rect.x, rect.y, rect.w, rect.h
    );
    if let Some(z) = z_index {
        style.push_str(&format!("z-index:{z};"));
    }
    style
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn end_active_pointer_interaction(runtime: DesktopRuntimeContext) {
    let interaction = runtime.interaction.get_untracked();
    if interaction.dragging.is_some() {
        runtime.dispatch_action(DesktopAction::EndMove {
            viewport: runtime.viewport.get_untracked(),
        });
    }
    if interaction.resizing.is_some() {
        runtime.dispatch_action(DesktopAction::EndResize);
    }
}
