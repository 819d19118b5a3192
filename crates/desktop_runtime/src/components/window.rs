use super::*;
use crate::{apps, model::WindowId, window_manager::maximized_rect};
use desktop_app_contract::{AppMountContext, AppServices};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

/// Primary-button pointer down, or the primary touch/pen contact.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let window = create_memo(move |_| {
        runtime
            .state
            .with(|state| state.window(window_id).cloned())
    });
    let is_focused = create_memo(move |_| runtime.state.with(|state| state.focused == Some(window_id)));

    // Drag preview wins over stored geometry; maximized geometry follows the live viewport.
    let frame_style = move || {
        let Some(win) = window.get() else {
            return String::new();
        };
        let metrics = runtime.state.with(|state| state.metrics);
        let rect = runtime
            .interaction
            .with(|interaction| interaction.preview_rect(window_id))
            .unwrap_or_else(|| {
                if win.maximized {
                    maximized_rect(runtime.viewport.get(), metrics)
                } else {
                    win.rect
                }
            });
        let mut style = rect_style(rect, Some(win.z_index));
        if win.minimized {
            style.push_str("display:none;");
        }
        style
    };
    let frame_class = move || {
        let mut class = String::from("window-component");
        if is_focused.get() {
            class.push_str(" focused");
        }
        if window.get().is_some_and(|win| win.maximized) {
            class.push_str(" maximized");
        }
        class
    };
    let title = move || window.get().map(|win| win.title).unwrap_or_default();
    let is_maximized = move || window.get().is_some_and(|win| win.maximized);

    let focus = move |_| {
        if !is_focused.get_untracked() {
            runtime.dispatch_action(DesktopAction::FocusWindow { window_id });
        }
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });
    };
    let swallow_pointer = move |ev: web_sys::PointerEvent| ev.stop_propagation();

    view! {
        <section
            class=frame_class
            style=frame_style
            on:pointerdown=focus
            role="dialog"
            aria-label=title
        >
            <header
                class="window-titlebar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <div class="window-controls left">
                    <button
                        class="window-btn close"
                        title="Close"
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::CloseWindow { window_id });
                        }
                    />
                    <button
                        class="window-btn minimize"
                        title="Minimize"
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::MinimizeWindow { window_id });
                        }
                    />
                    <button
                        class="window-btn maximize"
                        title=move || if is_maximized() { "Restore" } else { "Maximize" }
                        on:pointerdown=swallow_pointer
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            runtime.dispatch_action(DesktopAction::ToggleMaximize { window_id });
                        }
                    />
                </div>
                <div class="window-title">
                    <span>{title}</span>
                </div>
            </header>
            <div class="window-content">
                <WindowBody window_id=window_id />
            </div>
            <Show when=move || !is_maximized() fallback=|| ()>
                <WindowResizeGrip window_id=window_id />
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeGrip(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id,
            pointer: pointer_from_pointer_event(&ev),
        });
    };

    view! {
        <div class="window-resize-grip" aria-hidden="true" on:pointerdown=on_pointerdown />
    }
}

#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let Some(app_id) = state.with_untracked(|s| s.window(window_id).map(|w| w.app_id)) else {
        return view! { <p>"Closed"</p> }.into_view();
    };
    let domain = app_id.command_domain();

    let pending_command = create_memo(move |_| {
        domain.and_then(|domain| state.with(|s| s.slots.peek(domain)))
    });
    let data = create_memo(move |_| state.with(|s| s.app_data.clone()));
    let todos = create_memo(move |_| state.with(|s| s.todos.clone()));
    let services = AppServices::new(Callback::new(move |command| {
        runtime.handle_app_command(window_id, command);
    }));

    apps::app_module(app_id).mount(AppMountContext {
        app_id,
        window_id: window_id.0,
        pending_command: pending_command.into(),
        data: data.into(),
        todos: todos.into(),
        services,
    })
}
