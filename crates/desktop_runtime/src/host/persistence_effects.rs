use leptos::{logging, spawn_local, SignalWithUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_app_data(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let data = runtime.state.with_untracked(|state| state.app_data.clone());
    let prefs = host.prefs_store();
    spawn_local(async move {
        if let Err(err) = persistence::persist_app_data(prefs.as_ref(), &data).await {
            logging::warn!("persist app data failed: {err}");
        }
    });
}

pub(super) fn persist_todos(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let todos = runtime.state.with_untracked(|state| state.todos.clone());
    let prefs = host.prefs_store();
    spawn_local(async move {
        if let Err(err) = persistence::persist_todos(prefs.as_ref(), &todos).await {
            logging::warn!("persist todos failed: {err}");
        }
    });
}

pub(super) fn persist_wallpaper(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let index = runtime.state.with_untracked(|state| state.wallpaper_index);
    let prefs = host.prefs_store();
    spawn_local(async move {
        if let Err(err) = persistence::persist_wallpaper(prefs.as_ref(), index).await {
            logging::warn!("persist wallpaper failed: {err}");
        }
    });
}
