use leptos::{create_effect, spawn_local, Callable, Callback};

use crate::{host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(host: DesktopHostContext, dispatch: Callback<DesktopAction>) {
    create_effect(move |_| {
        dispatch.call(DesktopAction::BeginBoot);
        let prefs = host.prefs_store();
        spawn_local(async move {
            let boot = persistence::load_boot_data(prefs.as_ref()).await;
            dispatch.call(DesktopAction::Hydrate { boot });
        });
    });
}
