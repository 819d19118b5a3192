use super::*;
use desktop_app_contract::AppId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DockItem {
    app_id: AppId,
    running: bool,
}

fn dock_items(state: &DesktopState) -> Vec<DockItem> {
    AppId::ALL
        .iter()
        .map(|&app_id| DockItem {
            app_id,
            running: state.is_app_running(app_id),
        })
        .collect()
}

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let items = create_memo(move |_| runtime.state.with(dock_items));

    view! {
        <nav class="dock-container" aria-label="Dock">
            <div class="dock">
                <For each=move || items.get() key=|item| (item.app_id, item.running) let:item>
                    {{
                        let app_id = item.app_id;
                        let class = if item.running { "dock-item running" } else { "dock-item" };
                        view! {
                            <button
                                class=class
                                title=app_id.title()
                                aria-label=app_id.title()
                                data-icon=app_id.icon_id()
                                on:click=move |_| runtime.activate_from_dock(app_id)
                            >
                                <span class=format!("dock-icon icon-{}", app_id.icon_id()) aria-hidden="true" />
                                {item.running.then(|| view! { <div class="running-indicator" /> })}
                            </button>
                        }
                    }}
                </For>
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dock_lists_every_app_and_flags_running_ones() {
        let mut state = DesktopState::default();
        state.windows.push(crate::model::WindowRecord {
            id: crate::model::WindowId(1),
            app_id: AppId::Notes,
            title: "Notes".to_string(),
            icon_id: AppId::Notes.icon_id().to_string(),
            rect: WindowRect {
                x: 0,
                y: 42,
                w: 900,
                h: 600,
            },
            z_index: 100,
            minimized: true,
            maximized: false,
        });

        let items = dock_items(&state);
        assert_eq!(items.len(), AppId::ALL.len());
        assert_eq!(items[0].app_id, AppId::Calculator);
        let running: Vec<AppId> = items
            .iter()
            .filter(|item| item.running)
            .map(|item| item.app_id)
            .collect();
        assert_eq!(running, vec![AppId::Notes]);
    }
}
