//! Card bodies for apps without voice commands or shared records.

use desktop_app_contract::{AppId, AppMountContext};
use leptos::*;

use super::acknowledge_mount;

fn blurb(app_id: AppId) -> &'static str {
    match app_id {
        AppId::Terminal => "Type `help` to list commands.",
        AppId::TaskManager => "Processes and resource usage.",
        AppId::Markdown => "Write markdown with a live preview.",
        AppId::TicTacToe => "Three in a row wins.",
        AppId::Snake => "Use the arrow keys to steer.",
        AppId::Clock => "World clock, timer and stopwatch.",
        AppId::Settings => "Wallpaper and appearance.",
        AppId::Music => "Your library and now playing.",
        _ => "",
    }
}

pub(super) fn mount_placeholder_app(context: AppMountContext) -> View {
    acknowledge_mount(context.services);
    let app_id = context.app_id;

    view! {
        <div class=format!("app app-card {}", app_id.token())>
            <span class=format!("app-card-icon icon-{}", app_id.icon_id()) aria-hidden="true" />
            <h2>{app_id.title()}</h2>
            <p>{blurb(app_id)}</p>
            <button class="app-action" on:click=move |_| context.services.close()>"Close"</button>
        </div>
    }
    .into_view()
}
