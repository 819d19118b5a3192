//! App registry and the built-in app bodies mounted inside desktop windows.
//!
//! Every body acknowledges mount once through [`AppServices::mounted`], which releases any command
//! the dispatcher stashed for it. Apps with a command domain read their slot from
//! [`AppMountContext::pending_command`] and consume it after acting on it.

mod commanded;
mod placeholders;
mod records;

use desktop_app_contract::{AppId, AppModule, AppServices};
use leptos::*;

/// Mount module for `app_id`.
pub fn app_module(app_id: AppId) -> AppModule {
    match app_id {
        AppId::Calculator => AppModule::new(commanded::mount_calculator_app),
        AppId::Calendar => AppModule::new(commanded::mount_calendar_app),
        AppId::Paint => AppModule::new(commanded::mount_paint_app),
        AppId::Todo => AppModule::new(records::mount_todo_app),
        AppId::Notes => AppModule::new(records::mount_notes_app),
        AppId::Files => AppModule::new(records::mount_files_app),
        AppId::Terminal
        | AppId::TaskManager
        | AppId::Markdown
        | AppId::TicTacToe
        | AppId::Snake
        | AppId::Clock
        | AppId::Settings
        | AppId::Music => AppModule::new(placeholders::mount_placeholder_app),
    }
}

/// Sends the mount acknowledgement after the first paint so slot writes land on a live view.
fn acknowledge_mount(services: AppServices) {
    request_animation_frame(move || services.mounted());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_app_has_a_module() {
        for app_id in AppId::ALL {
            let _ = app_module(app_id);
        }
    }
}
