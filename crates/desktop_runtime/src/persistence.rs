//! Desktop runtime persistence adapters for boot hydration and record saves.

use desktop_app_contract::{AppData, TodoTask};
use platform_host::{
    load_persisted_with, load_pref_with, save_persisted_with, save_pref_with, PrefsStore,
};

use crate::wallpaper::{index_for_path, wallpaper_at};

/// Notes, calendar events and the file tree, stored in a versioned envelope.
pub const APP_DATA_KEY: &str = "snackos-storage";
/// To-do tasks as a bare JSON array, newest first.
pub const TODOS_KEY: &str = "snackos-todos";
/// Raw path of the selected wallpaper.
pub const WALLPAPER_KEY: &str = "snackos-wallpaper";
/// Schema version of the [`APP_DATA_KEY`] envelope.
pub const APP_DATA_SCHEMA_VERSION: u32 = 0;

#[derive(Debug, Clone, Default, PartialEq)]
/// Persisted state found at boot. `None` fields keep their defaults.
pub struct BootData {
    pub app_data: Option<AppData>,
    pub todos: Option<Vec<TodoTask>>,
    pub wallpaper_index: Option<usize>,
}

/// Loads everything persisted under the desktop keys.
///
/// Failures are logged and read as absent so boot always succeeds.
pub async fn load_boot_data(store: &dyn PrefsStore) -> BootData {
    let app_data =
        match load_persisted_with::<_, AppData>(store, APP_DATA_KEY, APP_DATA_SCHEMA_VERSION).await {
            Ok(data) => data,
            Err(err) => {
                leptos::logging::warn!("app data load failed: {err}");
                None
            }
        };

    let todos = match load_pref_with::<_, Vec<TodoTask>>(store, TODOS_KEY).await {
        Ok(todos) => todos,
        Err(err) => {
            leptos::logging::warn!("todo list load failed: {err}");
            None
        }
    };

    let wallpaper_index = match store.load_pref(WALLPAPER_KEY).await {
        Ok(path) => path.map(|path| index_for_path(&path)),
        Err(err) => {
            leptos::logging::warn!("wallpaper load failed: {err}");
            None
        }
    };

    BootData {
        app_data,
        todos,
        wallpaper_index,
    }
}

pub async fn persist_app_data(store: &dyn PrefsStore, data: &AppData) -> Result<(), String> {
    save_persisted_with(store, APP_DATA_KEY, APP_DATA_SCHEMA_VERSION, data).await
}

pub async fn persist_todos(store: &dyn PrefsStore, todos: &[TodoTask]) -> Result<(), String> {
    save_pref_with(store, TODOS_KEY, &todos).await
}

/// Stores the wallpaper path itself, not JSON.
pub async fn persist_wallpaper(store: &dyn PrefsStore, index: usize) -> Result<(), String> {
    store.save_pref(WALLPAPER_KEY, wallpaper_at(index).path).await
}
