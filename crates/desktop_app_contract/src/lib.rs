//! Shared contract types between the desktop window manager runtime and managed apps.
//!
//! The app catalog is a closed enum ([`AppId`]); each app that accepts voice commands owns
//! exactly one typed command slot (see [`commands`]). App data records shared with the runtime
//! live in [`records`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod commands;
pub mod records;

use leptos::{Callable, Callback, Signal, View};
use serde::{Deserialize, Serialize};

pub use commands::{
    CalculationError, CalculatorCommand, CalendarCommand, CommandDomain, CommandEnvelope,
    CommandSlot, CommandSlots, PaintCommand, PaintDrawing, PaintShape, SlotCommand,
};
pub use records::{
    default_file_system, default_notes, AppData, CalendarEvent, DataMutation, EventPatch,
    FileKind, FileNode, FilePatch, Note, NotePatch, TodoPatch, TodoPriority, TodoTask,
    DEFAULT_EVENT_COLOR, VOICE_TODO_CATEGORY,
};

/// Stable identifier for a runtime-managed window.
pub type WindowRuntimeId = u64;

/// Minimum window width enforced by the resize grip.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum window height enforced by the resize grip.
pub const MIN_WINDOW_HEIGHT: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Application kinds hosted by the desktop shell.
pub enum AppId {
    /// Four-function calculator.
    Calculator,
    /// Toy terminal.
    Terminal,
    /// Cosmetic process list.
    TaskManager,
    /// Markdown editor.
    Markdown,
    /// To-do list.
    Todo,
    /// Drawing canvas.
    Paint,
    /// Tic-tac-toe game.
    TicTacToe,
    /// Snake game.
    Snake,
    /// Notes editor.
    Notes,
    /// World clock.
    Clock,
    /// Month calendar with events.
    Calendar,
    /// Virtual file browser.
    Files,
    /// Shell settings.
    Settings,
    /// Music player.
    Music,
}

impl AppId {
    /// Every app in dock order. Voice synonym lookup walks this order.
    pub const ALL: [AppId; 14] = [
        Self::Calculator,
        Self::Terminal,
        Self::TaskManager,
        Self::Markdown,
        Self::Todo,
        Self::Paint,
        Self::TicTacToe,
        Self::Snake,
        Self::Notes,
        Self::Clock,
        Self::Calendar,
        Self::Files,
        Self::Settings,
        Self::Music,
    ];

    /// Returns the stable lowercase token used in storage and DOM attributes.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Calculator => "calculator",
            Self::Terminal => "terminal",
            Self::TaskManager => "taskmanager",
            Self::Markdown => "markdown",
            Self::Todo => "todo",
            Self::Paint => "paint",
            Self::TicTacToe => "tictactoe",
            Self::Snake => "snake",
            Self::Notes => "notes",
            Self::Clock => "clock",
            Self::Calendar => "calendar",
            Self::Files => "files",
            Self::Settings => "settings",
            Self::Music => "music",
        }
    }

    /// Parses a token produced by [`AppId::token`].
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|app| app.token() == token)
    }

    /// Human-readable display name, also used as the window title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Calculator => "Calculator",
            Self::Terminal => "Terminal",
            Self::TaskManager => "Task Manager",
            Self::Markdown => "Markdown",
            Self::Todo => "To-Do",
            Self::Paint => "Paint",
            Self::TicTacToe => "Tic Tac Toe",
            Self::Snake => "Snake",
            Self::Notes => "Notes",
            Self::Clock => "Clock",
            Self::Calendar => "Calendar",
            Self::Files => "Files",
            Self::Settings => "Settings",
            Self::Music => "Music",
        }
    }

    /// Icon token resolved by the shell icon set.
    pub const fn icon_id(self) -> &'static str {
        match self {
            Self::Calculator => "calculator",
            Self::Terminal => "terminal",
            Self::TaskManager => "activity",
            Self::Markdown => "file-text",
            Self::Todo => "check-square",
            Self::Paint => "palette",
            Self::TicTacToe => "grid",
            Self::Snake => "gamepad",
            Self::Notes => "sticky-note",
            Self::Clock => "clock",
            Self::Calendar => "calendar",
            Self::Files => "folder",
            Self::Settings => "settings",
            Self::Music => "music",
        }
    }

    /// Default `(width, height)` of a freshly opened window.
    pub const fn default_size(self) -> (i32, i32) {
        match self {
            Self::Calculator => (400, 600),
            Self::Terminal => (800, 600),
            Self::TaskManager => (900, 700),
            Self::Markdown => (1000, 700),
            Self::Todo => (700, 700),
            Self::Paint => (900, 700),
            Self::TicTacToe => (650, 750),
            Self::Snake => (600, 720),
            Self::Notes => (900, 600),
            Self::Clock => (900, 650),
            Self::Calendar => (1000, 700),
            Self::Files => (900, 600),
            Self::Settings => (800, 700),
            Self::Music => (700, 600),
        }
    }

    /// Phrases that name this app in a voice utterance. Order is significant.
    pub const fn voice_synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Calculator => &["calculator"],
            Self::Terminal => &["terminal"],
            Self::TaskManager => &["task manager", "taskmanager"],
            Self::Markdown => &["markdown"],
            Self::Todo => &["todo", "to do"],
            Self::Paint => &["paint"],
            Self::TicTacToe => &[
                "tic tac toe",
                "tic tac to",
                "tictactoe",
                "tictacto",
                "tic-tac-toe",
                "tic tac",
                "ttt",
            ],
            Self::Snake => &["snake"],
            Self::Notes => &["notes"],
            Self::Clock => &["clock"],
            Self::Calendar => &["calendar"],
            Self::Files => &["files", "file manager"],
            Self::Settings => &["settings"],
            Self::Music => &["music", "music player"],
        }
    }

    /// The command slot this app consumes, if any.
    pub const fn command_domain(self) -> Option<CommandDomain> {
        match self {
            Self::Calculator => Some(CommandDomain::Calculator),
            Self::Calendar => Some(CommandDomain::Calendar),
            Self::Paint => Some(CommandDomain::Paint),
            _ => None,
        }
    }

    /// Whether a dock launch opens this app maximized.
    pub const fn opens_maximized(self) -> bool {
        matches!(self, Self::Paint | Self::Snake)
    }
}

impl CommandDomain {
    /// App that consumes this slot.
    pub const fn app_id(self) -> AppId {
        match self {
            Self::Calculator => AppId::Calculator,
            Self::Calendar => AppId::Calendar,
            Self::Paint => AppId::Paint,
        }
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Requests sent from a mounted app to the desktop runtime.
pub enum AppCommand {
    /// App view finished mounting and is subscribed to its command slot.
    Mounted,
    /// App read its pending command; clear the slot.
    ConsumeCommand,
    /// Close the hosting window.
    Close,
    /// Apply a data mutation to shared app records.
    Mutate(DataMutation),
}

#[derive(Clone, Copy)]
/// Injected runtime services for a single window instance.
pub struct AppServices {
    sender: Callback<AppCommand>,
}

impl AppServices {
    /// Creates service handles from the runtime command callback.
    pub fn new(sender: Callback<AppCommand>) -> Self {
        Self { sender }
    }

    /// Low-level transport send.
    pub fn send(&self, command: AppCommand) {
        self.sender.call(command);
    }

    /// Acknowledges that the app is mounted and ready for slot delivery.
    pub fn mounted(&self) {
        self.send(AppCommand::Mounted);
    }

    /// Clears this app's command slot after reading it.
    pub fn consume_command(&self) {
        self.send(AppCommand::ConsumeCommand);
    }

    /// Requests the hosting window be closed.
    pub fn close(&self) {
        self.send(AppCommand::Close);
    }

    /// Applies a record mutation.
    pub fn mutate(&self, mutation: DataMutation) {
        self.send(AppCommand::Mutate(mutation));
    }
}

#[derive(Clone)]
/// App mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// App kind hosted by the window.
    pub app_id: AppId,
    /// Stable runtime window id.
    pub window_id: WindowRuntimeId,
    /// The pending command in this app's slot, if the app has a command domain.
    pub pending_command: Signal<Option<CommandEnvelope<SlotCommand>>>,
    /// Shared notes/events/file-system records.
    pub data: Signal<AppData>,
    /// Shared to-do list.
    pub todos: Signal<Vec<TodoTask>>,
    /// Runtime service bundle.
    pub services: AppServices,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted app module descriptor used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tokens_round_trip_for_every_app() {
        for app in AppId::ALL {
            assert_eq!(AppId::from_token(app.token()), Some(app));
        }
        assert_eq!(AppId::from_token("minesweeper"), None);
    }

    #[test]
    fn only_calculator_calendar_and_paint_own_slots() {
        let with_slots: Vec<AppId> = AppId::ALL
            .into_iter()
            .filter(|app| app.command_domain().is_some())
            .collect();
        assert_eq!(
            with_slots,
            vec![AppId::Calculator, AppId::Paint, AppId::Calendar]
        );
        for app in with_slots {
            assert_eq!(app.command_domain().map(CommandDomain::app_id), Some(app));
        }
    }

    #[test]
    fn serde_uses_lowercase_tokens() {
        let encoded = serde_json::to_string(&AppId::TaskManager).unwrap();
        assert_eq!(encoded, "\"taskmanager\"");
        let decoded: AppId = serde_json::from_str("\"tictactoe\"").unwrap();
        assert_eq!(decoded, AppId::TicTacToe);
    }
}
