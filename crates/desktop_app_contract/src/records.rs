//! App data records shared between apps and the runtime, plus the mutations apps may request.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Color assigned to events created without an explicit one.
pub const DEFAULT_EVENT_COLOR: &str = "#007aff";
/// Category assigned to to-do tasks created by voice.
pub const VOICE_TODO_CATEGORY: &str = "Personal";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A note in the notes app.
pub struct Note {
    /// Unique id.
    pub id: String,
    /// Title line.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Creation time.
    pub date_created: DateTime<Utc>,
    /// Last update time.
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Partial note update.
pub struct NotePatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement body.
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A calendar event.
pub struct CalendarEvent {
    /// Unique id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Day of the event.
    pub date: NaiveDate,
    /// Display start time, empty for all-day.
    pub start_time: String,
    /// Display end time, empty for all-day.
    pub end_time: String,
    /// CSS color.
    pub color: String,
}

impl CalendarEvent {
    /// Creates an all-day event with the default color.
    pub fn all_day(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            date,
            start_time: String::new(),
            end_time: String::new(),
            color: DEFAULT_EVENT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Partial event update.
pub struct EventPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement day.
    pub date: Option<NaiveDate>,
    /// Replacement start time.
    pub start_time: Option<String>,
    /// Replacement end time.
    pub end_time: Option<String>,
    /// Replacement color.
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// File-tree node kind.
pub enum FileKind {
    /// Leaf with optional content.
    File,
    /// Container with children.
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A node in the virtual file tree.
pub struct FileNode {
    /// Unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// File or folder.
    pub kind: FileKind,
    /// Text content for files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Children for folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    /// Creation time.
    pub date_created: DateTime<Utc>,
    /// Last update time.
    pub date_modified: DateTime<Utc>,
    /// Size in bytes for files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileNode {
    /// Creates an empty folder.
    pub fn folder(id: impl Into<String>, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: FileKind::Folder,
            content: None,
            children: Some(Vec::new()),
            date_created: now,
            date_modified: now,
            size: None,
        }
    }

    /// Creates a text file.
    pub fn file(
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        Self {
            id: id.into(),
            name: name.into(),
            kind: FileKind::File,
            size: Some(content.len() as u64),
            content: Some(content),
            children: None,
            date_created: now,
            date_modified: now,
        }
    }

    /// Finds a node by id anywhere in this subtree.
    pub fn find(&self, id: &str) -> Option<&FileNode> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter()
            .flatten()
            .find_map(|child| child.find(id))
    }

    /// Mutable variant of [`FileNode::find`].
    pub fn find_mut(&mut self, id: &str) -> Option<&mut FileNode> {
        if self.id == id {
            return Some(self);
        }
        self.children
            .iter_mut()
            .flatten()
            .find_map(|child| child.find_mut(id))
    }

    /// Appends `node` under the folder `parent_id`. Returns `false` when no such folder exists.
    pub fn insert_child(&mut self, parent_id: &str, node: FileNode) -> bool {
        match self.find_mut(parent_id) {
            Some(parent) if parent.kind == FileKind::Folder => {
                parent.children.get_or_insert_with(Vec::new).push(node);
                true
            }
            _ => false,
        }
    }

    /// Removes the node `id` and its subtree from this node's descendants.
    pub fn remove_descendant(&mut self, id: &str) -> bool {
        let Some(children) = self.children.as_mut() else {
            return false;
        };
        let before = children.len();
        children.retain(|child| child.id != id);
        if children.len() != before {
            return true;
        }
        children.iter_mut().any(|child| child.remove_descendant(id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Partial file-node update.
pub struct FilePatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement content. Also refreshes the size.
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// To-do priority.
pub enum TodoPriority {
    /// Low.
    Low,
    /// Medium.
    #[default]
    Medium,
    /// High.
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A to-do task.
pub struct TodoTask {
    /// Unique id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Completion flag.
    pub completed: bool,
    /// Priority.
    pub priority: TodoPriority,
    /// Local due time.
    pub deadline: Option<NaiveDateTime>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Category label.
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Partial to-do update.
pub struct TodoPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// Replacement priority.
    pub priority: Option<TodoPriority>,
    /// Replacement deadline. `Some(None)` clears it.
    pub deadline: Option<Option<NaiveDateTime>>,
    /// Replacement category.
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Records persisted together under one storage key.
pub struct AppData {
    /// Notes, newest last.
    pub notes: Vec<Note>,
    /// Calendar events.
    pub events: Vec<CalendarEvent>,
    /// Root of the virtual file tree.
    pub file_system: FileNode,
}

impl AppData {
    /// Seed data shown on first launch.
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            notes: default_notes(now),
            events: Vec::new(),
            file_system: default_file_system(now),
        }
    }
}

impl Default for AppData {
    fn default() -> Self {
        Self::with_defaults(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// The welcome note.
pub fn default_notes(now: DateTime<Utc>) -> Vec<Note> {
    vec![Note {
        id: "1".to_string(),
        title: "Welcome to Notes".to_string(),
        content: "Start writing your thoughts here...".to_string(),
        date_created: now,
        date_modified: now,
    }]
}

/// The initial `SnackOS` tree with a welcome document.
pub fn default_file_system(now: DateTime<Utc>) -> FileNode {
    let mut welcome = FileNode::file(
        "welcome",
        "Welcome.txt",
        "Welcome to SnackOS!\n\nA minimal, elegant operating system built with React.\n\nExplore the apps and enjoy!",
        now,
    );
    welcome.size = Some(90);
    let mut documents = FileNode::folder("documents", "Documents", now);
    documents.children = Some(vec![welcome]);

    let mut root = FileNode::folder("root", "SnackOS", now);
    root.children = Some(vec![
        documents,
        FileNode::folder("downloads", "Downloads", now),
        FileNode::folder("pictures", "Pictures", now),
    ]);
    root
}

#[derive(Debug, Clone, PartialEq)]
/// Create/update/delete requests against shared app records.
pub enum DataMutation {
    /// Append a note.
    AddNote(Note),
    /// Patch a note and touch its modified time.
    UpdateNote {
        /// Note id.
        id: String,
        /// Fields to replace.
        patch: NotePatch,
    },
    /// Remove a note.
    DeleteNote {
        /// Note id.
        id: String,
    },
    /// Append an event.
    AddEvent(CalendarEvent),
    /// Patch an event.
    UpdateEvent {
        /// Event id.
        id: String,
        /// Fields to replace.
        patch: EventPatch,
    },
    /// Remove an event.
    DeleteEvent {
        /// Event id.
        id: String,
    },
    /// Insert a node under a folder.
    AddFile {
        /// Folder id.
        parent_id: String,
        /// New node.
        node: FileNode,
    },
    /// Patch a node and touch its modified time.
    UpdateFile {
        /// Node id.
        id: String,
        /// Fields to replace.
        patch: FilePatch,
    },
    /// Remove a node and its subtree.
    DeleteFile {
        /// Node id.
        id: String,
    },
    /// Prepend a task.
    AddTodo(TodoTask),
    /// Patch a task.
    UpdateTodo {
        /// Task id.
        id: String,
        /// Fields to replace.
        patch: TodoPatch,
    },
    /// Flip a task's completion flag.
    ToggleTodo {
        /// Task id.
        id: String,
    },
    /// Remove a task.
    DeleteTodo {
        /// Task id.
        id: String,
    },
}

impl DataMutation {
    /// Whether the mutation touches the to-do list rather than [`AppData`].
    pub const fn targets_todos(&self) -> bool {
        matches!(
            self,
            Self::AddTodo(_) | Self::UpdateTodo { .. } | Self::ToggleTodo { .. } | Self::DeleteTodo { .. }
        )
    }
}
