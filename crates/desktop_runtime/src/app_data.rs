//! Create/update/delete handling for shared app records.

use chrono::{DateTime, Utc};
use desktop_app_contract::{AppData, DataMutation, TodoTask};

use crate::reducer::ReducerError;

/// Which persisted collection a mutation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutatedCollection {
    /// Notes, events or files under the shared storage key.
    AppData,
    /// The to-do list.
    Todos,
}

/// Applies `mutation` at time `now`.
///
/// # Errors
///
/// Returns [`ReducerError::RecordNotFound`] for updates and deletes of unknown ids, and
/// [`ReducerError::InvalidRecord`] when a file is added under a missing folder or a file.
pub fn apply_mutation(
    data: &mut AppData,
    todos: &mut Vec<TodoTask>,
    mutation: DataMutation,
    now: DateTime<Utc>,
) -> Result<MutatedCollection, ReducerError> {
    let collection = if mutation.targets_todos() {
        MutatedCollection::Todos
    } else {
        MutatedCollection::AppData
    };

    match mutation {
        DataMutation::AddNote(note) => data.notes.push(note),
        DataMutation::UpdateNote { id, patch } => {
            let note = data
                .notes
                .iter_mut()
                .find(|note| note.id == id)
                .ok_or_else(|| ReducerError::RecordNotFound(id.clone()))?;
            if let Some(title) = patch.title {
                note.title = title;
            }
            if let Some(content) = patch.content {
                note.content = content;
            }
            note.date_modified = now;
        }
        DataMutation::DeleteNote { id } => remove_by(&mut data.notes, &id, |note| &note.id)?,
        DataMutation::AddEvent(event) => data.events.push(event),
        DataMutation::UpdateEvent { id, patch } => {
            let event = data
                .events
                .iter_mut()
                .find(|event| event.id == id)
                .ok_or_else(|| ReducerError::RecordNotFound(id.clone()))?;
            if let Some(title) = patch.title {
                event.title = title;
            }
            if let Some(description) = patch.description {
                event.description = description;
            }
            if let Some(date) = patch.date {
                event.date = date;
            }
            if let Some(start_time) = patch.start_time {
                event.start_time = start_time;
            }
            if let Some(end_time) = patch.end_time {
                event.end_time = end_time;
            }
            if let Some(color) = patch.color {
                event.color = color;
            }
        }
        DataMutation::DeleteEvent { id } => remove_by(&mut data.events, &id, |event| &event.id)?,
        DataMutation::AddFile { parent_id, node } => {
            if !data.file_system.insert_child(&parent_id, node) {
                return Err(ReducerError::InvalidRecord(format!(
                    "`{parent_id}` is not a folder"
                )));
            }
        }
        DataMutation::UpdateFile { id, patch } => {
            let node = data
                .file_system
                .find_mut(&id)
                .ok_or_else(|| ReducerError::RecordNotFound(id.clone()))?;
            if let Some(name) = patch.name {
                node.name = name;
            }
            if let Some(content) = patch.content {
                node.size = Some(content.len() as u64);
                node.content = Some(content);
            }
            node.date_modified = now;
        }
        DataMutation::DeleteFile { id } => {
            if !data.file_system.remove_descendant(&id) {
                return Err(ReducerError::RecordNotFound(id));
            }
        }
        DataMutation::AddTodo(task) => todos.insert(0, task),
        DataMutation::UpdateTodo { id, patch } => {
            let task = find_todo(todos, &id)?;
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
            if let Some(priority) = patch.priority {
                task.priority = priority;
            }
            if let Some(deadline) = patch.deadline {
                task.deadline = deadline;
            }
            if let Some(category) = patch.category {
                task.category = category;
            }
        }
        DataMutation::ToggleTodo { id } => {
            let task = find_todo(todos, &id)?;
            task.completed = !task.completed;
        }
        DataMutation::DeleteTodo { id } => remove_by(todos, &id, |task| &task.id)?,
    }

    Ok(collection)
}

fn find_todo<'a>(todos: &'a mut [TodoTask], id: &str) -> Result<&'a mut TodoTask, ReducerError> {
    todos
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or_else(|| ReducerError::RecordNotFound(id.to_string()))
}

fn remove_by<T>(
    records: &mut Vec<T>,
    id: &str,
    key: impl Fn(&T) -> &String,
) -> Result<(), ReducerError> {
    let before = records.len();
    records.retain(|record| key(record) != id);
    if records.len() == before {
        return Err(ReducerError::RecordNotFound(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use desktop_app_contract::{
        CalendarEvent, EventPatch, FileNode, FilePatch, Note, NotePatch, TodoPatch, TodoPriority,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    fn task(id: &str) -> TodoTask {
        TodoTask {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            completed: false,
            priority: TodoPriority::Medium,
            deadline: None,
            created_at: at(0),
            category: "Personal".to_string(),
        }
    }

    #[test]
    fn note_update_touches_modified_time() {
        let mut data = AppData::with_defaults(at(0));
        let mut todos = Vec::new();
        let collection = apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::UpdateNote {
                id: "1".to_string(),
                patch: NotePatch {
                    title: Some("Groceries".to_string()),
                    content: None,
                },
            },
            at(5),
        )
        .expect("update note");

        assert_eq!(collection, MutatedCollection::AppData);
        let note = &data.notes[0];
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "Start writing your thoughts here...");
        assert_eq!(note.date_created, at(0));
        assert_eq!(note.date_modified, at(5));
    }

    #[test]
    fn notes_append_and_delete() {
        let mut data = AppData::with_defaults(at(0));
        let mut todos = Vec::new();
        let note = Note {
            id: "2".to_string(),
            title: "Second".to_string(),
            content: String::new(),
            date_created: at(1),
            date_modified: at(1),
        };
        apply_mutation(&mut data, &mut todos, DataMutation::AddNote(note), at(1)).expect("add");
        assert_eq!(data.notes.last().map(|n| n.id.as_str()), Some("2"));

        apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::DeleteNote { id: "1".to_string() },
            at(2),
        )
        .expect("delete");
        assert_eq!(data.notes.len(), 1);
    }

    #[test]
    fn unknown_ids_are_reported_and_leave_data_unchanged() {
        let mut data = AppData::with_defaults(at(0));
        let mut todos = vec![task("a")];
        let before = (data.clone(), todos.clone());

        for mutation in [
            DataMutation::DeleteNote { id: "9".to_string() },
            DataMutation::UpdateEvent {
                id: "9".to_string(),
                patch: EventPatch::default(),
            },
            DataMutation::DeleteFile { id: "nope".to_string() },
            DataMutation::ToggleTodo { id: "b".to_string() },
        ] {
            let err = apply_mutation(&mut data, &mut todos, mutation, at(1)).unwrap_err();
            assert!(matches!(err, ReducerError::RecordNotFound(_)), "{err}");
        }
        assert_eq!((data, todos), before);
    }

    #[test]
    fn event_update_keeps_unpatched_fields() {
        let mut data = AppData::with_defaults(at(0));
        let mut todos = Vec::new();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::AddEvent(CalendarEvent::all_day("e1", "Pi day", date)),
            at(0),
        )
        .expect("add event");
        apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::UpdateEvent {
                id: "e1".to_string(),
                patch: EventPatch {
                    color: Some("#ff3b30".to_string()),
                    ..EventPatch::default()
                },
            },
            at(1),
        )
        .expect("update event");
        let event = &data.events[0];
        assert_eq!(event.title, "Pi day");
        assert_eq!(event.color, "#ff3b30");
    }

    #[test]
    fn files_only_nest_under_folders() {
        let mut data = AppData::with_defaults(at(0));
        let mut todos = Vec::new();
        let note = FileNode::file("todo-txt", "todo.txt", "milk", at(1));

        let err = apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::AddFile {
                parent_id: "welcome".to_string(),
                node: note.clone(),
            },
            at(1),
        )
        .unwrap_err();
        assert!(matches!(err, ReducerError::InvalidRecord(_)));

        apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::AddFile {
                parent_id: "downloads".to_string(),
                node: note,
            },
            at(1),
        )
        .expect("add file");
        assert!(data.file_system.find("todo-txt").is_some());
    }

    #[test]
    fn file_update_refreshes_size_and_delete_is_recursive() {
        let mut data = AppData::with_defaults(at(0));
        let mut todos = Vec::new();
        apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::UpdateFile {
                id: "welcome".to_string(),
                patch: FilePatch {
                    name: None,
                    content: Some("hi".to_string()),
                },
            },
            at(3),
        )
        .expect("update file");
        let welcome = data.file_system.find("welcome").cloned().expect("welcome");
        assert_eq!(welcome.size, Some(2));
        assert_eq!(welcome.date_modified, at(3));

        apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::DeleteFile { id: "documents".to_string() },
            at(4),
        )
        .expect("delete folder");
        assert!(data.file_system.find("welcome").is_none());
    }

    #[test]
    fn todos_prepend_toggle_and_patch() {
        let mut data = AppData::default();
        let mut todos = vec![task("old")];
        let collection =
            apply_mutation(&mut data, &mut todos, DataMutation::AddTodo(task("new")), at(1))
                .expect("add todo");
        assert_eq!(collection, MutatedCollection::Todos);
        assert_eq!(todos[0].id, "new");

        apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::ToggleTodo { id: "old".to_string() },
            at(1),
        )
        .expect("toggle");
        apply_mutation(
            &mut data,
            &mut todos,
            DataMutation::UpdateTodo {
                id: "new".to_string(),
                patch: TodoPatch {
                    priority: Some(TodoPriority::High),
                    ..TodoPatch::default()
                },
            },
            at(1),
        )
        .expect("patch");
        assert!(todos[1].completed);
        assert_eq!(todos[0].priority, TodoPriority::High);
    }
}
