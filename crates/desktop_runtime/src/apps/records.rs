//! Apps backed by shared records: to-do list, notes and files.

use desktop_app_contract::{
    AppMountContext, DataMutation, FileKind, FileNode, Note, NotePatch, TodoPriority, TodoTask,
    VOICE_TODO_CATEGORY,
};
use leptos::*;
use platform_host::{next_monotonic_timestamp_ms, utc_now};

use super::acknowledge_mount;

fn new_task(title: &str) -> Option<TodoTask> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some(TodoTask {
        id: next_monotonic_timestamp_ms().to_string(),
        title: title.to_string(),
        description: String::new(),
        completed: false,
        priority: TodoPriority::Medium,
        deadline: None,
        created_at: utc_now(),
        category: VOICE_TODO_CATEGORY.to_string(),
    })
}

fn priority_class(priority: TodoPriority) -> &'static str {
    match priority {
        TodoPriority::Low => "low",
        TodoPriority::Medium => "medium",
        TodoPriority::High => "high",
    }
}

pub(super) fn mount_todo_app(context: AppMountContext) -> View {
    view! { <TodoApp context=context /> }.into_view()
}

#[component]
fn TodoApp(context: AppMountContext) -> impl IntoView {
    let services = context.services;
    let todos = context.todos;
    let draft = create_rw_signal(String::new());
    acknowledge_mount(services);

    let add = move || {
        if let Some(task) = new_task(&draft.get_untracked()) {
            services.mutate(DataMutation::AddTodo(task));
            draft.set(String::new());
        }
    };
    let remaining = move || todos.with(|tasks| tasks.iter().filter(|t| !t.completed).count());

    view! {
        <div class="app todo">
            <form class="todo-add" on:submit=move |ev| {
                ev.prevent_default();
                add();
            }>
                <input
                    class="app-field"
                    placeholder="Add a task"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button type="submit" class="app-action">"Add"</button>
            </form>
            <ul class="todo-list">
                <For each=move || todos.get() key=|task| (task.id.clone(), task.completed) let:task>
                    {{
                        let toggle_id = task.id.clone();
                        let delete_id = task.id.clone();
                        let deadline = task
                            .deadline
                            .map(|due| due.format("%b %-d, %-I:%M %p").to_string());
                        view! {
                            <li class=if task.completed { "todo-item completed" } else { "todo-item" }>
                                <input
                                    type="checkbox"
                                    prop:checked=task.completed
                                    on:change=move |_| {
                                        services.mutate(DataMutation::ToggleTodo { id: toggle_id.clone() })
                                    }
                                />
                                <span class="todo-title">{task.title}</span>
                                <span class=format!("priority-badge {}", priority_class(task.priority))>
                                    {priority_class(task.priority)}
                                </span>
                                <span class="category-badge">{task.category}</span>
                                {deadline.map(|due| view! { <span class="todo-deadline">{due}</span> })}
                                <button
                                    class="app-action"
                                    aria-label="Delete task"
                                    on:click=move |_| {
                                        services.mutate(DataMutation::DeleteTodo { id: delete_id.clone() })
                                    }
                                >
                                    "×"
                                </button>
                            </li>
                        }
                    }}
                </For>
            </ul>
            <div class="app-statusbar">{move || format!("{} remaining", remaining())}</div>
        </div>
    }
}

pub(super) fn mount_notes_app(context: AppMountContext) -> View {
    view! { <NotesApp context=context /> }.into_view()
}

#[component]
fn NotesApp(context: AppMountContext) -> impl IntoView {
    let services = context.services;
    let data = context.data;
    let selected = create_rw_signal(None::<String>);
    acknowledge_mount(services);

    let selected_note = create_memo(move |_| {
        let id = selected.get()?;
        data.with(|data| data.notes.iter().find(|note| note.id == id).cloned())
    });
    let create = move |_| {
        let now = utc_now();
        let note = Note {
            id: next_monotonic_timestamp_ms().to_string(),
            title: "Untitled Note".to_string(),
            content: String::new(),
            date_created: now,
            date_modified: now,
        };
        selected.set(Some(note.id.clone()));
        services.mutate(DataMutation::AddNote(note));
    };
    let patch = move |patch: NotePatch| {
        if let Some(id) = selected.get_untracked() {
            services.mutate(DataMutation::UpdateNote { id, patch });
        }
    };
    let delete = move |_| {
        if let Some(id) = selected.get_untracked() {
            selected.set(None);
            services.mutate(DataMutation::DeleteNote { id });
        }
    };

    view! {
        <div class="app notes">
            <aside class="notes-sidebar">
                <button class="app-action" on:click=create>"New Note"</button>
                <For each=move || data.get().notes key=|note| (note.id.clone(), note.title.clone()) let:note>
                    {{
                        let id = note.id.clone();
                        view! {
                            <button
                                class="note-list-item"
                                class:selected=move || selected.get().as_deref() == Some(id.as_str())
                                on:click={
                                    let id = note.id.clone();
                                    move |_| selected.set(Some(id.clone()))
                                }
                            >
                                {note.title}
                            </button>
                        }
                    }}
                </For>
            </aside>
            <section class="notes-editor">
                {move || match selected_note.get() {
                    None => view! { <p class="notes-empty">"Select a note"</p> }.into_view(),
                    Some(note) => view! {
                        <input
                            class="app-field note-title"
                            prop:value=note.title
                            on:change=move |ev| {
                                let title = event_target_value(&ev);
                                let title = if title.trim().is_empty() { "Untitled Note".to_string() } else { title };
                                patch(NotePatch { title: Some(title), content: None });
                            }
                        />
                        <textarea
                            class="app-field note-content"
                            prop:value=note.content
                            on:change=move |ev| {
                                patch(NotePatch { title: None, content: Some(event_target_value(&ev)) });
                            }
                        />
                        <button class="app-action" on:click=delete>"Delete"</button>
                    }
                    .into_view(),
                }}
            </section>
        </div>
    }
}

/// Human-readable byte size, e.g. `1.5 KB`. Missing and zero sizes read as `0 B`.
fn format_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let Some(bytes) = bytes.filter(|&b| b > 0) else {
        return "0 B".to_string();
    };
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[unit])
}

/// Folder reached by following `path` (folder ids below the root).
fn folder_at<'a>(root: &'a FileNode, path: &[String]) -> Option<&'a FileNode> {
    path.iter().try_fold(root, |folder, id| {
        folder
            .children
            .as_ref()?
            .iter()
            .find(|child| child.id == *id && child.kind == FileKind::Folder)
    })
}

pub(super) fn mount_files_app(context: AppMountContext) -> View {
    view! { <FilesApp context=context /> }.into_view()
}

#[component]
fn FilesApp(context: AppMountContext) -> impl IntoView {
    let data = context.data;
    let path = create_rw_signal(Vec::<String>::new());
    let preview = create_rw_signal(None::<String>);
    acknowledge_mount(context.services);

    let listing = move || {
        data.with(|data| {
            path.with(|path| {
                folder_at(&data.file_system, path)
                    .and_then(|folder| folder.children.clone())
                    .unwrap_or_default()
            })
        })
    };
    let location = move || {
        data.with(|data| {
            path.with(|path| {
                let mut names = vec![data.file_system.name.clone()];
                names.extend(
                    (1..=path.len())
                        .filter_map(|depth| folder_at(&data.file_system, &path[..depth]))
                        .map(|folder| folder.name.clone()),
                );
                names.join(" / ")
            })
        })
    };

    view! {
        <div class="app files">
            <div class="files-toolbar">
                <button
                    class="app-action"
                    disabled=move || path.with(Vec::is_empty)
                    on:click=move |_| {
                        path.update(|p| {
                            p.pop();
                        });
                        preview.set(None);
                    }
                >
                    "Back"
                </button>
                <span class="files-path">{location}</span>
            </div>
            <ul class="files-list">
                {move || {
                    listing()
                        .into_iter()
                        .map(|node| {
                            let is_folder = node.kind == FileKind::Folder;
                            let id = node.id.clone();
                            let content = node.content.clone();
                            let size = if is_folder { String::new() } else { format_size(node.size) };
                            view! {
                                <li
                                    class=if is_folder { "file-item folder" } else { "file-item" }
                                    on:dblclick=move |_| {
                                        if is_folder {
                                            path.update(|p| p.push(id.clone()));
                                            preview.set(None);
                                        } else {
                                            preview.set(content.clone());
                                        }
                                    }
                                >
                                    <span class="file-name">{node.name}</span>
                                    <span class="file-size">{size}</span>
                                    <span class="file-date">{node.date_modified.format("%b %-d, %Y").to_string()}</span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            {move || preview.get().map(|text| view! { <pre class="file-preview">{text}</pre> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::default_file_system;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(None), "0 B");
        assert_eq!(format_size(Some(90)), "90 B");
        assert_eq!(format_size(Some(1536)), "1.5 KB");
        assert_eq!(format_size(Some(3 * 1024 * 1024)), "3 MB");
    }

    #[test]
    fn folder_path_walks_from_root() {
        let root = default_file_system(utc_now());
        let documents = root
            .children
            .as_ref()
            .and_then(|children| children.iter().find(|c| c.name == "Documents"))
            .expect("seeded documents folder");

        assert_eq!(folder_at(&root, &[]).map(|f| f.id.as_str()), Some(root.id.as_str()));
        assert_eq!(
            folder_at(&root, &[documents.id.clone()]).map(|f| f.name.as_str()),
            Some("Documents")
        );
        assert_eq!(folder_at(&root, &["missing".to_string()]), None);
    }

    #[test]
    fn blank_task_titles_are_rejected() {
        assert_eq!(new_task("   "), None);
        let task = new_task(" buy milk ").expect("task");
        assert_eq!(task.title, "buy milk");
        assert_eq!(task.priority, TodoPriority::Medium);
        assert!(!task.completed);
    }
}
