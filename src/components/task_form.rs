//! Task Form Component
//!
//! Create and edit form for tasks, plus the Add Task page around it.

use join_core::domain::validation::{field, validate_task};
use join_core::domain::TaskDraft;
use join_core::{Category, FieldErrors, Priority, Status, Task};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{Avatar, FieldMessage};
use crate::context::{AppContext, Page};
use crate::store::{store_update_task, use_app_store, AppStateStoreFields};

/// What the form is filling in
#[derive(Clone, Debug, PartialEq)]
pub enum TaskFormMode {
    /// New task in the given column
    Create(Status),
    Edit(Task),
}

#[component]
pub fn TaskForm(
    mode: TaskFormMode,
    #[prop(into)] on_saved: Callback<Task>,
    #[prop(optional, into)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let active_id = ctx.session().map(|active| active.id).unwrap_or_default();
    let (initial, editing_id) = match &mode {
        TaskFormMode::Create(status) => (TaskDraft { status: *status, ..TaskDraft::default() }, None),
        TaskFormMode::Edit(task) => (TaskDraft::from_task(task, active_id), Some(task.id)),
    };
    let status = initial.status;

    let (title, set_title) = signal(initial.title.clone());
    let (description, set_description) = signal(initial.description.clone());
    let (due_date, set_due_date) = signal(initial.due_date.clone());
    let (priority, set_priority) = signal(initial.priority);
    let (category, set_category) = signal(initial.category);
    let (assigned, set_assigned) = signal(initial.assigned.clone());
    let (assign_self, set_assign_self) = signal(initial.assign_self);
    let (subtasks, set_subtasks) = signal(initial.subtasks.clone());
    let (new_subtask, set_new_subtask) = signal(String::new());
    let (errors, set_errors) = signal(FieldErrors::new());
    let (busy, set_busy) = signal(false);

    let draft = move || TaskDraft {
        title: title.get_untracked(),
        description: description.get_untracked(),
        due_date: due_date.get_untracked(),
        category: category.get_untracked(),
        priority: priority.get_untracked(),
        assigned: assigned.get_untracked(),
        assign_self: assign_self.get_untracked(),
        subtasks: subtasks.get_untracked(),
        status,
    };

    let clear = move || {
        set_title.set(String::new());
        set_description.set(String::new());
        set_due_date.set(String::new());
        set_priority.set(Priority::default());
        set_category.set(None);
        set_assigned.set(Vec::new());
        set_assign_self.set(false);
        set_subtasks.set(Vec::new());
        set_new_subtask.set(String::new());
        set_errors.set(FieldErrors::new());
    };

    let add_subtask = move || {
        let name = new_subtask.get_untracked().trim().to_string();
        if name.is_empty() { return; }
        set_subtasks.update(|list| list.push(name));
        set_new_subtask.set(String::new());
    };

    let toggle_assigned = move |contact_id: u32| {
        set_assigned.update(|ids| {
            if let Some(pos) = ids.iter().position(|id| *id == contact_id) {
                ids.remove(pos);
            } else {
                ids.push(contact_id);
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() { return; }
        let draft = draft();
        let found = validate_task(&draft, commands::today());
        if !found.is_empty() {
            set_errors.set(found);
            return;
        }
        set_errors.set(FieldErrors::new());
        let Some(mut active) = ctx.session() else { return };
        set_busy.set(true);

        spawn_local(async move {
            let saved = match editing_id {
                Some(task_id) => commands::edit_task(task_id, &draft, &active).await.inspect(|task| {
                    store_update_task(&store, task.clone());
                }),
                None => commands::create_task(&draft, &mut active).await.inspect(|task| {
                    store.tasks().write().push(task.clone());
                    ctx.update_session(active.clone());
                }),
            };
            set_busy.set(false);
            match saved {
                Ok(task) => {
                    if editing_id.is_none() { clear(); }
                    on_saved.run(task);
                }
                Err(e) => ctx.notify(e),
            }
        });
    };

    let min_date = commands::today().format("%Y-%m-%d").to_string();

    view! {
        <form class="task-form" on:submit=on_submit>
            <div class="form-columns">
                <div class="form-column">
                    <label class="form-label">"Title" <span class="required">"*"</span></label>
                    <input
                        type="text"
                        placeholder="Enter a title"
                        class:input-error=move || errors.with(|e| e.has(field::TITLE))
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <FieldMessage errors=errors field=field::TITLE />

                    <label class="form-label">"Description"</label>
                    <textarea
                        placeholder="Enter a Description"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>

                    <label class="form-label">"Assigned to"</label>
                    <div class="assign-list">
                        {move || store.own_contact().get().map(|own| view! {
                            <label class="assign-option">
                                <Avatar initials=own.initials color=own.color />
                                <span>{format!("{} (You)", own.name)}</span>
                                <input
                                    type="checkbox"
                                    prop:checked=move || assign_self.get()
                                    on:change=move |ev| set_assign_self.set(event_target_checked(&ev))
                                />
                            </label>
                        })}
                        <For
                            each=move || store.contacts().get()
                            key=|contact| contact.id
                            let:contact
                        >
                            {
                                let contact_id = contact.id;
                                view! {
                                    <label class="assign-option">
                                        <Avatar initials=contact.initials color=contact.color />
                                        <span>{contact.name}</span>
                                        <input
                                            type="checkbox"
                                            prop:checked=move || assigned.with(|ids| ids.contains(&contact_id))
                                            on:change=move |_| toggle_assigned(contact_id)
                                        />
                                    </label>
                                }
                            }
                        </For>
                    </div>
                </div>

                <div class="form-column">
                    <label class="form-label">"Due date" <span class="required">"*"</span></label>
                    <input
                        type="date"
                        min=min_date
                        class:input-error=move || errors.with(|e| e.has(field::DUE_DATE))
                        prop:value=move || due_date.get()
                        on:input=move |ev| set_due_date.set(event_target_value(&ev))
                    />
                    <FieldMessage errors=errors field=field::DUE_DATE />

                    <label class="form-label">"Prio"</label>
                    <div class="priority-buttons">
                        {Priority::ALL.into_iter().map(|level| view! {
                            <button
                                type="button"
                                class=format!("priority-btn priority-{}", level.as_str())
                                class:selected=move || priority.get() == level
                                on:click=move |_| set_priority.set(level)
                            >
                                {level.label()}
                                <span class=format!("priority-icon priority-{}", level.as_str())></span>
                            </button>
                        }).collect_view()}
                    </div>

                    <label class="form-label">"Category" <span class="required">"*"</span></label>
                    <select
                        class:input-error=move || errors.with(|e| e.has(field::CATEGORY))
                        on:change=move |ev| set_category.set(Category::from_label(&event_target_value(&ev)))
                    >
                        <option value="" selected=move || category.get().is_none()>"Select task category"</option>
                        {Category::SELECTABLE.into_iter().map(|option| view! {
                            <option value=option.label() selected=move || category.get() == Some(option)>
                                {option.label()}
                            </option>
                        }).collect_view()}
                    </select>
                    <FieldMessage errors=errors field=field::CATEGORY />

                    <label class="form-label">"Subtasks"</label>
                    <div class="subtask-input">
                        <input
                            type="text"
                            placeholder="Add new subtask"
                            prop:value=move || new_subtask.get()
                            on:input=move |ev| set_new_subtask.set(event_target_value(&ev))
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    add_subtask();
                                }
                            }
                        />
                        <button type="button" class="icon-btn" on:click=move |_| add_subtask()>"+"</button>
                    </div>
                    <ul class="subtask-list">
                        {move || subtasks.get().into_iter().enumerate().map(|(index, name)| {
                            view! { <SubtaskRow index=index name=name set_subtasks=set_subtasks /> }
                        }).collect_view()}
                    </ul>
                </div>
            </div>

            <div class="form-footer">
                <span class="required-hint"><span class="required">"*"</span>"This field is required"</span>
                <div class="form-actions">
                    {match on_cancel {
                        Some(cancel) => view! {
                            <button type="button" class="btn-secondary" on:click=move |_| cancel.run(())>"Cancel"</button>
                        }.into_any(),
                        None => view! {
                            <button type="button" class="btn-secondary" on:click=move |_| clear()>"Clear"</button>
                        }.into_any(),
                    }}
                    <button type="submit" class="btn-primary" disabled=move || busy.get()>
                        {if editing_id.is_some() { "Ok" } else { "Create Task" }}
                    </button>
                </div>
            </div>
        </form>
    }
}

/// One subtask in the form list, editable in place
#[component]
fn SubtaskRow(index: usize, name: String, set_subtasks: WriteSignal<Vec<String>>) -> impl IntoView {
    let (editing, set_editing) = signal(false);
    let (text, set_text) = signal(name);

    let commit = move || {
        let value = text.get_untracked().trim().to_string();
        set_subtasks.update(|list| {
            if value.is_empty() {
                if index < list.len() { list.remove(index); }
            } else if let Some(entry) = list.get_mut(index) {
                *entry = value;
            }
        });
        set_editing.set(false);
    };

    let remove = move |_| {
        set_subtasks.update(|list| {
            if index < list.len() { list.remove(index); }
        });
    };

    view! {
        <li class="subtask-item">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <span class="subtask-name" on:dblclick=move |_| set_editing.set(true)>{move || text.get()}</span>
                    <button type="button" class="icon-btn" on:click=move |_| set_editing.set(true)>"✎"</button>
                    <button type="button" class="icon-btn" on:click=remove>"🗑"</button>
                }
            >
                <input
                    type="text"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            commit();
                        }
                    }
                />
                <button type="button" class="icon-btn" on:click=move |_| commit()>"✓"</button>
            </Show>
        </li>
    }
}

/// Standalone page for creating a task in "To do"
#[component]
pub fn AddTaskPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let on_saved = move |_: Task| {
        ctx.notify("Task added to board");
        ctx.navigate(Page::Board);
    };

    view! {
        <div class="add-task-page">
            <h1>"Add Task"</h1>
            <TaskForm mode=TaskFormMode::Create(Status::Todo) on_saved=on_saved />
        </div>
    }
}
