//! Task Detail Component
//!
//! Full view of one task with subtask checkboxes, delete and edit.

use join_core::services::recipients;
use join_core::Task;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{Avatar, DeleteConfirmButton};
use crate::context::AppContext;
use crate::store::{store_remove_task, store_update_task, use_app_store, AppStateStoreFields};

#[component]
pub fn TaskDetail(
    task_id: u32,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_edit: Callback<Task>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let task = Memo::new(move |_| store.tasks().with(|tasks| tasks.iter().find(|t| t.id == task_id).cloned()));

    let on_toggle = move |sub_id: u32, done: bool| {
        spawn_local(async move {
            match commands::toggle_subtask(task_id, sub_id, done).await {
                Ok(updated) => store_update_task(&store, updated),
                Err(e) => {
                    ctx.notify(e);
                    ctx.reload();
                }
            }
        });
    };

    let on_delete = move |_: ()| {
        let Some(mut active) = ctx.session() else { return };
        spawn_local(async move {
            let result = commands::delete_task(task_id, &mut active).await;
            // The session drops the id even when the store write failed
            ctx.update_session(active);
            match result {
                Ok(()) => {
                    store_remove_task(&store, task_id);
                    on_close.run(());
                }
                Err(e) => {
                    ctx.notify(e);
                    ctx.reload();
                }
            }
        });
    };

    let assignees = move || {
        let task = task.get()?;
        let active = ctx.active_user.get()?;
        let found = recipients(&task, &store.contacts().get(), &active);
        if found.is_empty() {
            return Some(view! { <span class="no-assignee">"No assignee"</span> }.into_any());
        }
        Some(view! {
            {found.owner.then(|| view! {
                <div class="assignee-row">
                    <Avatar initials=active.initials.clone() color=active.color.clone() />
                    <span>{format!("{} (You)", active.name)}</span>
                </div>
            })}
            {found.contacts.into_iter().map(|contact| view! {
                <div class="assignee-row">
                    <Avatar initials=contact.initials color=contact.color />
                    <span>{contact.name}</span>
                </div>
            }).collect_view()}
        }.into_any())
    };

    view! {
        <div class="overlay" on:click=move |_| on_close.run(())>
            <div class="task-detail" on:click=|ev| ev.stop_propagation()>
                {move || match task.get() {
                    None => view! { <p class="empty">"This task no longer exists."</p> }.into_any(),
                    Some(current) => {
                        let for_edit = current.clone();
                        view! {
                            <div class="detail-top">
                                <span class=format!("category-label {}", current.category.css_class())>{current.category.label()}</span>
                                <button class="close-btn" on:click=move |_| on_close.run(())>"✕"</button>
                            </div>
                            <h2 class="detail-title">{current.title.clone()}</h2>
                            <p class="detail-description">{current.description.clone()}</p>
                            <dl class="detail-fields">
                                <dt>"Due date:"</dt>
                                <dd>{current.date.format("%d/%m/%Y").to_string()}</dd>
                                <dt>"Priority:"</dt>
                                <dd>
                                    {current.priority.label()}
                                    <span class=format!("priority-icon priority-{}", current.priority.as_str())></span>
                                </dd>
                            </dl>

                            <h4>"Assigned To:"</h4>
                            <div class="detail-assignees">{assignees}</div>

                            <h4>"Subtasks"</h4>
                            <ul class="detail-subtasks">
                                {current.subtasks.iter().map(|sub| {
                                    let sub_id = sub.sub_id;
                                    view! {
                                        <li>
                                            <label class="checkbox-row">
                                                <input
                                                    type="checkbox"
                                                    prop:checked=sub.done
                                                    on:change=move |ev| on_toggle(sub_id, event_target_checked(&ev))
                                                />
                                                {sub.sub_task_name.clone()}
                                            </label>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>

                            <div class="detail-actions">
                                <DeleteConfirmButton button_class="link-btn" label="Delete" prompt="Delete this task?" on_confirm=on_delete />
                                <span class="detail-actions-divider"></span>
                                <button class="link-btn" on:click=move |_| on_edit.run(for_edit.clone())>"Edit"</button>
                            </div>
                        }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
