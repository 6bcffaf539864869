//! Task Card Component
//!
//! A draggable card on the board with progress, assignees and priority.

use join_core::services::assignee_badges;
use join_core::Task;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_mousedown, DndSignals};

use crate::commands;
use crate::components::Avatar;
use crate::context::AppContext;
use crate::store::{store_update_task, use_app_store, AppStateStoreFields};

#[component]
pub fn TaskCard(task: Task, #[prop(into)] on_open: Callback<u32>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let dnd = expect_context::<DndSignals>();
    let store = use_app_store();

    let task_id = task.id;
    let (done, total) = task.subtask_progress();
    let percent = task.progress_percent();
    let earlier = task.status.shifted(-1);
    let later = task.status.shifted(1);

    let badges = {
        let task = task.clone();
        move || {
            let active = ctx.active_user.get()?;
            let contacts = store.contacts().get();
            Some((assignee_badges(&task, &contacts, &active), active))
        }
    };

    let on_mousedown = make_on_mousedown(dnd, task_id);
    let on_click = move |_| {
        if dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        on_open.run(task_id);
    };

    let step = move |direction: i32| {
        spawn_local(async move {
            match commands::move_task_by_step(task_id, direction).await {
                Ok(task) => store_update_task(&store, task),
                Err(e) => ctx.notify(e),
            }
        });
    };

    view! {
        <div
            class="task-card"
            class:dragging=move || dnd.is_dragging(task_id)
            on:mousedown=on_mousedown
            on:click=on_click
        >
            <div class="card-top">
                <span class=format!("category-label {}", task.category.css_class())>{task.category.label()}</span>
                <span class="card-moves">
                    {earlier.map(|status| view! {
                        <button class="move-btn" title=status.label() on:click=move |ev| {
                            ev.stop_propagation();
                            step(-1);
                        }>"↑"</button>
                    })}
                    {later.map(|status| view! {
                        <button class="move-btn" title=status.label() on:click=move |ev| {
                            ev.stop_propagation();
                            step(1);
                        }>"↓"</button>
                    })}
                </span>
            </div>

            <h3 class="card-title">{task.title.clone()}</h3>
            <p class="card-description">{task.short_description()}</p>

            <Show when=move || { total > 0 }>
                <div class="card-progress">
                    <div class="progress-track">
                        <div class="progress-fill" style=format!("width: {}%;", percent)></div>
                    </div>
                    <span class="progress-text">{format!("{}/{} Subtasks", done, total)}</span>
                </div>
            </Show>

            <div class="card-bottom">
                <div class="card-assignees">
                    {move || badges().map(|(badges, active)| view! {
                        {badges.show_owner.then(|| view! {
                            <Avatar initials=active.initials.clone() color=active.color.clone() class="card-avatar" />
                        })}
                        {badges.contacts.into_iter().map(|contact| view! {
                            <Avatar initials=contact.initials color=contact.color class="card-avatar" />
                        }).collect_view()}
                        {(badges.overflow > 0).then(|| view! {
                            <span class="avatar avatar-more card-avatar">{format!("+{}", badges.overflow)}</span>
                        })}
                    })}
                </div>
                <span class=format!("priority-icon priority-{}", task.priority.as_str()) title=task.priority.label()></span>
            </div>
        </div>
    }
}
