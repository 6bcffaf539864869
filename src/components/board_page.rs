//! Board Page Component
//!
//! Four status columns with search, drag-and-drop and task overlays.

use join_core::services::{columns, nothing_found, NO_TASK_FOUND};
use join_core::{Status, Task};
use leptos::prelude::*;
use leptos_dragdrop::{make_on_column_mouseenter, make_on_mouseleave, DndSignals};

use crate::components::{TaskCard, TaskDetail, TaskForm, TaskFormMode};
use crate::context::{AppContext, Page};
use crate::store::{use_app_store, AppStateStoreFields};

/// Overlay shown above the board
#[derive(Clone, Debug, PartialEq)]
enum Overlay {
    Detail(u32),
    Form(TaskFormMode),
}

#[component]
pub fn BoardPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let dnd = expect_context::<DndSignals>();
    let store = use_app_store();

    let (overlay, set_overlay) = signal::<Option<Overlay>>(None);

    let board = Memo::new(move |_| {
        let query = store.search().get();
        store.tasks().with(|tasks| columns(tasks, &query))
    });
    let empty_search = move || board.with(|cols| nothing_found(cols, &store.search().get()));

    let open_detail = Callback::new(move |task_id: u32| set_overlay.set(Some(Overlay::Detail(task_id))));
    let close = Callback::new(move |_: ()| set_overlay.set(None));
    let edit = Callback::new(move |task: Task| set_overlay.set(Some(Overlay::Form(TaskFormMode::Edit(task)))));
    let saved = Callback::new(move |task: Task| {
        let next = match overlay.get_untracked() {
            Some(Overlay::Form(TaskFormMode::Edit(_))) => Some(Overlay::Detail(task.id)),
            _ => None,
        };
        set_overlay.set(next);
    });

    view! {
        <div class="board-page">
            <div class="board-header">
                <h1>"Board"</h1>
                <div class="board-search">
                    <input
                        type="search"
                        placeholder="Find Task"
                        prop:value=move || store.search().get()
                        on:input=move |ev| store.search().set(event_target_value(&ev))
                    />
                </div>
                <button class="btn-primary" on:click=move |_| ctx.navigate(Page::AddTask)>"Add task +"</button>
            </div>

            <Show when=move || store.loading().get()>
                <p class="board-loading">"Loading tasks..."</p>
            </Show>

            <Show when=empty_search>
                <p class="no-results">{NO_TASK_FOUND}</p>
            </Show>

            <div class="board-columns">
                {Status::ALL.into_iter().map(|status| {
                    let column = status.index();
                    let tasks = move || board.with(|cols| cols.get(column).map(|col| col.tasks.clone()).unwrap_or_default());
                    view! {
                        <section
                            class="board-column"
                            class:drop-over=move || dnd.is_over_column(column)
                            on:mouseenter=make_on_column_mouseenter(dnd, column)
                            on:mouseleave=make_on_mouseleave(dnd)
                        >
                            <div class="column-header">
                                <h2>{status.label()}</h2>
                                <Show when=move || status != Status::Done>
                                    <button
                                        class="icon-btn"
                                        title="Add task"
                                        on:click=move |_| set_overlay.set(Some(Overlay::Form(TaskFormMode::Create(status))))
                                    >"+"</button>
                                </Show>
                            </div>
                            <div class="column-cards">
                                <Show
                                    when=move || !tasks().is_empty()
                                    fallback=move || view! {
                                        <div class="column-empty">{format!("No tasks {}", status.label())}</div>
                                    }
                                >
                                    {move || tasks().into_iter().map(|task| view! {
                                        <TaskCard task=task on_open=open_detail />
                                    }).collect_view()}
                                </Show>
                            </div>
                        </section>
                    }
                }).collect_view()}
            </div>

            {move || overlay.get().map(|shown| match shown {
                Overlay::Detail(task_id) => view! {
                    <TaskDetail task_id=task_id on_close=close on_edit=edit />
                }.into_any(),
                Overlay::Form(mode) => view! {
                    <div class="overlay" on:click=move |_| close.run(())>
                        <div class="task-form-dialog" on:click=|ev| ev.stop_propagation()>
                            <button class="close-btn" on:click=move |_| close.run(())>"✕"</button>
                            <TaskForm mode=mode on_saved=saved on_cancel=close />
                        </div>
                    </div>
                }.into_any(),
            })}
        </div>
    }
}
