//! Join Frontend App
//!
//! Root component: session, page switching and data loading.

use join_core::{ActiveUser, Status};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, DropTarget};
use reactive_stores::Store;

use crate::commands;
use crate::components::{
    AddTaskPage, BoardPage, ContactsPage, LoginPage, NavBar, SignupPage, SummaryPage,
};
use crate::context::{AppContext, Page};
use crate::session;
use crate::store::{store_update_task, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    // State
    let restored = session::load_active_user();
    let start_page = if restored.is_some() { Page::Summary } else { Page::Login };
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (active_user, set_active_user) = signal::<Option<ActiveUser>>(restored);
    let (page, set_page) = signal(start_page);
    let (toast, set_toast) = signal::<Option<String>>(None);

    let ctx = AppContext::new(
        (reload_trigger, set_reload_trigger),
        (active_user, set_active_user),
        (page, set_page),
        (toast, set_toast),
    );
    provide_context(ctx);

    // Pick up changes made to the user record since the session was saved
    if let Some(active) = ctx.session() {
        spawn_local(async move {
            if let Ok(fresh) = commands::refresh_session(&active).await {
                if fresh != active {
                    ctx.update_session(fresh);
                    ctx.reload();
                }
            }
        });
    }

    let store = Store::new(AppState::default());
    provide_context(store);

    // Card drag-and-drop lives as long as the app
    let dnd = create_dnd_signals();
    provide_context(dnd);
    bind_global_mouseup(dnd, move |task_id, target| {
        let DropTarget::Column(column) = target;
        let Some(status) = Status::from_index(column) else { return };
        spawn_local(async move {
            match commands::move_task(task_id, status).await {
                Ok(task) => store_update_task(&store, task),
                Err(_) => ctx.reload(),
            }
        });
    });

    // Load the session's tasks and contacts whenever a reload is requested
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        let Some(active) = active_user.get_untracked() else { return };
        log::debug!("[APP] loading data for user {}, trigger={}", active.id, trigger);
        store.loading().set(true);
        spawn_local(async move {
            match commands::list_tasks(&active).await {
                Ok(tasks) => {
                    log::debug!("[APP] loaded {} tasks", tasks.len());
                    store.tasks().set(tasks);
                }
                Err(e) => log::warn!("[APP] keeping old tasks: {}", e),
            }
            if let Ok(contacts) = commands::list_contacts(&active).await {
                store.contacts().set(contacts);
            }
            if let Ok(own) = commands::own_contact(&active).await {
                store.own_contact().set(own);
            }
            store.loading().set(false);
        });
    });

    let content = move || {
        let current = page.get();
        if current.needs_login() && active_user.with(Option::is_none) {
            return view! { <LoginPage /> }.into_any();
        }
        match current {
            Page::Login => view! { <LoginPage /> }.into_any(),
            Page::Signup => view! { <SignupPage /> }.into_any(),
            Page::Summary => view! { <Shell><SummaryPage /></Shell> }.into_any(),
            Page::AddTask => view! { <Shell><AddTaskPage /></Shell> }.into_any(),
            Page::Board => view! { <Shell><BoardPage /></Shell> }.into_any(),
            Page::Contacts => view! { <Shell><ContactsPage /></Shell> }.into_any(),
        }
    };

    view! {
        {content}
        {move || toast.get().map(|message| view! { <div class="toast">{message}</div> })}
    }
}

/// Navigation around a signed-in page
#[component]
fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">{children()}</main>
        </div>
    }
}
