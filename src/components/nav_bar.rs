//! Navigation Bar Component
//!
//! Side navigation plus the header with the user badge and logout.

use leptos::prelude::*;

use crate::components::Avatar;
use crate::context::{AppContext, Page};
use crate::store::{store_clear, use_app_store};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let (menu_open, set_menu_open) = signal(false);

    let initials = move || ctx.active_user.with(|u| u.as_ref().map(|u| u.initials.clone()).unwrap_or_default());
    let color = move || ctx.active_user.with(|u| u.as_ref().map(|u| u.color.clone()).unwrap_or_default());

    view! {
        <nav class="side-nav">
            <div class="side-nav-logo">"Join"</div>
            {Page::NAV.into_iter().map(|target| {
                let is_active = move || ctx.page.get() == target;
                view! {
                    <button
                        class=move || if is_active() { "nav-link active" } else { "nav-link" }
                        on:click=move |_| ctx.navigate(target)
                    >
                        {target.label()}
                    </button>
                }
            }).collect_view()}
        </nav>
        <header class="top-bar">
            <span class="top-bar-title">"Kanban Project Management Tool"</span>
            <div class="user-menu" on:click=move |_| set_menu_open.update(|open| *open = !*open)>
                {move || view! { <Avatar initials=initials() color=color() class="user-badge" /> }}
                <Show when=move || menu_open.get()>
                    <div class="user-menu-dropdown">
                        <button on:click=move |ev| {
                            ev.stop_propagation();
                            set_menu_open.set(false);
                            store_clear(&store);
                            ctx.sign_out();
                        }>"Log out"</button>
                    </div>
                </Show>
            </div>
        </header>
    }
}
