//! Login Page Component
//!
//! Email/password login, guest access and the sample-data reset.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{AppContext, Page};
use crate::session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let remembered = session::remembered_email();
    let (remember_me, set_remember_me) = signal(remembered.is_some());
    let (email, set_email) = signal(remembered.unwrap_or_default());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let on_login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get() { return; }
        let email_value = email.get();
        let password_value = password.get();
        let remember = remember_me.get();
        set_busy.set(true);
        set_error.set(None);

        spawn_local(async move {
            match commands::login(&email_value, &password_value).await {
                Ok(active) => {
                    session::remember_email(remember.then_some(email_value.trim()));
                    ctx.sign_in(active);
                }
                Err(e) => {
                    set_password.set(String::new());
                    set_error.set(Some(e));
                }
            }
            set_busy.set(false);
        });
    };

    let on_guest = move |_| ctx.sign_in(commands::guest());

    let on_reset = move |_| {
        spawn_local(async move {
            match commands::reset_sample_data().await {
                Ok(()) => ctx.notify("Sample tasks and contacts restored"),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-header">
                <span class="login-logo">"Join"</span>
                <span class="login-signup-hint">
                    "Not a Join user? "
                    <button class="btn-primary small" on:click=move |_| ctx.navigate(Page::Signup)>"Sign up"</button>
                </span>
            </div>

            <form class="login-card" on:submit=on_login>
                <h1>"Log in"</h1>
                <input
                    type="email"
                    placeholder="Email"
                    autocomplete="username"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    class:input-error=move || error.get().is_some()
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|message| view! { <span class="field-error">{message}</span> })}

                <label class="checkbox-row">
                    <input
                        type="checkbox"
                        prop:checked=move || remember_me.get()
                        on:change=move |ev| set_remember_me.set(event_target_checked(&ev))
                    />
                    "Remember me"
                </label>

                <div class="login-actions">
                    <button type="submit" class="btn-primary" disabled=move || busy.get()>"Log in"</button>
                    <button type="button" class="btn-secondary" on:click=on_guest>"Guest Log in"</button>
                </div>
            </form>

            <button type="button" class="link-btn reset-samples" on:click=on_reset>
                "Restore sample data"
            </button>
        </div>
    }
}
