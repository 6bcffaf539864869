//! Signup Page Component
//!
//! Account registration with all validation messages shown at once.

use join_core::domain::validation::{field, validate_signup};
use join_core::domain::SignupDraft;
use join_core::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::FieldMessage;
use crate::context::{AppContext, Page};

/// Delay before returning to the login page after a successful signup
const SUCCESS_DELAY_MS: u32 = 1500;

#[component]
pub fn SignupPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (legal, set_legal) = signal(false);
    let (errors, set_errors) = signal(FieldErrors::new());
    let (failure, set_failure) = signal::<Option<String>>(None);
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get() { return; }
        let draft = SignupDraft {
            name: name.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm.get(),
            legal_accepted: legal.get(),
        };
        set_busy.set(true);
        set_failure.set(None);

        spawn_local(async move {
            let registered = match commands::is_email_registered(&draft.email).await {
                Ok(registered) => registered,
                Err(e) => {
                    set_failure.set(Some(e));
                    set_busy.set(false);
                    return;
                }
            };
            let found = validate_signup(&draft, registered);
            if !found.is_empty() {
                set_errors.set(found);
                set_busy.set(false);
                return;
            }
            set_errors.set(FieldErrors::new());

            match commands::signup(&draft).await {
                Ok(_) => {
                    ctx.notify("You Signed Up successfully");
                    gloo_timers::future::TimeoutFuture::new(SUCCESS_DELAY_MS).await;
                    ctx.navigate(Page::Login);
                }
                Err(e) => set_failure.set(Some(e)),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <button type="button" class="back-btn" on:click=move |_| ctx.navigate(Page::Login)>"←"</button>
                <h1>"Sign up"</h1>

                <input
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field=field::NAME />

                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field=field::EMAIL />

                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field=field::PASSWORD />

                <input
                    type="password"
                    placeholder="Confirm Password"
                    autocomplete="new-password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                <FieldMessage errors=errors field=field::CONFIRM_PASSWORD />

                <label class="checkbox-row">
                    <input
                        type="checkbox"
                        prop:checked=move || legal.get()
                        on:change=move |ev| set_legal.set(event_target_checked(&ev))
                    />
                    "I accept the Privacy policy"
                </label>
                <FieldMessage errors=errors field=field::LEGAL />

                {move || failure.get().map(|message| view! { <span class="field-error">{message}</span> })}

                <button type="submit" class="btn-primary" disabled=move || busy.get()>"Sign up"</button>
            </form>
        </div>
    }
}
