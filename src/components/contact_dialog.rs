//! Contact Dialog Component
//!
//! Overlay form for adding a contact or editing one.

use join_core::domain::validation::{field, validate_contact};
use join_core::domain::ContactDraft;
use join_core::services::OWN_CONTACT_ID;
use join_core::{Contact, FieldErrors};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{Avatar, FieldMessage};
use crate::context::AppContext;
use crate::store::{store_upsert_contact, use_app_store, AppStateStoreFields};

/// Add (`editing` is `None`) or edit a contact
#[component]
pub fn ContactDialog(
    editing: Option<Contact>,
    #[prop(into)] on_saved: Callback<Contact>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let initial = editing.as_ref().map(ContactDraft::from_contact).unwrap_or_default();
    let editing_id = editing.as_ref().map(|contact| contact.id);

    let (name, set_name) = signal(initial.name);
    let (email, set_email) = signal(initial.email);
    let (phone, set_phone) = signal(initial.phone);
    let (errors, set_errors) = signal(FieldErrors::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() { return; }
        let draft = ContactDraft {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
        };
        let found = validate_contact(&draft);
        if !found.is_empty() {
            set_errors.set(found);
            return;
        }
        set_errors.set(FieldErrors::new());
        let Some(mut active) = ctx.session() else { return };
        set_busy.set(true);

        spawn_local(async move {
            let saved = match editing_id {
                Some(contact_id) => commands::edit_contact(contact_id, &draft, &mut active).await,
                None => commands::create_contact(&draft, &mut active).await,
            };
            set_busy.set(false);
            match saved {
                Ok(contact) => {
                    ctx.update_session(active);
                    if contact.id == OWN_CONTACT_ID {
                        store.own_contact().set(Some(contact.clone()));
                    } else {
                        store_upsert_contact(&store, contact.clone());
                    }
                    on_saved.run(contact);
                }
                Err(e) => ctx.notify(e),
            }
        });
    };

    let heading = if editing.is_some() { "Edit contact" } else { "Add contact" };
    let badge = editing.map(|contact| view! {
        <Avatar initials=contact.initials color=contact.color class="dialog-avatar" />
    }.into_any());

    view! {
        <div class="overlay" on:click=move |_| on_close.run(())>
            <div class="contact-dialog" on:click=|ev| ev.stop_propagation()>
                <div class="dialog-banner">
                    <span class="side-nav-logo">"Join"</span>
                    <h2>{heading}</h2>
                    <Show when=move || editing_id.is_none()>
                        <span class="dialog-tagline">"Tasks are better with a team!"</span>
                    </Show>
                </div>

                <form class="dialog-body" on:submit=on_submit>
                    <button type="button" class="close-btn" on:click=move |_| on_close.run(())>"✕"</button>
                    {badge.unwrap_or_else(|| view! { <span class="avatar avatar-placeholder dialog-avatar"></span> }.into_any())}

                    <input
                        type="text"
                        placeholder="Name"
                        class:input-error=move || errors.with(|e| e.has(field::NAME))
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <FieldMessage errors=errors field=field::NAME />

                    <input
                        type="email"
                        placeholder="Email"
                        class:input-error=move || errors.with(|e| e.has(field::EMAIL))
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <FieldMessage errors=errors field=field::EMAIL />

                    <input
                        type="tel"
                        placeholder="Phone"
                        class:input-error=move || errors.with(|e| e.has(field::PHONE))
                        prop:value=move || phone.get()
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                    />
                    <FieldMessage errors=errors field=field::PHONE />

                    <div class="form-actions">
                        <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button type="submit" class="btn-primary" disabled=move || busy.get()>
                            {if editing_id.is_some() { "Save" } else { "Create contact" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
