//! Contacts Page Component
//!
//! Alphabetical contact list with a detail pane and the add/edit dialog.

use join_core::services::{group_by_initial, OWN_CONTACT_ID};
use join_core::Contact;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{Avatar, ContactDialog, DeleteConfirmButton};
use crate::context::AppContext;
use crate::store::{find_contact, store_remove_contact, use_app_store, AppStateStoreFields};

/// Which dialog is open
#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Add,
    Edit(Contact),
}

#[component]
pub fn ContactsPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (selected, set_selected) = signal::<Option<u32>>(None);
    let (dialog, set_dialog) = signal::<Option<Dialog>>(None);

    let groups = Memo::new(move |_| store.contacts().with(|contacts| group_by_initial(contacts)));
    let current = move || selected.get().and_then(|id| find_contact(&store, id));

    let on_saved = Callback::new(move |contact: Contact| {
        set_dialog.set(None);
        set_selected.set(Some(contact.id));
        ctx.notify("Contact successfully saved");
    });
    let on_close = Callback::new(move |_: ()| set_dialog.set(None));

    let delete = move |contact_id: u32| {
        let Some(mut active) = ctx.session() else { return };
        spawn_local(async move {
            let result = commands::delete_contact(contact_id, &mut active).await;
            ctx.update_session(active);
            store_remove_contact(&store, contact_id);
            set_selected.set(None);
            if let Err(e) = result {
                ctx.notify(e);
            }
            // Assignments on tasks changed
            ctx.reload();
        });
    };

    let row = move |contact: Contact, own: bool| {
        let contact_id = contact.id;
        let label = if own { format!("{} (You)", contact.name) } else { contact.name.clone() };
        view! {
            <button
                class="contact-row"
                class:selected=move || selected.get() == Some(contact_id)
                on:click=move |_| set_selected.set(Some(contact_id))
            >
                <Avatar initials=contact.initials color=contact.color />
                <span class="contact-row-text">
                    <span class="contact-name">{label}</span>
                    <span class="contact-email">{contact.email}</span>
                </span>
            </button>
        }
    };

    view! {
        <div class="contacts-page">
            <aside class="contact-list">
                <button class="btn-primary add-contact" on:click=move |_| set_dialog.set(Some(Dialog::Add))>
                    "Add new contact"
                </button>

                {move || store.own_contact().get().map(|own| row(own, true))}

                {move || groups.get().into_iter().map(|(letter, members)| view! {
                    <div class="contact-group">
                        <div class="contact-letter">{letter.to_string()}</div>
                        {members.into_iter().map(|contact| row(contact, false)).collect_view()}
                    </div>
                }).collect_view()}
            </aside>

            <section class="contact-detail">
                <div class="contact-detail-heading">
                    <h1>"Contacts"</h1>
                    <span class="contact-detail-tagline">"Better with a team"</span>
                </div>

                {move || current().map(|contact| {
                    let contact_id = contact.id;
                    let for_edit = contact.clone();
                    view! {
                        <div class="contact-card">
                            <div class="contact-card-head">
                                <Avatar initials=contact.initials.clone() color=contact.color.clone() class="avatar-large" />
                                <div>
                                    <h2>{contact.name.clone()}</h2>
                                    <div class="contact-actions">
                                        <button class="link-btn" on:click=move |_| set_dialog.set(Some(Dialog::Edit(for_edit.clone())))>
                                            "Edit"
                                        </button>
                                        <Show when=move || contact_id != OWN_CONTACT_ID>
                                            <DeleteConfirmButton
                                                button_class="link-btn"
                                                label="Delete"
                                                prompt="Delete this contact?"
                                                on_confirm=move |_: ()| delete(contact_id)
                                            />
                                        </Show>
                                    </div>
                                </div>
                            </div>
                            <h4>"Contact Information"</h4>
                            <dl class="contact-info">
                                <dt>"Email"</dt>
                                <dd><a href=format!("mailto:{}", contact.email)>{contact.email.clone()}</a></dd>
                                <dt>"Phone"</dt>
                                <dd>{contact.phone.clone()}</dd>
                            </dl>
                        </div>
                    }
                })}
            </section>

            {move || dialog.get().map(|shown| {
                let editing = match shown {
                    Dialog::Add => None,
                    Dialog::Edit(contact) => Some(contact),
                };
                view! { <ContactDialog editing=editing on_saved=on_saved on_close=on_close /> }
            })}
        </div>
    }
}
