//! Delete Confirm Button Component
//!
//! Two-step delete: the first click asks, the second one deletes.

use leptos::prelude::*;

/// Delete action that asks `prompt` before running `on_confirm`.
/// The confirmation row replaces the button until answered.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] label: String,
    #[prop(into)] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);

    let answer = move |ev: web_sys::MouseEvent, confirmed: bool| {
        ev.stop_propagation();
        set_asking.set(false);
        if confirmed {
            on_confirm.run(());
        }
    };

    view! {
        <Show
            when=move || asking.get()
            fallback=move || view! {
                <button
                    type="button"
                    class=button_class.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(true);
                    }
                >
                    {label.clone()}
                </button>
            }
        >
            <span class="delete-confirm" role="alertdialog">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button type="button" class="btn-primary small" on:click=move |ev| answer(ev, true)>"Yes"</button>
                <button type="button" class="btn-secondary small" on:click=move |ev| answer(ev, false)>"No"</button>
            </span>
        </Show>
    }
}
