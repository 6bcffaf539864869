//! Field Message Component
//!
//! Inline validation text under a form field.

use join_core::FieldErrors;
use leptos::prelude::*;

/// First error for `field`, or nothing
#[component]
pub fn FieldMessage(errors: ReadSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|errors| errors.first(field).map(str::to_string)).map(|message| {
            view! { <span class="field-error">{message}</span> }
        })
    }
}
