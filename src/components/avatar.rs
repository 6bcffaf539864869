//! Avatar Component
//!
//! Round initials badge in a person's colour.

use leptos::prelude::*;

/// Initials badge; white badges get a dark outline
#[component]
pub fn Avatar(
    #[prop(into)] initials: String,
    #[prop(into)] color: String,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let mut classes = String::from("avatar");
    if color.eq_ignore_ascii_case(join_core::domain::USER_COLOR) {
        classes.push_str(" avatar-light");
    }
    if let Some(extra) = class {
        classes.push(' ');
        classes.push_str(&extra);
    }

    view! {
        <span class=classes style=format!("background-color: {};", color)>{initials}</span>
    }
}
