//! Summary Page Component
//!
//! Dashboard tiles with task counts and the time-of-day greeting.

use join_core::services::greeting;
use join_core::{Status, Summary};
use leptos::prelude::*;

use crate::commands;
use crate::context::{AppContext, Page};
use crate::session;
use crate::store::{use_app_store, AppStateStoreFields};

/// How long the greeting overlay stays after login
const GREETING_MS: u32 = 1800;

#[component]
pub fn SummaryPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let summary = Memo::new(move |_| store.tasks().with(|tasks| Summary::compute(tasks)));
    let salutation = greeting(commands::current_hour());
    let user_name = move || ctx.active_user.with(|u| u.as_ref().filter(|u| !u.is_guest()).map(|u| u.name.clone()));

    // Greet once per login
    let (show_greeting, set_show_greeting) = signal(!session::greeting_shown());
    if show_greeting.get_untracked() {
        session::set_greeting_shown();
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(GREETING_MS).await;
            set_show_greeting.set(false);
        });
    }

    let greeting_line = move || match user_name() {
        Some(name) => view! {
            <span class="greeting-text">{format!("{},", salutation)}</span>
            <span class="greeting-name">{name}</span>
        }.into_any(),
        None => view! { <span class="greeting-text">{format!("{}!", salutation)}</span> }.into_any(),
    };

    let deadline = move || {
        summary.with(|s| s.upcoming_deadline)
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| "No upcoming deadline".to_string())
    };

    let to_board = move |_| ctx.navigate(Page::Board);

    view! {
        <Show when=move || show_greeting.get()>
            <div class="greeting-overlay">{greeting_line}</div>
        </Show>

        <div class="summary-page">
            <div class="summary-heading">
                <h1>"Join 360"</h1>
                <span class="summary-subtitle">"Key Metrics at a Glance"</span>
            </div>

            <div class="summary-layout">
                <div class="summary-tiles">
                    <div class="tile-row">
                        <StatusTile status=Status::Todo summary=summary />
                        <StatusTile status=Status::Done summary=summary />
                    </div>

                    <button class="tile tile-wide" on:click=to_board>
                        <div class="tile-urgent">
                            <span class="tile-count">{move || summary.with(|s| s.urgent)}</span>
                            <span class="tile-label">"Urgent"</span>
                        </div>
                        <div class="tile-divider"></div>
                        <div class="tile-deadline">
                            <span class="deadline-date">{deadline}</span>
                            <span class="tile-label">"Upcoming Deadline"</span>
                        </div>
                    </button>

                    <div class="tile-row">
                        <button class="tile" on:click=to_board>
                            <span class="tile-count">{move || summary.with(Summary::on_board)}</span>
                            <span class="tile-label">"Tasks in Board"</span>
                        </button>
                        <StatusTile status=Status::InProgress summary=summary />
                        <StatusTile status=Status::AwaitFeedback summary=summary />
                    </div>
                </div>

                <div class="summary-greeting">{greeting_line}</div>
            </div>
        </div>
    }
}

/// Count of one board column; clicking opens the board
#[component]
fn StatusTile(status: Status, summary: Memo<Summary>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <button class="tile" on:click=move |_| ctx.navigate(Page::Board)>
            <span class="tile-count">{move || summary.with(|s| s.count(status))}</span>
            <span class="tile-label">{status.label()}</span>
        </button>
    }
}
