//! Application Context
//!
//! Shared state provided via Leptos Context API.

use join_core::ActiveUser;
use leptos::prelude::*;

use crate::session;

/// Top-level views
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Signup,
    Summary,
    AddTask,
    Board,
    Contacts,
}

impl Page {
    /// Pages listed in the side navigation
    pub const NAV: [Page; 4] = [Page::Summary, Page::AddTask, Page::Board, Page::Contacts];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Login => "Log in",
            Page::Signup => "Sign up",
            Page::Summary => "Summary",
            Page::AddTask => "Add Task",
            Page::Board => "Board",
            Page::Contacts => "Contacts",
        }
    }

    pub fn needs_login(&self) -> bool {
        !matches!(self, Page::Login | Page::Signup)
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload tasks and contacts - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload tasks and contacts - write
    set_reload_trigger: WriteSignal<u32>,
    /// Signed-in user, `None` on the login pages - read
    pub active_user: ReadSignal<Option<ActiveUser>>,
    /// Signed-in user - write
    set_active_user: WriteSignal<Option<ActiveUser>>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Short confirmation shown at the bottom of the screen
    pub toast: ReadSignal<Option<String>>,
    set_toast: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        active_user: (ReadSignal<Option<ActiveUser>>, WriteSignal<Option<ActiveUser>>),
        page: (ReadSignal<Page>, WriteSignal<Page>),
        toast: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            active_user: active_user.0,
            set_active_user: active_user.1,
            page: page.0,
            set_page: page.1,
            toast: toast.0,
            set_toast: toast.1,
        }
    }

    /// Trigger a reload of tasks and contacts
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn navigate(&self, page: Page) {
        log::debug!("[nav] {:?}", page);
        self.set_page.set(page);
    }

    /// Session snapshot for a command; `None` when signed out
    pub fn session(&self) -> Option<ActiveUser> {
        self.active_user.get_untracked()
    }

    /// Store a changed session and persist it
    pub fn update_session(&self, active: ActiveUser) {
        session::save_active_user(&active);
        self.set_active_user.set(Some(active));
    }

    pub fn sign_in(&self, active: ActiveUser) {
        log::info!("[session] signed in as {}", active.name);
        self.update_session(active);
        self.navigate(Page::Summary);
        self.reload();
    }

    pub fn sign_out(&self) {
        session::clear_active_user();
        self.set_active_user.set(None);
        self.navigate(Page::Login);
    }

    /// Show a confirmation message for a moment
    pub fn notify(&self, message: impl Into<String>) {
        self.set_toast.set(Some(message.into()));
        let set_toast = self.set_toast;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(1500).await;
            set_toast.set(None);
        });
    }
}
