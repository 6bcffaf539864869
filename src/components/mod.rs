//! UI Components
//!
//! Pages and the reusable pieces they are built from.

mod avatar;
mod board_page;
mod contact_dialog;
mod contacts_page;
mod delete_confirm_button;
mod field_message;
mod login_page;
mod nav_bar;
mod signup_page;
mod summary_page;
mod task_card;
mod task_detail;
mod task_form;

pub use avatar::Avatar;
pub use board_page::BoardPage;
pub use contact_dialog::ContactDialog;
pub use contacts_page::ContactsPage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use field_message::FieldMessage;
pub use login_page::LoginPage;
pub use nav_bar::NavBar;
pub use signup_page::SignupPage;
pub use summary_page::SummaryPage;
pub use task_card::TaskCard;
pub use task_detail::TaskDetail;
pub use task_form::{AddTaskPage, TaskForm, TaskFormMode};
