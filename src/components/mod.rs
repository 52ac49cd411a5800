//! UI Components
//!
//! Reusable Leptos components.

mod data_table;
mod delete_confirm_button;
mod login_form;
mod project_board;
mod record_modal;
mod resource_page;
mod sidebar;
mod toast_host;

pub use data_table::{DataTable, ListToolbar, Pager};
pub use delete_confirm_button::DeleteConfirmButton;
pub use login_form::LoginForm;
pub use project_board::ProjectBoard;
pub use record_modal::{ModalMode, ModalState, RecordModal};
pub use resource_page::ResourcePage;
pub use sidebar::{Page, Sidebar};
pub use toast_host::ToastHost;
