//! UI Components
//!
//! Leptos components for the login screen and the dashboard.

mod dashboard;
mod error_banner;
mod login_page;
mod new_task_modal;
mod subtask_row;
mod task_card;
mod title_bar;

pub use dashboard::Dashboard;
pub use error_banner::ErrorBanner;
pub use login_page::LoginPage;
pub use new_task_modal::NewTaskModal;
pub use subtask_row::SubtaskRow;
pub use task_card::TaskCard;
pub use title_bar::TitleBar;
