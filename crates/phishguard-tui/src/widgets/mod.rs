//! Custom widget components

mod alert;
mod banner;
mod confirm_dialog;
mod header;
mod history_list;
pub mod modal_overlay;
mod result_modal;
mod status_bar;
mod tabs;
mod text_input;

pub use alert::AlertDialog;
pub use banner::NotificationBanner;
pub use confirm_dialog::ConfirmDialog;
pub use header::MainHeader;
pub use history_list::{truncate, HistoryList};
pub use result_modal::ScanResultModal;
pub use status_bar::StatusBar;
pub use tabs::ViewTabs;
pub use text_input::TextInput;
