pub mod add_dialog;
pub mod main_panel;
pub mod report_dialog;
pub mod subscriber_prompt;

pub use add_dialog::AddDialog;
pub use main_panel::show_main_panel;
pub use report_dialog::ReportDialog;
pub use subscriber_prompt::SubscriberPrompt;

/// How a modal dialog ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResult<T> {
    Accepted(T),
    Rejected,
}
