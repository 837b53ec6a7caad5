use log::{error, info};

/// Shows blocking, user-dismissible notifications.
pub trait Notifier {
    fn error(&self, title: &str, message: &str);
    fn info(&self, title: &str, message: &str);
}

/// Native message boxes. Each call blocks until the user dismisses the box.
pub struct MessageBoxNotifier;

impl Notifier for MessageBoxNotifier {
    fn error(&self, title: &str, message: &str) {
        error!("{}: {}", title, message);
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    fn info(&self, title: &str, message: &str) {
        info!("{}: {}", title, message);
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}
