use std::rc::Rc;

use eframe::egui;
use log::info;

mod app;
mod db;
mod logging;
mod models;
mod notify;
mod parse;
mod settings;
mod ui;

use app::{APP_TITLE, GasMeterApp, bootstrap_store};
use notify::{MessageBoxNotifier, Notifier};
use settings::AppSettings;

fn main() -> Result<(), eframe::Error> {
    let settings = AppSettings::load_or_default();

    // Keep the handle alive for the whole run, dropping it stops file logging
    let _logger = match logging::init_logging(&settings.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logger initialization failed: {}", e);
            None
        }
    };
    info!("Starting {}", APP_TITLE);

    let notifier: Rc<dyn Notifier> = Rc::new(MessageBoxNotifier);
    let store = bootstrap_store(&settings.database_path, notifier.as_ref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(settings.window_size),
        ..Default::default()
    };

    let app = GasMeterApp::new(store, notifier, settings);
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|_cc| Box::new(app)),
    )
}
