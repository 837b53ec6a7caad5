use eframe::egui;

use crate::app::GasMeterApp;

pub fn show_main_panel(ui: &mut egui::Ui, app: &GasMeterApp) {
    ui.heading("Gas Meter Accounting");
    ui.separator();

    if !app.has_store() {
        ui.label(egui::RichText::new("Database is not available").color(egui::Color32::RED));
        return;
    }

    match app.reading_count() {
        Some(count) => ui.label(format!("Readings stored: {}", count)),
        None => ui.label("Readings stored: unknown"),
    };
    ui.label("Use the menu to add a reading or open a report.");
}
