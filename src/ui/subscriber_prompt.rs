use eframe::egui;

use crate::ui::DialogResult;

/// Asks for the subscriber id of a subscriber report.
pub struct SubscriberPrompt {
    subscriber_id: i32,
}

impl SubscriberPrompt {
    pub fn new() -> Self {
        Self { subscriber_id: 0 }
    }

    /// Current value. The input widget keeps it within `0..=i32::MAX`.
    pub fn subscriber_id(&self) -> i32 {
        self.subscriber_id
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<DialogResult<i32>> {
        let mut result = None;
        let mut open = true;

        egui::Window::new("Subscriber Report")
            .id(egui::Id::new("subscriber_prompt"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Enter Subscriber ID:");
                    ui.add(
                        egui::DragValue::new(&mut self.subscriber_id)
                            .clamp_range(0..=i32::MAX)
                            .speed(1.0)
                    );
                });

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        result = Some(DialogResult::Accepted(self.subscriber_id()));
                    }
                    if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        result = Some(DialogResult::Rejected);
                    }
                });
            });

        if !open {
            result = Some(DialogResult::Rejected);
        }
        result
    }
}
