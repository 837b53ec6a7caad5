use eframe::egui;

use crate::db::{ReadingStore, StoreError};
use crate::models::{REPORT_COLUMNS, ReportFilter, ReportRow};

pub const NO_DATA_TEXT: &str = "No data available.";

/// A read-only listing of readings, loaded once when the dialog opens.
pub struct ReportDialog {
    filter: ReportFilter,
    rows: Vec<ReportRow>,
}

impl ReportDialog {
    pub fn load(store: &dyn ReadingStore, filter: ReportFilter) -> Result<Self, StoreError> {
        let rows = store.report(filter)?;
        Ok(Self { filter, rows })
    }

    pub fn filter(&self) -> ReportFilter {
        self.filter
    }

    pub fn title(&self) -> &'static str {
        self.filter.title()
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Text shown under the grid, if any.
    pub fn empty_notice(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_DATA_TEXT)
    }

    /// Draws the dialog. Returns true once it has been closed.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        let mut open = true;
        let mut closed = false;

        egui::Window::new(self.title())
            .id(egui::Id::new("report_dialog"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_size([600.0, 400.0])
            .show(ctx, |ui| {
                egui::ScrollArea::both().max_height(320.0).show(ui, |ui| {
                    egui::Grid::new("report_grid")
                        .num_columns(REPORT_COLUMNS.len())
                        .striped(true)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            for column in REPORT_COLUMNS {
                                ui.strong(column);
                            }
                            ui.end_row();

                            for row in &self.rows {
                                for cell in row.cells() {
                                    ui.label(cell);
                                }
                                ui.end_row();
                            }
                        });
                });

                if let Some(notice) = self.empty_notice() {
                    ui.label(notice);
                }

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Close").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        closed = true;
                    }
                });
            });

        closed || !open
    }
}
