use eframe::egui;
use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::models::{DATE_FORMAT, NewReading};
use crate::parse::{ParseError, ParsePolicy};
use crate::ui::DialogResult;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Invalid date {0:?}. Please use YYYY-MM-DD")]
    Date(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Form state of the "Add Reading" dialog.
pub struct AddDialog {
    policy: ParsePolicy,
    has_set_focus: bool,
    error: Option<String>,
    pub date_input: String,
    pub reading_input: String,
    pub subscriber_id_input: String,
    pub surname_input: String,
    pub email_input: String,
}

impl AddDialog {
    /// A blank form with the date set to today.
    pub fn new(policy: ParsePolicy) -> Self {
        Self {
            policy,
            has_set_focus: false,
            error: None,
            date_input: Local::now().date_naive().format(DATE_FORMAT).to_string(),
            reading_input: String::new(),
            subscriber_id_input: String::new(),
            surname_input: String::new(),
            email_input: String::new(),
        }
    }

    /// Date normalized to `yyyy-MM-dd`.
    pub fn date(&self) -> Result<String, FormError> {
        NaiveDate::parse_from_str(self.date_input.trim(), DATE_FORMAT)
            .map(|date| date.format(DATE_FORMAT).to_string())
            .map_err(|_| FormError::Date(self.date_input.clone()))
    }

    pub fn reading(&self) -> Result<f64, FormError> {
        Ok(self.policy.parse_reading(&self.reading_input)?)
    }

    pub fn subscriber_id(&self) -> Result<i32, FormError> {
        Ok(self.policy.parse_subscriber_id(&self.subscriber_id_input)?)
    }

    /// Everything the caller needs to persist the reading.
    pub fn collect(&self) -> Result<NewReading, FormError> {
        Ok(NewReading {
            date: self.date()?,
            reading: self.reading()?,
            subscriber_id: self.subscriber_id()?,
            surname: self.surname_input.clone(),
            email: self.email_input.clone(),
        })
    }

    /// Draws the dialog. Returns `Some` once the user confirmed or cancelled.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<DialogResult<NewReading>> {
        let mut result = None;
        let mut open = true;

        egui::Window::new("Add Reading")
            .id(egui::Id::new("add_reading_dialog"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("add_reading_form")
                    .num_columns(2)
                    .spacing([10.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Date:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.date_input)
                                .hint_text("YYYY-MM-DD")
                                .desired_width(100.0)
                        );
                        ui.end_row();

                        ui.label("Reading:");
                        let reading_response = ui.text_edit_singleline(&mut self.reading_input);
                        if !self.has_set_focus {
                            reading_response.request_focus();
                            self.has_set_focus = true;
                        }
                        ui.end_row();

                        ui.label("Subscriber ID:");
                        ui.text_edit_singleline(&mut self.subscriber_id_input);
                        ui.end_row();

                        ui.label("Surname:");
                        ui.text_edit_singleline(&mut self.surname_input);
                        ui.end_row();

                        ui.label("Email:");
                        ui.text_edit_singleline(&mut self.email_input);
                        ui.end_row();
                    });

                if let Some(error) = &self.error {
                    ui.label(egui::RichText::new(error).color(egui::Color32::RED));
                }

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        match self.collect() {
                            Ok(reading) => result = Some(DialogResult::Accepted(reading)),
                            Err(e) => self.error = Some(e.to_string()),
                        }
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
