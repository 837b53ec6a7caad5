use std::path::Path;
use std::rc::Rc;

use eframe::egui;
use log::{info, warn};

use crate::db::{Database, ReadingStore, StoreError};
use crate::models::{NewReading, ReportFilter};
use crate::notify::Notifier;
use crate::settings::AppSettings;
use crate::ui::{AddDialog, DialogResult, ReportDialog, SubscriberPrompt, show_main_panel};

pub const APP_TITLE: &str = "Gas Meter Accounting";
const ABOUT_TEXT: &str = "Gas Meter Accounting Program";

/// The one dialog that may be open at a time.
pub enum ActiveDialog {
    AddReading(AddDialog),
    SubscriberPrompt(SubscriberPrompt),
    Report(ReportDialog),
}

/// Opens the database and makes sure the readings table exists.
///
/// Failures are shown to the user but never abort startup: without a file the
/// app runs with no store, and a failed CREATE TABLE still hands back the
/// connection.
pub fn bootstrap_store(path: &Path, notifier: &dyn Notifier) -> Option<Box<dyn ReadingStore>> {
    let db = match Database::open(path) {
        Ok(db) => db,
        Err(e) => {
            notifier.error("Error", &e.to_string());
            return None;
        }
    };

    if let Err(e) = db.initialize() {
        notifier.error("Error", &e.to_string());
    }
    Some(Box::new(db))
}

pub struct GasMeterApp {
    store: Option<Box<dyn ReadingStore>>,
    notifier: Rc<dyn Notifier>,
    settings: AppSettings,
    active_dialog: Option<ActiveDialog>,
    reading_count: Option<i64>,
}

impl GasMeterApp {
    pub fn new(
        store: Option<Box<dyn ReadingStore>>,
        notifier: Rc<dyn Notifier>,
        settings: AppSettings,
    ) -> Self {
        let mut app = Self {
            store,
            notifier,
            settings,
            active_dialog: None,
            reading_count: None,
        };
        app.refresh_reading_count();
        app
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn reading_count(&self) -> Option<i64> {
        self.reading_count
    }

    pub fn is_dialog_open(&self) -> bool {
        self.active_dialog.is_some()
    }

    fn store(&self) -> Result<&dyn ReadingStore, StoreError> {
        self.store.as_deref().ok_or(StoreError::Unavailable)
    }

    fn refresh_reading_count(&mut self) {
        self.reading_count = match self.store().and_then(|store| store.count_readings()) {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("Could not count readings: {}", e);
                None
            }
        };
    }

    pub fn open_add_dialog(&mut self) {
        self.active_dialog = Some(ActiveDialog::AddReading(AddDialog::new(self.settings.parse_policy)));
    }

    pub fn finish_add_dialog(&mut self, result: DialogResult<NewReading>) {
        let DialogResult::Accepted(reading) = result else {
            return;
        };

        match self.store().and_then(|store| store.add_reading(&reading)) {
            Ok(stored) => {
                info!("Added reading {} for subscriber {}", stored.id, stored.subscriber_id);
                self.refresh_reading_count();
                self.notifier.info("Success", "Reading added successfully.");
            }
            Err(StoreError::Unavailable) => {
                self.notifier.error("Error", &format!("Failed to add reading: {}", StoreError::Unavailable));
            }
            Err(e) => self.notifier.error("Error", &e.to_string()),
        }
    }

    pub fn open_subscriber_prompt(&mut self) {
        self.active_dialog = Some(ActiveDialog::SubscriberPrompt(SubscriberPrompt::new()));
    }

    pub fn finish_subscriber_prompt(&mut self, result: DialogResult<i32>) {
        if let DialogResult::Accepted(subscriber_id) = result {
            self.open_report(ReportFilter::Subscriber(subscriber_id));
        }
    }

    /// Runs the report query; the dialog only opens when the query succeeded.
    pub fn open_report(&mut self, filter: ReportFilter) {
        match self.store().and_then(|store| ReportDialog::load(store, filter)) {
            Ok(dialog) => {
                info!("Opened report for {} with {} rows", dialog.filter(), dialog.rows().len());
                self.active_dialog = Some(ActiveDialog::Report(dialog));
            }
            Err(StoreError::Unavailable) => {
                self.notifier.error("Error", &format!("Failed to fetch data: {}", StoreError::Unavailable));
            }
            Err(e) => self.notifier.error("Error", &e.to_string()),
        }
    }

    pub fn show_about(&self) {
        self.notifier.info("About", ABOUT_TEXT);
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Menu", |ui| {
                if ui.button("Add Reading").clicked() {
                    ui.close_menu();
                    self.open_add_dialog();
                }
                if ui.button("Subscriber Report").clicked() {
                    ui.close_menu();
                    self.open_subscriber_prompt();
                }
                if ui.button("Full Report").clicked() {
                    ui.close_menu();
                    self.open_report(ReportFilter::All);
                }
                if ui.button("About").clicked() {
                    ui.close_menu();
                    self.show_about();
                }
            });
        });
    }

    fn show_active_dialog(&mut self, ctx: &egui::Context) {
        // Take the dialog out so its result can be handed back to `self`
        let Some(dialog) = self.active_dialog.take() else {
            return;
        };

        match dialog {
            ActiveDialog::AddReading(mut dialog) => match dialog.show(ctx) {
                Some(result) => self.finish_add_dialog(result),
                None => self.active_dialog = Some(ActiveDialog::AddReading(dialog)),
            },
            ActiveDialog::SubscriberPrompt(mut prompt) => match prompt.show(ctx) {
                Some(result) => self.finish_subscriber_prompt(result),
                None => self.active_dialog = Some(ActiveDialog::SubscriberPrompt(prompt)),
            },
            ActiveDialog::Report(mut report) => {
                if !report.show(ctx) {
                    self.active_dialog = Some(ActiveDialog::Report(report));
                }
            }
        }
    }
}

impl eframe::App for GasMeterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.is_dialog_open();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| self.show_menu(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| show_main_panel(ui, self));
        });

        self.show_active_dialog(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Reading, ReportRow};
    use crate::notify::testing::{Notice, RecordingNotifier};

    /// A store whose every statement fails.
    struct FailingStore;

    impl ReadingStore for FailingStore {
        fn add_reading(&self, _reading: &NewReading) -> Result<Reading, StoreError> {
            Err(StoreError::Insert(rusqlite::Error::InvalidQuery))
        }

        fn report(&self, _filter: ReportFilter) -> Result<Vec<ReportRow>, StoreError> {
            Err(StoreError::Query(rusqlite::Error::InvalidQuery))
        }

        fn count_readings(&self) -> Result<i64, StoreError> {
            Err(StoreError::Query(rusqlite::Error::InvalidQuery))
        }
    }

    fn memory_store() -> Box<dyn ReadingStore> {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        Box::new(db)
    }

    fn app_with(store: Option<Box<dyn ReadingStore>>) -> (GasMeterApp, Rc<RecordingNotifier>) {
        let notifier = Rc::new(RecordingNotifier::default());
        let app = GasMeterApp::new(store, notifier.clone(), AppSettings::default());
        (app, notifier)
    }

    fn submit(app: &mut GasMeterApp, date: &str, reading: &str, subscriber_id: &str) {
        app.open_add_dialog();
        let Some(ActiveDialog::AddReading(mut dialog)) = app.active_dialog.take() else {
            panic!("add dialog should be open");
        };
        dialog.date_input = date.to_string();
        dialog.reading_input = reading.to_string();
        dialog.subscriber_id_input = subscriber_id.to_string();
        dialog.surname_input = "Doe".to_string();
        dialog.email_input = "doe@example.com".to_string();
        let reading = dialog.collect().unwrap();
        app.finish_add_dialog(DialogResult::Accepted(reading));
    }

    fn open_report_rows(app: &mut GasMeterApp, filter: ReportFilter) -> Vec<ReportRow> {
        app.open_report(filter);
        match app.active_dialog.take() {
            Some(ActiveDialog::Report(report)) => report.rows().to_vec(),
            _ => panic!("report dialog should be open"),
        }
    }

    #[test]
    fn test_add_then_full_report_shows_the_row() {
        let (mut app, notifier) = app_with(Some(memory_store()));
        assert_eq!(app.reading_count(), Some(0));

        submit(&mut app, "2024-01-05", "123.4", "7");

        assert_eq!(notifier.notices(), vec![Notice::Info {
            title: "Success".to_string(),
            message: "Reading added successfully.".to_string(),
        }]);
        assert_eq!(app.reading_count(), Some(1));

        let rows = open_report_rows(&mut app, ReportFilter::All);
        assert_eq!(rows, vec![ReportRow {
            date: "2024-01-05".to_string(),
            reading: Some(123.4),
            subscriber_id: Some(7),
            surname: "Doe".to_string(),
            email: "doe@example.com".to_string(),
        }]);
    }

    #[test]
    fn test_cancelled_add_inserts_nothing() {
        let (mut app, notifier) = app_with(Some(memory_store()));
        app.open_add_dialog();
        app.active_dialog = None;
        app.finish_add_dialog(DialogResult::Rejected);

        assert!(notifier.notices().is_empty());
        assert_eq!(app.store().unwrap().count_readings().unwrap(), 0);
    }

    #[test]
    fn test_non_numeric_input_is_stored_as_zero() {
        let (mut app, _notifier) = app_with(Some(memory_store()));
        submit(&mut app, "2024-01-05", "not a number", "x");

        let rows = open_report_rows(&mut app, ReportFilter::All);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reading, Some(0.0));
        assert_eq!(rows[0].subscriber_id, Some(0));
    }

    #[test]
    fn test_subscriber_report_filters_by_prompted_id() {
        let (mut app, _notifier) = app_with(Some(memory_store()));
        submit(&mut app, "2024-03-01", "3", "7");
        submit(&mut app, "2024-01-01", "1", "8");
        submit(&mut app, "2024-02-01", "2", "7");

        app.open_subscriber_prompt();
        app.active_dialog = None;
        app.finish_subscriber_prompt(DialogResult::Accepted(7));

        let Some(ActiveDialog::Report(report)) = app.active_dialog.take() else {
            panic!("report dialog should be open");
        };
        assert_eq!(report.title(), "Subscriber Report");
        let dates: Vec<_> = report.rows().iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2024-02-01", "2024-03-01"]);
        assert!(report.rows().iter().all(|r| r.subscriber_id == Some(7)));
    }

    #[test]
    fn test_subscriber_report_without_matches_is_empty() {
        let (mut app, notifier) = app_with(Some(memory_store()));
        submit(&mut app, "2024-03-01", "3", "7");

        app.finish_subscriber_prompt(DialogResult::Accepted(42));
        let Some(ActiveDialog::Report(report)) = app.active_dialog.take() else {
            panic!("report dialog should be open");
        };
        assert!(report.is_empty());
        assert!(notifier.errors().is_empty());
    }

    #[test]
    fn test_cancelled_prompt_opens_nothing() {
        let (mut app, _notifier) = app_with(Some(memory_store()));
        app.finish_subscriber_prompt(DialogResult::Rejected);
        assert!(!app.is_dialog_open());
    }

    #[test]
    fn test_failed_query_reports_error_and_skips_dialog() {
        let (mut app, notifier) = app_with(Some(Box::new(FailingStore)));
        app.open_report(ReportFilter::All);

        assert!(!app.is_dialog_open());
        let errors = notifier.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to fetch data: "));
    }

    #[test]
    fn test_failed_insert_reports_error() {
        let (mut app, notifier) = app_with(Some(Box::new(FailingStore)));
        let reading = NewReading {
            date: "2024-01-05".to_string(),
            reading: 1.0,
            subscriber_id: 1,
            surname: String::new(),
            email: String::new(),
        };
        app.finish_add_dialog(DialogResult::Accepted(reading));

        let errors = notifier.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to add reading: "));
    }

    #[test]
    fn test_actions_without_store_report_unavailable() {
        let (mut app, notifier) = app_with(None);
        assert!(!app.has_store());
        assert_eq!(app.reading_count(), None);

        app.open_report(ReportFilter::All);
        submit(&mut app, "2024-01-05", "1", "1");

        assert_eq!(notifier.errors(), vec![
            "Failed to fetch data: Database is not available".to_string(),
            "Failed to add reading: Database is not available".to_string(),
        ]);
    }

    #[test]
    fn test_about_shows_program_name() {
        let (app, notifier) = app_with(None);
        app.show_about();
        assert_eq!(notifier.notices(), vec![Notice::Info {
            title: "About".to_string(),
            message: "Gas Meter Accounting Program".to_string(),
        }]);
    }

    #[test]
    fn test_bootstrap_creates_schema_in_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::default();
        let store = bootstrap_store(&dir.path().join("gas.db"), &notifier).unwrap();

        assert!(notifier.notices().is_empty());
        assert_eq!(store.count_readings().unwrap(), 0);
    }

    #[test]
    fn test_bootstrap_schema_failure_is_reported_and_keeps_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gas.db");
        std::fs::write(&path, "this is not an sqlite file\n".repeat(64)).unwrap();

        let notifier = RecordingNotifier::default();
        let store = bootstrap_store(&path, &notifier);

        assert!(store.is_some());
        let errors = notifier.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to create table: "));
    }

    #[test]
    fn test_bootstrap_open_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::default();
        let store = bootstrap_store(&dir.path().join("missing").join("gas.db"), &notifier);

        assert!(store.is_none());
        let errors = notifier.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to open database: "));
    }
}
