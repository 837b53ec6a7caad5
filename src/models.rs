/// Column labels of the report grid, in query order.
pub const REPORT_COLUMNS: [&str; 5] = ["Date", "Reading", "Subscriber ID", "Fullname", "Email"];

/// Date format used for the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored row of the `readings` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub id: i64,
    pub date: String,
    pub reading: f64,
    pub subscriber_id: i64,
    pub surname: String,
    pub email: String,
}

/// Field values collected by the add dialog, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub date: String,
    pub reading: f64,
    pub subscriber_id: i32,
    pub surname: String,
    pub email: String,
}

impl NewReading {
    /// The row as stored, once the store has assigned `id`.
    pub fn into_reading(self, id: i64) -> Reading {
        Reading {
            id,
            date: self.date,
            reading: self.reading,
            subscriber_id: i64::from(self.subscriber_id),
            surname: self.surname,
            email: self.email,
        }
    }
}

/// One line of a report. Same columns as `Reading`, minus the id.
///
/// Text columns read NULL as an empty string; numeric columns keep NULL as
/// `None` so it renders as a blank cell rather than zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub date: String,
    pub reading: Option<f64>,
    pub subscriber_id: Option<i64>,
    pub surname: String,
    pub email: String,
}

impl ReportRow {
    /// Cell texts in `REPORT_COLUMNS` order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.date.clone(),
            self.reading.map(|value| value.to_string()).unwrap_or_default(),
            self.subscriber_id.map(|id| id.to_string()).unwrap_or_default(),
            self.surname.clone(),
            self.email.clone(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFilter {
    All,
    Subscriber(i32),
}

impl ReportFilter {
    pub fn title(&self) -> &'static str {
        match self {
            ReportFilter::All => "Full Report",
            ReportFilter::Subscriber(_) => "Subscriber Report",
        }
    }
}

impl std::fmt::Display for ReportFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFilter::All => write!(f, "all subscribers"),
            ReportFilter::Subscriber(id) => write!(f, "subscriber {}", id),
        }
    }
}
