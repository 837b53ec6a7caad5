use std::path::Path;

use log::info;
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::models::{NewReading, Reading, ReportFilter, ReportRow};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    Open(#[source] rusqlite::Error),
    #[error("Failed to create table: {0}")]
    Schema(#[source] rusqlite::Error),
    #[error("Failed to add reading: {0}")]
    Insert(#[source] rusqlite::Error),
    #[error("Failed to fetch data: {0}")]
    Query(#[source] rusqlite::Error),
    #[error("Database is not available")]
    Unavailable,
}

/// Everything the application needs from the readings table.
pub trait ReadingStore {
    /// Inserts one row and returns it with its assigned id.
    fn add_reading(&self, reading: &NewReading) -> Result<Reading, StoreError>;

    /// Rows matching `filter`, ascending by date.
    fn report(&self, filter: ReportFilter) -> Result<Vec<ReportRow>, StoreError>;

    fn count_readings(&self) -> Result<i64, StoreError>;
}

const CREATE_READINGS: &str = "CREATE TABLE IF NOT EXISTS readings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT,
    reading REAL,
    subscriber_id INTEGER,
    surname TEXT,
    email TEXT
)";

const SELECT_ALL: &str =
    "SELECT date, reading, subscriber_id, surname, email FROM readings ORDER BY date";

const SELECT_SUBSCRIBER: &str = "SELECT date, reading, subscriber_id, surname, email FROM readings
     WHERE subscriber_id = ?1 ORDER BY date";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if absent) the database file. The schema is not touched;
    /// call `initialize` afterwards.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(StoreError::Open)?;
        info!("Opened database {}", path.display());
        Ok(Database { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::Open)?;
        Ok(Database { conn })
    }

    /// Creates the readings table if it doesn't exist.
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.conn
            .execute(CREATE_READINGS, [])
            .map_err(StoreError::Schema)?;
        Ok(())
    }
}

impl ReadingStore for Database {
    fn add_reading(&self, reading: &NewReading) -> Result<Reading, StoreError> {
        self.conn
            .execute(
                "INSERT INTO readings (date, reading, subscriber_id, surname, email)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    reading.date,
                    reading.reading,
                    reading.subscriber_id,
                    reading.surname,
                    reading.email
                ],
            )
            .map_err(StoreError::Insert)?;

        let id = self.conn.last_insert_rowid();
        Ok(reading.clone().into_reading(id))
    }

    fn report(&self, filter: ReportFilter) -> Result<Vec<ReportRow>, StoreError> {
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<ReportRow> {
            // Rows written by other tools may hold NULLs in any column
            Ok(ReportRow {
                date: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                reading: row.get(1)?,
                subscriber_id: row.get(2)?,
                surname: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                email: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            })
        };

        let rows = match filter {
            ReportFilter::All => {
                let mut stmt = self.conn.prepare(SELECT_ALL).map_err(StoreError::Query)?;
                let rows = stmt.query_map([], map_row).map_err(StoreError::Query)?;
                rows.collect::<Result<Vec<_>, _>>()
            }
            ReportFilter::Subscriber(id) => {
                let mut stmt = self
                    .conn
                    .prepare(SELECT_SUBSCRIBER)
                    .map_err(StoreError::Query)?;
                let rows = stmt.query_map(params![id], map_row).map_err(StoreError::Query)?;
                rows.collect::<Result<Vec<_>, _>>()
            }
        };

        rows.map_err(StoreError::Query)
    }

    fn count_readings(&self) -> Result<i64, StoreError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))
            .map_err(StoreError::Query)
    }
}
