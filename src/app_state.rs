//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{BudgetPage, Error, db::initialize};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// The budget page that form submissions are rendered into.
    ///
    /// The lock is held for the whole submission, including the save, so that
    /// submissions are applied to the page one at a time.
    pub budget_page: Arc<tokio::sync::Mutex<BudgetPage>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection and an empty budget page.
    ///
    /// This function will initialize the database by adding the budget tables.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, local_timezone: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(db_connection)),
            budget_page: Arc::new(tokio::sync::Mutex::new(BudgetPage::default())),
        })
    }
}
