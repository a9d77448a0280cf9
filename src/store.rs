//! Saving categories and entries, reporting the outcome as a display string.

use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    dates::construct_budget_date,
    db::{create_category, create_entry, get_categories, get_category, get_entries},
    view_state::ButtonType,
};

/// The outcome of a save that succeeded. Any other outcome is an error message
/// meant to be shown to the user.
pub const SUCCESS: &str = "success";

/// The message shown for errors that the user cannot fix.
const UNEXPECTED_ERROR_MESSAGE: &str =
    "Something went wrong, check the server logs for more details.";

/// Persists the categories and entries created on the budget page.
///
/// Saves never fail with an error value: they resolve to [SUCCESS] or to a
/// message that can be shown as-is.
pub trait BudgetStore {
    /// Save a category titled `title` for the month of `date`.
    fn save_category(
        &self,
        button_type: &ButtonType,
        date: Date,
        title: &str,
    ) -> impl Future<Output = String> + Send;

    /// Save an income or expense entry in the category `category_title`.
    fn save_income_and_expense(
        &self,
        button_type: &ButtonType,
        date: Date,
        title: &str,
        amount: Option<f64>,
        category_title: Option<&str>,
    ) -> impl Future<Output = String> + Send;
}

/// A [BudgetStore] backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBudgetStore {
    db_connection: Arc<Mutex<Connection>>,
}

impl SqliteBudgetStore {
    /// Create a store that shares `db_connection`.
    ///
    /// The database should already be initialized with [crate::initialize_db].
    pub fn new(db_connection: Arc<Mutex<Connection>>) -> Self {
        Self { db_connection }
    }

    fn insert_category(
        &self,
        button_type: &ButtonType,
        date: Date,
        title: &str,
    ) -> Result<(), Error> {
        let title = validate_title(title)?;
        let kind = button_type.component_id();

        let connection = self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        let category = create_category(title, kind, date, &connection)?;
        let budget_date = construct_budget_date(date);
        let category_count = get_categories(budget_date, &connection)?.len();
        tracing::info!(
            "Created {kind} category \"{}\" for {budget_date} ({category_count} categories this month)",
            category.title
        );

        Ok(())
    }

    fn insert_entry(
        &self,
        button_type: &ButtonType,
        date: Date,
        title: &str,
        amount: Option<f64>,
        category_title: Option<&str>,
    ) -> Result<(), Error> {
        let title = validate_title(title)?;
        let category_title = category_title
            .map(str::trim)
            .filter(|category_title| !category_title.is_empty())
            .ok_or(Error::MissingCategory)?;
        let amount = amount.ok_or(Error::MissingAmount)?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let kind = button_type.component_id();
        let budget_date = construct_budget_date(date);

        let connection = self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        let category = match get_category(category_title, kind, budget_date, &connection) {
            Ok(category) => category,
            Err(Error::NotFound) => {
                return Err(Error::CategoryNotFound(
                    category_title.to_owned(),
                    budget_date,
                ));
            }
            Err(error) => return Err(error),
        };

        create_entry(category.id, kind, title, amount, date, &connection)?;
        let category_total: f64 = get_entries(category.id, &connection)?
            .iter()
            .map(|entry| entry.amount)
            .sum();
        tracing::info!(
            "Added {kind} entry \"{title}\" to \"{}\", category total is now {category_total}",
            category.title
        );

        Ok(())
    }
}

impl BudgetStore for SqliteBudgetStore {
    async fn save_category(&self, button_type: &ButtonType, date: Date, title: &str) -> String {
        into_outcome(self.insert_category(button_type, date, title))
    }

    async fn save_income_and_expense(
        &self,
        button_type: &ButtonType,
        date: Date,
        title: &str,
        amount: Option<f64>,
        category_title: Option<&str>,
    ) -> String {
        into_outcome(self.insert_entry(button_type, date, title, amount, category_title))
    }
}

fn validate_title(title: &str) -> Result<&str, Error> {
    let title = title.trim();

    if title.is_empty() {
        Err(Error::EmptyTitle)
    } else {
        Ok(title)
    }
}

fn into_outcome(result: Result<(), Error>) -> String {
    match result {
        Ok(()) => SUCCESS.to_owned(),
        Err(error) if error.is_user_facing() => {
            tracing::warn!("Rejected save: {error}");
            error.to_string()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while saving: {error}");
            UNEXPECTED_ERROR_MESSAGE.to_owned()
        }
    }
}
