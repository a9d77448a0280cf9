//! Monthly Budget is a web app for planning a monthly budget.
//!
//! Income and expense categories are created for a budget month, and income
//! and expense entries are added to those categories. Each form submission is
//! saved to a SQLite database and the outcome is rendered into the budget page,
//! which is served as HTML and updated in place with htmx.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod budget_endpoints;
mod budget_page;
mod components;
mod dates;
mod db;
mod endpoints;
mod html;
mod logging;
mod not_found;
mod render;
mod routing;
mod store;
mod timezone;
mod view_elements;
mod view_state;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use budget_page::BudgetPage;
pub use dates::{BudgetDate, DatePart, construct_budget_date, construct_date, format_date, valid_date};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use render::{
    CategoryRenderCoordinator, IncomeExpenseRenderCoordinator, RENDER_CATEGORY,
    RENDER_INCOME_AND_EXPENSE, RenderOutcome, RenderValidator, SUCCESS_MESSAGE,
};
pub use routing::build_router;
pub use store::{BudgetStore, SUCCESS, SqliteBudgetStore};
pub use view_elements::{Container, InsertPosition, Node, NodeKind, ViewElements};
pub use view_state::{ButtonType, ComponentId, ViewState};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// The display strings of the validation variants are shown to the user as-is
/// when a save is rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty or whitespace-only title was used for a category or entry.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// An entry was submitted without naming the category it belongs to.
    #[error("Choose a category for this entry")]
    MissingCategory,

    /// An entry was submitted without an amount.
    #[error("Amount is required")]
    MissingAmount,

    /// An entry amount was zero, negative or not a finite number.
    #[error("Amount must be a number greater than zero, got {0}")]
    InvalidAmount(f64),

    /// A category with the same title and kind already exists in the budget month.
    #[error("The category \"{0}\" already exists for {1}")]
    DuplicateCategory(String, BudgetDate),

    /// No category with the given title and kind exists in the entry's budget month.
    #[error("Could not find the category \"{0}\" for {1}")]
    CategoryNotFound(String, BudgetDate),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// Whether the error message is meant for the person filling in the form.
    ///
    /// Other errors are logged and replaced with a generic message.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Error::NotFound | Error::SqlError(_) | Error::DatabaseLockError
        )
    }
}
