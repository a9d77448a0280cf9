//! The budget page and the endpoints for adding categories and entries to it.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Form, FormRejection};
use axum_htmx::HxRequest;

use crate::{
    AppState, BudgetPage, SqliteBudgetStore,
    budget_page::{budget_page_view, budget_view},
    render::{RENDER_CATEGORY, RENDER_INCOME_AND_EXPENSE},
    timezone::local_today,
    view_elements::ViewElements,
    view_state::ViewState,
};

/// The message shown when a submitted form cannot be deserialized.
pub const INVALID_FORM_MESSAGE: &str =
    "The form could not be read, check the values and try again.";

/// The state needed for the budget page and its endpoints.
#[derive(Debug, Clone)]
pub struct BudgetEndpointState {
    pub store: SqliteBudgetStore,
    pub budget_page: Arc<tokio::sync::Mutex<BudgetPage>>,
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: SqliteBudgetStore::new(state.db_connection.clone()),
            budget_page: state.budget_page.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the budget page, or only the budget section for htmx requests.
pub async fn get_budget_page(
    HxRequest(is_htmx_request): HxRequest,
    State(state): State<BudgetEndpointState>,
) -> Response {
    let today = local_today(&state.local_timezone);
    let page = state.budget_page.lock().await;

    if is_htmx_request {
        budget_view(&page, today).into_response()
    } else {
        budget_page_view(&page, today).into_response()
    }
}

/// Handle the category form, responding with the updated budget section.
pub async fn create_category_endpoint(
    State(state): State<BudgetEndpointState>,
    form: Result<Form<ViewState>, FormRejection>,
) -> Response {
    let today = local_today(&state.local_timezone);
    let mut page = state.budget_page.lock().await;

    let view_state = match form {
        Ok(Form(view_state)) => view_state,
        Err(rejection) => {
            tracing::warn!("Could not read category form: {rejection}");
            page.render_message(INVALID_FORM_MESSAGE);
            return budget_view(&page, today).into_response();
        }
    };

    if !view_state.button_type.is_category() {
        tracing::warn!(
            "Category form submitted with entry button {}",
            view_state.button_type
        );
    }

    let outcome = RENDER_CATEGORY
        .init(&view_state, &state.store, &mut *page)
        .await;
    tracing::debug!("Category form for {} gave {outcome:?}", view_state.button_type);

    budget_view(&page, today).into_response()
}

/// Handle the income and expense entry form, responding with the updated budget section.
pub async fn create_income_expense_endpoint(
    State(state): State<BudgetEndpointState>,
    form: Result<Form<ViewState>, FormRejection>,
) -> Response {
    let today = local_today(&state.local_timezone);
    let mut page = state.budget_page.lock().await;

    let view_state = match form {
        Ok(Form(view_state)) => view_state,
        Err(rejection) => {
            tracing::warn!("Could not read entry form: {rejection}");
            page.render_message(INVALID_FORM_MESSAGE);
            return budget_view(&page, today).into_response();
        }
    };

    if view_state.button_type.is_category() {
        tracing::warn!(
            "Entry form submitted with category button {}",
            view_state.button_type
        );
    }

    let outcome = RENDER_INCOME_AND_EXPENSE
        .init(&view_state, &state.store, &mut *page)
        .await;
    tracing::debug!("Entry form for {} gave {outcome:?}", view_state.button_type);

    budget_view(&page, today).into_response()
}

#[cfg(test)]
fn get_test_state() -> BudgetEndpointState {
    use std::sync::Mutex;

    use rusqlite::Connection;

    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    crate::db::initialize(&connection).expect("Could not initialize database");

    BudgetEndpointState {
        store: SqliteBudgetStore::new(Arc::new(Mutex::new(connection))),
        budget_page: Arc::new(tokio::sync::Mutex::new(BudgetPage::default())),
        local_timezone: "Etc/UTC".to_owned(),
    }
}
