//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    budget_endpoints::{create_category_endpoint, create_income_expense_endpoint, get_budget_page},
    endpoints,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::BUDGET_VIEW, get(get_budget_page))
        .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
        .route(endpoints::ENTRIES_API, post(create_income_expense_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the budget page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::BUDGET_VIEW)
}
