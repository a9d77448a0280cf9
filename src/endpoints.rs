//! The URIs of the app's pages and API endpoints.

/// The root route which redirects to the budget page.
pub const ROOT: &str = "/";
/// The budget page.
pub const BUDGET_VIEW: &str = "/budget";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an income or expense category.
pub const CATEGORIES_API: &str = "/api/categories";
/// The route to create an income or expense entry.
pub const ENTRIES_API: &str = "/api/entries";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::BUDGET_VIEW);
        assert_endpoint_is_valid_uri(endpoints::STATIC);

        assert_endpoint_is_valid_uri(endpoints::CATEGORIES_API);
        assert_endpoint_is_valid_uri(endpoints::ENTRIES_API);
    }
}
