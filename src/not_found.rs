use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

use crate::html::error_view;

fn not_found_view() -> Markup {
    error_view(
        "Not Found",
        "404",
        "Sorry, we couldn't find that page.",
        "Check the address, or head back to your budget.",
    )
}

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (StatusCode::NOT_FOUND, not_found_view()).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        not_found::get_404_not_found,
        test_utils::{assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn responds_with_not_found_page() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }
}
