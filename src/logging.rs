//! Middleware for logging requests and responses.

use axum::{
    body::Body,
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::Response,
};

/// The number of bytes of a request or response body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = extract_parts_and_body_text_from_request(request).await;
    log_request(&parts, &body_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body_text) = extract_parts_and_body_text_from_response(response).await;
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn body_to_text(body: Body) -> String {
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
        Err(error) => {
            tracing::error!("Could not read body for logging: {error}");
            String::new()
        }
    }
}

async fn extract_parts_and_body_text_from_request(request: Request) -> (request::Parts, String) {
    let (parts, body) = request.into_parts();

    (parts, body_to_text(body).await)
}

async fn extract_parts_and_body_text_from_response(
    response: Response,
) -> (response::Parts, String) {
    let (parts, body) = response.into_parts();

    (parts, body_to_text(body).await)
}

/// The longest prefix of `body` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character, or `None` if the whole body fits.
fn truncate_body(body: &str) -> Option<&str> {
    if body.len() <= LOG_BODY_LENGTH_LIMIT {
        return None;
    }

    let end = (0..=LOG_BODY_LENGTH_LIMIT)
        .rev()
        .find(|&index| body.is_char_boundary(index))
        .unwrap_or(0);

    Some(&body[..end])
}

fn log_request(parts: &request::Parts, body: &str) {
    let method = &parts.method;
    let uri = &parts.uri;

    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Received request: {method} {uri}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {method} {uri}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    let status = parts.status;

    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {status}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {status}\nbody: {body:?}"),
    }
}
