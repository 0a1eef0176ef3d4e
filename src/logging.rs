//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Bodies longer than this many bytes are cut short at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full text is logged at the `debug` level. Uploaded files are only
/// logged by size.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let Some(body) = read_body(body).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let is_multipart = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|content_type| content_type.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("multipart/form-data"));

    if is_multipart {
        tracing::info!(
            "Received request: {parts:#?}\nbody: <{} bytes of multipart form data>",
            body.len()
        );
    } else {
        log_body("Received request", &parts, &body);
    }

    let response = next.run(Request::from_parts(parts, Body::from(body))).await;

    let (parts, body) = response.into_parts();
    let Some(body) = read_body(body).await else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    log_body("Sending response", &parts, &body);

    Response::from_parts(parts, Body::from(body))
}

async fn read_body(body: Body) -> Option<Bytes> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .inspect_err(|error| tracing::error!("Could not read body: {error}"))
        .ok()
}

/// Cuts `text` down to at most [LOG_BODY_LENGTH_LIMIT] bytes without splitting
/// a character.
fn truncate_body(text: &str) -> &str {
    if text.len() <= LOG_BODY_LENGTH_LIMIT {
        return text;
    }

    let mut end = LOG_BODY_LENGTH_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_body(label: &str, parts: &impl std::fmt::Debug, body: &Bytes) {
    let body = String::from_utf8_lossy(body);

    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!("{label}: {parts:#?}\nbody: {}...", truncate_body(&body));
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{label}: {parts:#?}\nbody: {body:?}");
    }
}
