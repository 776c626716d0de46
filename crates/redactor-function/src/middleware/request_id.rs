use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "X-Request-ID";
/// CloudEvents binary-mode event id
const CE_ID_HEADER: &str = "ce-id";

/// Tag every request with an id, echoed back in `X-Request-ID`.
///
/// An incoming `X-Request-ID` wins, then the CloudEvent id, then a fresh UUID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = [REQUEST_ID_HEADER, CE_ID_HEADER]
        .iter()
        .find_map(|name| {
            request
                .headers()
                .get(*name)
                .and_then(|h| h.to_str().ok())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
