//! # Request Stamping Middleware
//!
//! Generates a unique request ID per inbound request and exposes it in
//! request extensions and the `X-Request-ID` response header, enabling
//! request tracing across the service.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
}

impl RequestStamp {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }
}

/// Stamp the request with a generated ID, available to handlers via
/// `Extension<RequestStamp>` and echoed back as `X-Request-ID`.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert("X-Request-ID", header_value);
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn stamps_response_header_and_request_extension() {
        // Arrange: the handler reads the stamp back out of extensions.
        let app = Router::new()
            .route(
                "/",
                get(|Extension(stamp): Extension<RequestStamp>| async move { stamp.id }),
            )
            .layer(axum::middleware::from_fn(stamp_req));

        // Act
        let response = app
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert: header matches the ID the handler observed.
        assert_eq!(response.status(), StatusCode::OK);
        let header = response
            .headers()
            .get("X-Request-ID")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(header, String::from_utf8(body.to_vec()).unwrap());
    }
}
