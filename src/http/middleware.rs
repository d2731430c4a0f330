//! Request metadata middleware.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::context::Context;
use crate::http::request::{RequestMetadata, X_REQUEST_ID};

/// Attach [`RequestMetadata`] to the request's [`Context`] extension.
///
/// An existing `Context` extension (e.g. one carrying tags set by an outer
/// layer) is extended; otherwise a fresh one is created. Handlers read it with
/// `Extension<Context>`. The request ID is echoed in the `X-Request-ID`
/// response header unless the handler already set one.
///
/// Use with `axum::middleware::from_fn`. The connection address is only
/// available when the app is served with `into_make_service_with_connect_info`.
pub async fn request_metadata_middleware(mut request: Request<Body>, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let metadata = RequestMetadata::from_parts(
        request.headers(),
        request.method(),
        request.uri(),
        remote_addr,
    );
    let request_id = metadata.id.clone();

    let ctx = request
        .extensions()
        .get::<Context>()
        .cloned()
        .unwrap_or_default()
        .with_request_metadata(metadata);
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).await;

    match HeaderValue::from_str(&request_id) {
        Ok(value) => {
            response.headers_mut().entry(X_REQUEST_ID).or_insert(value);
        }
        Err(_) => {
            tracing::debug!(request_id = %request_id, "Request ID is not a valid header value");
        }
    }
    response
}
