//! Request metadata middleware driven through an axum router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, Extension},
    http::{Request, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceExt;

use tagged_log::http::{request_metadata_middleware, X_REQUEST_ID};
use tagged_log::{fields, Context, Logger, Options, RequestJsonHandler, RequestMetadata};

mod common;
use common::SharedBuffer;

async fn metadata_handler(Extension(ctx): Extension<Context>) -> Json<Option<RequestMetadata>> {
    Json(ctx.request_metadata().cloned())
}

fn app() -> Router {
    Router::new()
        .route("/test", get(metadata_handler))
        .layer(middleware::from_fn(request_metadata_middleware))
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, RequestMetadata) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let header = response
        .headers()
        .get(X_REQUEST_ID)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let metadata: Option<RequestMetadata> = serde_json::from_slice(&body).unwrap();
    (status, header, metadata.unwrap())
}

#[tokio::test]
async fn test_metadata_from_headers() {
    let request = Request::builder()
        .method("GET")
        .uri("/test?verbose=1")
        .header(X_REQUEST_ID, "46f7e63a-5c89-42e5-a488-9809dbf47760")
        .header("x-real-ip", "192.168.1.100")
        .header("x-forwarded-for", "10.0.0.1")
        .header("user-agent", "GoTest 1.1")
        .body(Body::empty())
        .unwrap();

    let (status, header, md) = call(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(header.as_deref(), Some("46f7e63a-5c89-42e5-a488-9809dbf47760"));
    assert_eq!(
        md,
        RequestMetadata {
            id: "46f7e63a-5c89-42e5-a488-9809dbf47760".into(),
            ip: "192.168.1.100".into(),
            method: "GET".into(),
            path: "/test".into(),
            user_agent: "GoTest 1.1".into(),
        }
    );
}

#[tokio::test]
async fn test_generated_id_and_connection_address() {
    let addr: SocketAddr = "172.16.0.9:40000".parse().unwrap();
    let mut request = Request::builder().uri("/test").body(Body::empty()).unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));

    let (_, header, md) = call(app(), request).await;

    assert_eq!(md.ip, "172.16.0.9:40000");
    assert_eq!(md.user_agent, "");
    assert!(uuid::Uuid::parse_str(&md.id).is_ok());
    assert_eq!(header, Some(md.id));
}

#[tokio::test]
async fn test_existing_context_tags_are_kept() {
    let app = Router::new()
        .route(
            "/test",
            get(|Extension(ctx): Extension<Context>| async move {
                Json(ctx.tags())
            }),
        )
        .layer(middleware::from_fn(request_metadata_middleware))
        .layer(Extension(Context::background().with_tag("service", "api")));

    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let tags: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(tags, serde_json::json!({ "service": "api" }));
}

#[tokio::test]
async fn test_logged_lines_carry_request() {
    let buf = SharedBuffer::new();
    let logger = Arc::new(Logger::new(
        Arc::new(RequestJsonHandler::new(buf.clone(), Options::default())),
        None,
    ));

    let app = Router::new()
        .route(
            "/test",
            post(move |Extension(ctx): Extension<Context>| {
                let logger = Arc::clone(&logger);
                async move {
                    logger.info(&ctx, "handled", fields! { "ok" => true });
                    StatusCode::NO_CONTENT
                }
            }),
        )
        .layer(middleware::from_fn(request_metadata_middleware));

    let request = Request::builder()
        .method("POST")
        .uri("/test")
        .header(X_REQUEST_ID, "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let lines = buf.json_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["message"], "handled");
    assert_eq!(lines[0]["httpRequest"]["id"], "req-42");
    assert_eq!(lines[0]["httpRequest"]["method"], "POST");
    assert_eq!(lines[0]["httpRequest"]["path"], "/test");
}
