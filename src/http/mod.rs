//! HTTP request metadata.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → middleware.rs (axum middleware)
//!         → request.rs (derive id, client IP, method, path, user agent)
//!         → Context::with_request_metadata (request extension)
//!     → application handler (Extension<Context>)
//!     → logging calls → RequestJsonHandler adds "httpRequest"
//!     → response gets X-Request-ID
//! ```
//!
//! # Design Decisions
//! - Request ID reused from the inbound header when present
//! - Client IP is a best guess from spoofable headers, not a security boundary

pub mod middleware;
pub mod request;

pub use middleware::request_metadata_middleware;
pub use request::{RequestMetadata, X_FORWARDED_FOR, X_REAL_IP, X_REQUEST_ID};
