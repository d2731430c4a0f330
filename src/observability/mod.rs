//! Observability of the logging pipeline itself.
//!
//! # Data Flow
//! ```text
//! Handlers that drop a line:
//!     → metrics.rs (dropped-line counter, by reason)
//!     → `tracing` debug event (crate diagnostics, stderr in the binary)
//!
//! Consumers:
//!     → Metrics endpoint (Prometheus scrape, demo server only)
//! ```
//!
//! # Design Decisions
//! - Diagnostics go through `tracing`, never through the logger being
//!   diagnosed
//! - Metric updates are cheap no-ops when no recorder is installed

pub mod metrics;
