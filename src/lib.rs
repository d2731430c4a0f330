//! Minimal structured logging.
//!
//! Callers log a level, a plain message and a map of fields; the logger adds
//! a timestamp and the tags carried by an explicit [`Context`], builds a
//! [`Message`] and hands it to a pluggable [`Handler`].
//!
//! # Architecture Overview
//!
//! ```text
//!   caller ──▶ Logger::{debug,info,error}(ctx, text, fields)
//!                 │  debug flag check (debug only)
//!                 │  tags = ctx.tags(), timestamp = now
//!                 ▼
//!              Message ──▶ Handler::handle(ctx, message)
//!                             ├─ Memory             (tests)
//!                             ├─ JsonHandler        (one JSON object per line)
//!                             └─ RequestJsonHandler (+ "httpRequest" from ctx)
//!
//!   HTTP services: request_metadata_middleware ──▶ Context::with_request_metadata
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tagged_log::{fields, Context, Logger, Memory, Options};
//!
//! let memory = Arc::new(Memory::new());
//! let logger = Logger::new(memory.clone(), Some(Options::default().with_debug(true)));
//!
//! let ctx = Context::background().with_tags([("env", "prod"), ("service", "database")]);
//! logger.info(&ctx, "user signed in", fields! { "user_id" => 123, "role" => "admin" });
//!
//! let messages = memory.messages();
//! assert_eq!(messages[0].tags["env"], "prod");
//! assert_eq!(messages[0].fields["user_id"], 123);
//! ```

pub mod config;
pub mod context;
pub mod global;
pub mod handler;
pub mod http;
pub mod level;
pub mod logger;
pub mod message;
pub mod observability;

pub use config::Options;
pub use context::Context;
pub use global::{debug, default_logger, error, info, set_debug, set_handler};
pub use handler::{Handler, JsonHandler, Memory, RequestJsonHandler, FROZEN_TIMESTAMP};
pub use http::RequestMetadata;
pub use level::{Level, ParseLevelError};
pub use logger::Logger;
pub use message::{Fields, Message, Tags};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
