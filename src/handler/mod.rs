//! Message handlers.
//!
//! # Data Flow
//! ```text
//! Logger::{debug,info,error}
//!     → Message (owned snapshot)
//!     → Handler::handle
//!         → memory.rs  (append to in-memory list, tests)
//!         → json.rs    (one JSON object per line to a writer)
//!         → request.rs (json.rs + HTTP request metadata from the Context)
//! ```
//!
//! # Design Decisions
//! - One method, no return value: a handler owns its failure handling
//! - Handlers never panic or block indefinitely on the caller's path; a line
//!   that cannot be written is dropped and counted
//! - Open trait so applications can plug in their own sinks

pub mod json;
pub mod memory;
pub mod request;

pub use json::{JsonHandler, FROZEN_TIMESTAMP};
pub use memory::Memory;
pub use request::RequestJsonHandler;

use crate::context::Context;
use crate::message::Message;

/// Formats or stores messages produced by a [`Logger`](crate::Logger).
///
/// Implementations are shared across every thread that logs through the
/// same logger, so they must be `Send + Sync` and do their own locking.
/// `handle` must not panic and must not propagate failures to the caller.
pub trait Handler: Send + Sync {
    /// Consume one message. `ctx` is the context the message was logged under.
    fn handle(&self, ctx: &Context, message: Message);
}
