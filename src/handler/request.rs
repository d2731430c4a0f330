//! Request-aware JSON handler.
//!
//! Decorates JSON lines with the HTTP request metadata found on the context
//! and applies its own debug switch, for services that configure output at
//! the handler rather than at the logger.

use std::io::Write;

use crate::config::Options;
use crate::context::Context;
use crate::handler::{Handler, JsonHandler};
use crate::level::Level;
use crate::message::Message;

/// JSON handler that nests [`RequestMetadata`](crate::http::RequestMetadata)
/// under an `httpRequest` key when the context carries it.
///
/// Debug messages are dropped here unless `options.debug` is set, regardless
/// of the logger's own flag.
pub struct RequestJsonHandler<W> {
    inner: JsonHandler<W>,
    debug: bool,
}

impl<W: Write + Send> RequestJsonHandler<W> {
    pub fn new(writer: W, options: Options) -> Self {
        Self {
            inner: JsonHandler::with_options(writer, &options),
            debug: options.debug,
        }
    }

    /// Number of lines dropped because encoding or writing failed.
    /// Debug messages filtered out by the level check are not counted.
    pub fn dropped(&self) -> u64 {
        self.inner.dropped()
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl<W: Write + Send> Handler for RequestJsonHandler<W> {
    fn handle(&self, ctx: &Context, message: Message) {
        if message.level == Level::Debug && !self.debug {
            return;
        }
        self.inner.emit(&message, ctx.request_metadata());
    }
}

impl<W> std::fmt::Debug for RequestJsonHandler<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestJsonHandler")
            .field("inner", &self.inner)
            .field("debug", &self.debug)
            .finish()
    }
}
