//! The logger: level filtering, timestamping and dispatch.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::Utc;

use crate::config::Options;
use crate::context::Context;
use crate::handler::{Handler, JsonHandler, Memory};
use crate::level::Level;
use crate::message::{Fields, Message};

/// Builds [`Message`]s and passes them to a [`Handler`].
///
/// The logger only assembles the message (level, time, text, context tags,
/// fields); formatting and storage are the handler's job. Both the debug flag
/// and the handler can be changed while other threads are logging.
pub struct Logger {
    debug: AtomicBool,
    handler: ArcSwap<Arc<dyn Handler>>,
}

impl Logger {
    /// Create a logger sending messages to `handler`. Without `options`,
    /// debug output is disabled.
    pub fn new(handler: Arc<dyn Handler>, options: Option<Options>) -> Self {
        let options = options.unwrap_or_default();
        Self {
            debug: AtomicBool::new(options.debug),
            handler: ArcSwap::from_pointee(handler),
        }
    }

    /// A logger writing one JSON object per line to `writer`.
    pub fn json<W>(writer: W, options: Option<Options>) -> Self
    where
        W: Write + Send + 'static,
    {
        let handler = JsonHandler::with_options(writer, &options.unwrap_or_default());
        Self::new(Arc::new(handler), options)
    }

    /// A logger caching messages in memory. The returned [`Memory`] handle
    /// is the one the logger writes to.
    pub fn memory(options: Option<Options>) -> (Self, Arc<Memory>) {
        let memory = Arc::new(Memory::new());
        (Self::new(memory.clone(), options), memory)
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// Enable or disable debug messages.
    pub fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    /// Replace the handler. Calls already in progress finish on the old one.
    pub fn set_handler(&self, handler: Arc<dyn Handler>) {
        self.handler.store(Arc::new(handler));
    }

    /// The handler currently in use.
    pub fn handler(&self) -> Arc<dyn Handler> {
        let current = self.handler.load();
        Arc::clone(&**current)
    }

    /// Log at debug level. A no-op unless debug output is enabled.
    pub fn debug(&self, ctx: &Context, text: impl Into<String>, fields: Fields) {
        if !self.debug_enabled() {
            return;
        }
        self.log(ctx, Level::Debug, text.into(), fields);
    }

    /// Log at info level.
    pub fn info(&self, ctx: &Context, text: impl Into<String>, fields: Fields) {
        self.log(ctx, Level::Info, text.into(), fields);
    }

    /// Log at error level.
    pub fn error(&self, ctx: &Context, text: impl Into<String>, fields: Fields) {
        self.log(ctx, Level::Error, text.into(), fields);
    }

    fn log(&self, ctx: &Context, level: Level, text: String, fields: Fields) {
        let message = Message {
            level,
            timestamp: Utc::now(),
            text,
            tags: ctx.tags(),
            fields,
        };
        self.handler.load().handle(ctx, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("debug", &self.debug_enabled())
            .finish_non_exhaustive()
    }
}
