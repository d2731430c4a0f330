//! Process-wide default logger.
//!
//! Lets code log without threading a `Logger` through every call. The
//! default logger writes JSON lines to stdout with debug output enabled, and
//! is created on first use.

use std::io;
use std::sync::{Arc, OnceLock};

use crate::config::Options;
use crate::context::Context;
use crate::handler::Handler;
use crate::logger::Logger;
use crate::message::Fields;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger behind the free functions in this module.
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(|| Logger::json(io::stdout(), Some(Options::default().with_debug(true))))
}

/// Log at debug level using the default logger. A no-op if debug output has
/// been disabled.
pub fn debug(ctx: &Context, text: impl Into<String>, fields: Fields) {
    default_logger().debug(ctx, text, fields);
}

/// Log at info level using the default logger.
pub fn info(ctx: &Context, text: impl Into<String>, fields: Fields) {
    default_logger().info(ctx, text, fields);
}

/// Log at error level using the default logger.
pub fn error(ctx: &Context, text: impl Into<String>, fields: Fields) {
    default_logger().error(ctx, text, fields);
}

/// Enable or disable debug messages from the default logger.
pub fn set_debug(enabled: bool) {
    default_logger().set_debug(enabled);
}

/// Replace the default logger's handler for all subsequent calls.
pub fn set_handler(handler: Arc<dyn Handler>) {
    default_logger().set_handler(handler);
}
