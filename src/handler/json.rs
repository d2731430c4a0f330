//! Line-oriented JSON handler.
//!
//! # Responsibilities
//! - Encode each message as a single-line JSON object
//! - Append it to the writer, newline-terminated, one write per message
//! - Count lines that could not be encoded or written
//!
//! # Design Decisions
//! - The writer sits behind a mutex so concurrent callers never interleave
//!   partial lines
//! - Failures are swallowed: logging is safe to call from error paths
//! - Output key order is fixed: timestamp, level, message, tags, fields,
//!   then httpRequest when present

use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;

use crate::config::Options;
use crate::context::Context;
use crate::handler::Handler;
use crate::http::RequestMetadata;
use crate::level::Level;
use crate::message::{Fields, Message, Tags};
use crate::observability::metrics;

/// Timestamp written by handlers in frozen-time mode.
pub const FROZEN_TIMESTAMP: &str = "2024-10-03T12:01:32-05:00";

/// Why a line was dropped.
#[derive(Debug, Error)]
enum LineError {
    #[error("failed to encode log line: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write log line: {0}")]
    Write(#[from] io::Error),
}

impl LineError {
    fn reason(&self) -> &'static str {
        match self {
            LineError::Encode(_) => "encode",
            LineError::Write(_) => "write",
        }
    }
}

/// Wire shape of one line.
#[derive(Serialize)]
struct Line<'a> {
    timestamp: Cow<'a, str>,
    level: Level,
    message: &'a str,
    tags: &'a Tags,
    fields: &'a Fields,
    #[serde(rename = "httpRequest", skip_serializing_if = "Option::is_none")]
    http_request: Option<&'a RequestMetadata>,
}

/// Writes messages as one JSON object per line.
pub struct JsonHandler<W> {
    writer: Mutex<W>,
    freeze_time: bool,
    dropped: AtomicU64,
}

impl<W: Write + Send> JsonHandler<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            freeze_time: false,
            dropped: AtomicU64::new(0),
        }
    }

    /// Build a handler honoring `options.freeze_time`. The debug flag is the
    /// logger's business; this handler writes every message it is given.
    pub fn with_options(writer: W, options: &Options) -> Self {
        Self::new(writer).freeze_time(options.freeze_time)
    }

    /// Write [`FROZEN_TIMESTAMP`] instead of the message time. Only meant for
    /// tests and documentation that need reproducible output.
    pub fn freeze_time(mut self, freeze: bool) -> Self {
        self.freeze_time = freeze;
        self
    }

    /// Number of lines dropped because encoding or writing failed.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Consume the handler and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Encode `message` (plus optional request metadata) and write it.
    pub(crate) fn emit(&self, message: &Message, request: Option<&RequestMetadata>) {
        if let Err(e) = self.encode(message, request).and_then(|line| self.write_line(&line)) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            metrics::record_dropped_line(e.reason());
            tracing::debug!(error = %e, level = %message.level, "Dropped log line");
        }
    }

    fn encode(&self, message: &Message, request: Option<&RequestMetadata>) -> Result<Vec<u8>, LineError> {
        let timestamp = if self.freeze_time {
            Cow::Borrowed(FROZEN_TIMESTAMP)
        } else {
            Cow::Owned(message.timestamp_rfc3339())
        };

        let line = Line {
            timestamp,
            level: message.level,
            message: &message.text,
            tags: &message.tags,
            fields: &message.fields,
            http_request: request,
        };

        let mut buf = serde_json::to_vec(&line)?;
        buf.push(b'\n');
        Ok(buf)
    }

    fn write_line(&self, line: &[u8]) -> Result<(), LineError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line)?;
        writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> Handler for JsonHandler<W> {
    fn handle(&self, _ctx: &Context, message: Message) {
        self.emit(&message, None);
    }
}

impl<W> std::fmt::Debug for JsonHandler<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonHandler")
            .field("freeze_time", &self.freeze_time)
            .field("dropped", &self.dropped.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
