//! The message record handed to every handler.
//!
//! # Responsibilities
//! - Represent one log line as a plain value
//! - Define the serialization contract shared by all handlers
//!
//! # Design Decisions
//! - Tags and fields use sorted maps so identical input always encodes to
//!   identical bytes
//! - Handlers receive an owned `Message`; nothing the caller does afterwards
//!   can reach it

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::level::Level;

/// Request- or session-scoped string metadata carried by a [`Context`](crate::Context).
pub type Tags = BTreeMap<String, String>;

/// Per-call structured data. Values may be any JSON value, including nested
/// objects and arrays.
pub type Fields = serde_json::Map<String, Value>;

/// A single log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The log level for the message.
    pub level: Level,

    /// When the logger created the message.
    pub timestamp: DateTime<Utc>,

    /// Human-readable description of the event. Kept free of interpolated
    /// data so logs stay greppable; data points belong in `fields`.
    #[serde(rename = "message")]
    pub text: String,

    /// Key/value pairs taken from the context the message was logged under.
    #[serde(default)]
    pub tags: Tags,

    /// Data points supplied with this particular call.
    #[serde(default)]
    pub fields: Fields,
}

impl Message {
    pub fn new(
        level: Level,
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
        tags: Tags,
        fields: Fields,
    ) -> Self {
        Self {
            level,
            timestamp,
            text: text.into(),
            tags,
            fields,
        }
    }

    /// RFC 3339 rendering of the timestamp, as written by the JSON handlers.
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = serde_json::to_string(&self.fields).unwrap_or_else(|_| "{}".to_string());
        write!(
            f,
            "<Message level:{} timestamp:{:?} msg:{:?} tags:{:?} fields:{}>",
            self.level,
            self.timestamp_rfc3339(),
            self.text,
            self.tags,
            fields,
        )
    }
}

/// Build a [`Fields`] map from `key => value` pairs.
///
/// Values can be anything that implements `Serialize`. A value that fails to
/// serialize becomes `null` rather than aborting the log call.
///
/// ```
/// use tagged_log::fields;
///
/// let fields = fields! { "user_id" => 123, "role" => "admin" };
/// assert_eq!(fields["role"], "admin");
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(
                ::std::string::String::from($key),
                $crate::__private::serde_json::to_value(&$value).unwrap_or_default(),
            );
        )+
        fields
    }};
}
