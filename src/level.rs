//! Log levels.
//!
//! Only three levels exist. Debug output can be switched off; Info and Error
//! are always emitted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Development and troubleshooting output. Suppressed unless debug is enabled.
    Debug,
    /// Domain events and everything that is not an error.
    Info,
    /// Erroneous conditions.
    Error,
}

impl Level {
    /// The wire representation of the level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a supported level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level {0:?} (expected debug, info or error)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "ERROR" => Ok(Level::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
