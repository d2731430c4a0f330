//! Configuration.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig
//!         → logging: Options → Logger / handlers
//!         → server, observability → demo binary
//! ```
//!
//! # Design Decisions
//! - Library construction takes only `Options`; the rest is binary-level
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AppConfig, ObservabilityConfig, Options, ServerConfig};
pub use validation::{validate_config, ValidationError};
