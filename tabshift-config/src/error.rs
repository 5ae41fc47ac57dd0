//! Typed error variants for the tabshift-config crate.
//!
//! Provides structured error types for config I/O and validation so library
//! consumers can match on specific failure modes instead of opaque `anyhow`
//! strings.
//!
//! # Example
//!
//! ```rust,no_run
//! use tabshift_config::{Config, ConfigError};
//!
//! match Config::load_from(std::path::Path::new("config.yaml")) {
//!     Ok(config) => println!("padding = {}", config.padding),
//!     Err(ConfigError::Io(io)) => eprintln!("I/O error: {io}"),
//!     Err(ConfigError::Parse(p)) => eprintln!("YAML parse error: {p}"),
//!     Err(ConfigError::Validation(msg)) => eprintln!("Validation: {msg}"),
//! }
//! ```

use thiserror::Error;

/// Errors that can occur when loading, saving, or interpreting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A value failed semantic validation.
    ///
    /// The inner string describes which value is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
