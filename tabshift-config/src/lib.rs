//! Configuration system for the tabshift repositioning engine.
//!
//! This crate provides the data the engine consumes and the settings that
//! steer it:
//!
//! - Tab descriptor and document types supplied by the host
//! - Move direction and the resolved per-scope `Options`
//! - Default values, including the mandatory default filter set
//! - YAML configuration with per-language overrides
//! - Configuration file watching

pub mod config;
pub mod defaults;
pub mod error;
pub mod options;
mod types;
#[cfg(feature = "watcher")]
pub mod watcher;

// Re-export main types for convenience
pub use config::{Config, ConfigStore, Scope};
pub use error::ConfigError;
pub use options::{Options, RawSettings, effective_filters, effective_options};
pub use types::{ContentKind, Direction, DocumentInfo, MoveDirection, TabDescriptor};
