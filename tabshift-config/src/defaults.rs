//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on `Config`
//! fields and by `Options::resolve` when a setting is absent.

use crate::types::Direction;

/// Filter tokens that are always in force.
///
/// If a configured filter list contains none of these, the whole list is
/// replaced by this set so at least one blocking rule remains.
pub const DEFAULT_BLOCK_MOVE_FILTERS: &[&str] = &["pinned"];

/// File name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Debounce window for config file change events.
pub const CONFIG_RELOAD_DEBOUNCE_MS: u64 = 200;

pub fn block_move_filters() -> Vec<String> {
    DEFAULT_BLOCK_MOVE_FILTERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn direction() -> Direction {
    Direction::Auto
}

pub fn padding() -> i64 {
    0
}

pub fn bool_true() -> bool {
    true
}

pub fn bool_false() -> bool {
    false
}
