//! Effective options resolution.
//!
//! `RawSettings` is what a configuration source says for one scope, with every
//! key optional. `Options` is what the engine runs with: defaults applied,
//! padding clamped, and the default-filter invariant enforced.

use crate::config::{ConfigStore, Scope};
use crate::defaults::{self, DEFAULT_BLOCK_MOVE_FILTERS};
use crate::types::{Direction, MoveDirection};
use serde::{Deserialize, Serialize};

/// Settings for one scope as read from a configuration source.
///
/// Absent keys fall back to the next layer (see [`RawSettings::overlay`]) and
/// finally to the defaults in [`crate::defaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,

    /// Signed so that a negative value in a hand-edited file is clamped
    /// instead of rejecting the whole file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<i64>,

    #[serde(
        default,
        alias = "blockMoveFilters",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_move_filters: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl RawSettings {
    /// Layer `upper` on top of `self`; keys present in `upper` win.
    pub fn overlay(&self, upper: &RawSettings) -> RawSettings {
        RawSettings {
            enabled: upper.enabled.or(self.enabled),
            direction: upper.direction.or(self.direction),
            padding: upper.padding.or(self.padding),
            block_move_filters: upper
                .block_move_filters
                .clone()
                .or_else(|| self.block_move_filters.clone()),
            debug: upper.debug.or(self.debug),
        }
    }

    /// Check if no key is set.
    pub fn is_empty(&self) -> bool {
        *self == RawSettings::default()
    }
}

/// Options the engine runs with for one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Filter tokens classifying a tab as blocking (never empty)
    pub block_move_filters: Vec<String>,
    /// Configured direction (`Auto` is resolved by [`Options::move_direction`])
    pub direction: Direction,
    /// Slots to keep free between the moved tab and its boundary
    pub padding: usize,
    /// Master switch
    pub enabled: bool,
    /// Emit diagnostics for each decision
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::resolve(&RawSettings::default())
    }
}

impl Options {
    /// Apply defaults and invariants to raw settings.
    pub fn resolve(raw: &RawSettings) -> Self {
        let padding = raw.padding.unwrap_or_else(defaults::padding);
        let padding = if padding < 0 {
            log::warn!("Negative padding {} in config, using 0", padding);
            0
        } else {
            usize::try_from(padding).unwrap_or(usize::MAX)
        };

        let block_move_filters = match &raw.block_move_filters {
            Some(configured) => effective_filters(configured),
            None => defaults::block_move_filters(),
        };

        Self {
            block_move_filters,
            direction: raw.direction.unwrap_or_else(defaults::direction),
            padding,
            enabled: raw.enabled.unwrap_or_else(defaults::bool_true),
            debug: raw.debug.unwrap_or_else(defaults::bool_false),
        }
    }

    /// Concrete direction to move in.
    pub fn move_direction(&self) -> MoveDirection {
        self.direction.resolve()
    }
}

/// Enforce the default-filter invariant on a configured filter list.
///
/// If `configured` contains at least one token of
/// [`DEFAULT_BLOCK_MOVE_FILTERS`] it is returned as-is; otherwise the default
/// set replaces it wholesale (the lists are never merged).
pub fn effective_filters(configured: &[String]) -> Vec<String> {
    let has_default = configured
        .iter()
        .any(|token| DEFAULT_BLOCK_MOVE_FILTERS.contains(&token.trim()));

    if has_default {
        configured.to_vec()
    } else {
        if !configured.is_empty() {
            log::warn!(
                "block_move_filters {:?} contains none of {:?}; using defaults",
                configured,
                DEFAULT_BLOCK_MOVE_FILTERS
            );
        }
        defaults::block_move_filters()
    }
}

/// Resolve the effective options for `scope` from a configuration store.
pub fn effective_options(store: &dyn ConfigStore, scope: &Scope) -> Options {
    Options::resolve(&store.settings(scope))
}
