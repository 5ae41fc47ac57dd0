//! Configuration file model and per-scope settings lookup.
//!
//! A `Config` holds global settings plus optional per-language overrides:
//!
//! ```yaml
//! enabled: true
//! direction: left
//! padding: 0
//! block_move_filters: [pinned, dirty, "path:${workspaceFolder}/test/**"]
//! language_overrides:
//!   markdown:
//!     padding: 1
//! ```

mod persistence;

use crate::defaults;
use crate::options::RawSettings;
use crate::types::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The context settings are looked up for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    /// Language of the focused document, if known
    pub language_id: Option<String>,
    /// Resource of the focused tab, if any
    pub resource: Option<PathBuf>,
}

impl Scope {
    /// Scope with no language or resource (global settings only).
    pub fn global() -> Self {
        Self::default()
    }

    /// Scope for a document of the given language.
    pub fn for_language(language_id: impl Into<String>) -> Self {
        Self {
            language_id: Some(language_id.into()),
            resource: None,
        }
    }
}

/// Source of raw settings for a scope.
///
/// Implemented by [`Config`]; hosts with their own settings storage implement
/// it to plug into the engine.
pub trait ConfigStore {
    /// Settings in force for `scope`.
    fn settings(&self, scope: &Scope) -> RawSettings;
}

/// Configuration loaded from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whether the active tab is repositioned at all
    #[serde(default = "crate::defaults::bool_true")]
    pub enabled: bool,

    /// Direction to slide the active tab in
    #[serde(default = "crate::defaults::direction")]
    pub direction: Direction,

    /// Slots to keep free between the moved tab and its boundary
    #[serde(default = "crate::defaults::padding")]
    pub padding: i64,

    /// Filter tokens classifying a tab as blocking
    #[serde(
        default = "crate::defaults::block_move_filters",
        alias = "blockMoveFilters"
    )]
    pub block_move_filters: Vec<String>,

    /// Emit per-decision diagnostics
    #[serde(default = "crate::defaults::bool_false")]
    pub debug: bool,

    /// Settings overridden for documents of a given language id
    #[serde(
        default,
        alias = "languageOverrides",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub language_overrides: BTreeMap<String, RawSettings>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: defaults::bool_true(),
            direction: defaults::direction(),
            padding: defaults::padding(),
            block_move_filters: defaults::block_move_filters(),
            debug: defaults::bool_false(),
            language_overrides: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the move direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the padding
    pub fn with_padding(mut self, padding: i64) -> Self {
        self.padding = padding;
        self
    }

    /// Replace the blocking filter list
    pub fn with_filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_move_filters = filters.into_iter().map(Into::into).collect();
        self
    }

    /// Add an override for documents of `language_id`
    pub fn with_language_override(
        mut self,
        language_id: impl Into<String>,
        settings: RawSettings,
    ) -> Self {
        self.language_overrides.insert(language_id.into(), settings);
        self
    }

    /// Global settings as a raw layer.
    pub fn global_settings(&self) -> RawSettings {
        RawSettings {
            enabled: Some(self.enabled),
            direction: Some(self.direction),
            padding: Some(self.padding),
            block_move_filters: Some(self.block_move_filters.clone()),
            debug: Some(self.debug),
        }
    }
}

impl ConfigStore for Config {
    fn settings(&self, scope: &Scope) -> RawSettings {
        let global = self.global_settings();
        match scope
            .language_id
            .as_deref()
            .and_then(|lang| self.language_overrides.get(lang))
        {
            Some(language) => {
                log::trace!("Applying language override for {:?}", scope.language_id);
                global.overlay(language)
            }
            None => global,
        }
    }
}

impl ConfigStore for RawSettings {
    fn settings(&self, _scope: &Scope) -> RawSettings {
        self.clone()
    }
}
