//! Blocking filter system for tabshift.
//!
//! This crate decides whether a tab is "blocking", i.e. whether the active tab
//! must not be moved past it. Filters come from the `block_move_filters`
//! setting in config.yaml.
//!
//! Features:
//! - Built-in keywords (`pinned`, `dirty`, `preview`, `untitled`, content kinds)
//! - Glob filters on the tab title, resource path or language (`title:*.md`)
//! - `${variable}` expansion in `path:` filters (`path:${fileDirname}/*`)
//! - Platform-aware path separator handling

pub mod custom;
mod matcher;
pub mod parser;
mod platform;
pub mod registry;
pub mod variables;

pub use custom::PatternKind;
pub use matcher::{CompiledPattern, PatternError, PatternStyle, matches};
pub use parser::{FilterToken, ParseError, parse_filter_list};
pub use platform::uses_backslash_paths;
pub use registry::Keyword;
pub use variables::{Variable, VariableContext, resolve_variables};

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tabshift_config::{DocumentInfo, TabDescriptor};

/// Upper bound on cached `path:` expansions before the cache is flushed.
const RESOLVED_PATH_CACHE_LIMIT: usize = 256;

/// Looks up the document behind a tab's resource.
///
/// Lookups are best effort: `None` means "unknown", and filters that need a
/// document (`untitled`, `lang:`) then simply do not match.
pub trait DocumentResolver {
    fn resolve_document(&self, resource: &Path) -> Option<DocumentInfo>;
}

/// Resolver that knows no documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocuments;

impl DocumentResolver for NoDocuments {
    fn resolve_document(&self, _resource: &Path) -> Option<DocumentInfo> {
        None
    }
}

impl<S: std::hash::BuildHasher> DocumentResolver for HashMap<PathBuf, DocumentInfo, S> {
    fn resolve_document(&self, resource: &Path) -> Option<DocumentInfo> {
        self.get(resource).cloned()
    }
}

/// Host state a filter evaluation runs against.
#[derive(Clone, Copy)]
pub struct FilterEnv<'a> {
    /// Document lookup for `untitled` and `lang:`
    pub documents: &'a dyn DocumentResolver,
    /// Focus context for `path:` variable expansion
    pub variables: &'a VariableContext,
}

impl<'a> FilterEnv<'a> {
    pub fn new(documents: &'a dyn DocumentResolver, variables: &'a VariableContext) -> Self {
        Self {
            documents,
            variables,
        }
    }
}

/// How one configured token is evaluated.
#[derive(Debug)]
enum Rule {
    Keyword(Keyword),
    /// `title:` / `lang:` compiled when the predicate is built
    Compiled {
        kind: PatternKind,
        pattern: CompiledPattern,
    },
    /// `path:` holding the raw pattern; expanded per focus context
    Path(String),
    Never,
}

#[derive(Debug)]
struct Filter {
    token: FilterToken,
    rule: Rule,
}

#[derive(Debug)]
struct ResolvedPath {
    expanded: String,
    compiled: Option<CompiledPattern>,
}

/// Decides whether a tab is blocking: true when ANY configured token matches.
///
/// Built once per effective filter list. `path:` expansions are cached per
/// raw pattern and focus context for the lifetime of the predicate; build a
/// new predicate to drop them.
#[derive(Debug)]
pub struct BlockingPredicate {
    filters: Vec<Filter>,
    backslash_paths: bool,
    resolved_paths: Mutex<HashMap<(String, VariableContext), ResolvedPath>>,
}

impl BlockingPredicate {
    /// Build a predicate from parsed tokens.
    ///
    /// Unknown tokens and invalid `title:`/`lang:` patterns are logged and
    /// never block.
    pub fn new(tokens: Vec<FilterToken>) -> Self {
        log::debug!("Building blocking predicate from {} filters", tokens.len());

        let filters = tokens
            .into_iter()
            .map(|token| {
                let rule = match &token {
                    FilterToken::Keyword(keyword) => Rule::Keyword(*keyword),
                    FilterToken::Pattern {
                        kind: PatternKind::Path,
                        pattern,
                    } => Rule::Path(pattern.clone()),
                    FilterToken::Pattern { kind, pattern } => {
                        match CompiledPattern::text(pattern) {
                            Ok(compiled) => Rule::Compiled {
                                kind: *kind,
                                pattern: compiled,
                            },
                            Err(e) => {
                                log::warn!("Filter '{}' will never match: {}", token, e);
                                Rule::Never
                            }
                        }
                    }
                    FilterToken::Unknown(raw) => {
                        log::warn!("Unknown block-move filter '{}' ignored", raw);
                        Rule::Never
                    }
                };
                Filter { token, rule }
            })
            .collect();

        Self {
            filters,
            backslash_paths: uses_backslash_paths(),
            resolved_paths: Mutex::new(HashMap::new()),
        }
    }

    /// Build a predicate from configured filter strings.
    pub fn from_filters<S: AsRef<str>>(filters: &[S]) -> Self {
        Self::new(parse_filter_list(filters))
    }

    /// Override the platform path convention used by `path:` filters.
    pub fn with_path_style(mut self, backslash_paths: bool) -> Self {
        self.backslash_paths = backslash_paths;
        self.resolved_paths.get_mut().clear();
        self
    }

    /// Configured tokens in order.
    pub fn tokens(&self) -> impl Iterator<Item = &FilterToken> {
        self.filters.iter().map(|filter| &filter.token)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Check if `tab` is blocking.
    pub fn is_blocking(&self, tab: &TabDescriptor, env: &FilterEnv<'_>) -> bool {
        self.first_match(tab, env).is_some()
    }

    /// The first configured token (in list order) that matches `tab`.
    pub fn first_match(&self, tab: &TabDescriptor, env: &FilterEnv<'_>) -> Option<&FilterToken> {
        self.filters
            .iter()
            .find(|filter| self.rule_matches(&filter.rule, tab, env))
            .map(|filter| &filter.token)
    }

    fn rule_matches(&self, rule: &Rule, tab: &TabDescriptor, env: &FilterEnv<'_>) -> bool {
        match rule {
            Rule::Keyword(keyword) => keyword.matches(tab, env.documents),
            Rule::Compiled { kind, pattern } => kind.matches(tab, pattern, env.documents),
            Rule::Path(raw) => {
                let Some(subject) = PatternKind::Path.subject(tab, env.documents) else {
                    return false;
                };
                self.with_resolved_path(raw, env.variables, |resolved| {
                    resolved
                        .compiled
                        .as_ref()
                        .is_some_and(|pattern| pattern.is_match(&subject))
                })
            }
            Rule::Never => false,
        }
    }

    /// Variable-expanded form of a raw `path:` pattern under `ctx`.
    ///
    /// Repeated calls with the same pattern and context return the cached
    /// expansion.
    pub fn resolved_path_pattern(&self, raw: &str, ctx: &VariableContext) -> String {
        self.with_resolved_path(raw, ctx, |resolved| resolved.expanded.clone())
    }

    /// Number of cached `path:` expansions.
    pub fn cached_path_count(&self) -> usize {
        self.resolved_paths.lock().len()
    }

    fn with_resolved_path<R>(
        &self,
        raw: &str,
        ctx: &VariableContext,
        f: impl FnOnce(&ResolvedPath) -> R,
    ) -> R {
        let mut cache = self.resolved_paths.lock();
        if cache.len() >= RESOLVED_PATH_CACHE_LIMIT {
            log::trace!("Flushing {} cached path patterns", cache.len());
            cache.clear();
        }

        let resolved = cache
            .entry((raw.to_string(), ctx.clone()))
            .or_insert_with(|| {
                let expanded = resolve_variables(raw, ctx);
                let compiled = match CompiledPattern::path(&expanded, self.backslash_paths) {
                    Ok(compiled) => Some(compiled),
                    Err(e) => {
                        log::debug!("Filter 'path:{}' never matches here: {}", raw, e);
                        None
                    }
                };
                log::trace!("Resolved path filter '{}' -> '{}'", raw, expanded);
                ResolvedPath { expanded, compiled }
            });
        f(resolved)
    }
}
