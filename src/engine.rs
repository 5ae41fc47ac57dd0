//! The repositioning engine.
//!
//! [`Repositioner`] owns the configuration store, the options currently in
//! force and everything derived from them (the blocking predicate and the
//! document cache). It is created once per host session and fed the host on
//! every trigger; derived state is rebuilt only when the effective options
//! change.

use crate::host::{CachingResolver, DocumentCache, Host, HostError};
use crate::position::compute_position;
use std::fmt;
use tabshift_config::{ConfigStore, MoveDirection, Options, Scope, TabDescriptor, effective_options};
use tabshift_filters::{BlockingPredicate, DocumentResolver, FilterEnv, VariableContext};

/// Why the active tab stays where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMoveReason {
    /// Repositioning is switched off for this scope
    Disabled,
    /// The host has no focused tab group
    NoTabs,
    /// No tab in the group is active
    NoActiveTab,
    /// The active tab matches a blocking filter itself
    ActiveTabBlocking,
    /// The active tab already sits at its computed position
    AlreadyInPlace,
}

impl fmt::Display for NoMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NoMoveReason::Disabled => "repositioning is disabled",
            NoMoveReason::NoTabs => "no tab group has focus",
            NoMoveReason::NoActiveTab => "no active tab",
            NoMoveReason::ActiveTabBlocking => "active tab is blocking",
            NoMoveReason::AlreadyInPlace => "active tab is already in place",
        };
        f.write_str(text)
    }
}

/// Result of one repositioning decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositionOutcome {
    /// The active tab moves `distance` (> 0) slots toward `direction`
    Moved {
        direction: MoveDirection,
        distance: usize,
    },
    NoMove(NoMoveReason),
}

impl fmt::Display for RepositionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositionOutcome::Moved {
                direction,
                distance,
            } => write!(f, "move {} by {}", direction, distance),
            RepositionOutcome::NoMove(reason) => write!(f, "no move: {}", reason),
        }
    }
}

/// One tab as seen by the engine, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabReport {
    pub index: usize,
    pub label: String,
    pub is_active: bool,
    /// Filter token that makes this tab blocking
    pub blocked_by: Option<String>,
}

/// Options and the predicate built from them.
#[derive(Debug)]
struct Prepared {
    options: Options,
    predicate: BlockingPredicate,
}

impl Prepared {
    /// Make `slot` hold state for the options `store` gives `scope`, rebuilding
    /// only when those options differ from the ones already prepared.
    fn ensure<'a>(
        slot: &'a mut Option<Prepared>,
        store: &dyn ConfigStore,
        backslash_paths: Option<bool>,
        scope: &Scope,
    ) -> &'a Prepared {
        let options = effective_options(store, scope);
        if slot.as_ref().is_some_and(|prepared| prepared.options != options) {
            *slot = None;
        }

        slot.get_or_insert_with(|| {
            log::debug!(
                "Rebuilding blocking predicate for filters {:?}",
                options.block_move_filters
            );
            let mut predicate = BlockingPredicate::from_filters(&options.block_move_filters);
            if let Some(backslash_paths) = backslash_paths {
                predicate = predicate.with_path_style(backslash_paths);
            }
            Prepared { options, predicate }
        })
    }
}

/// Decides where the active tab goes and asks the host to move it.
pub struct Repositioner {
    store: Box<dyn ConfigStore>,
    prepared: Option<Prepared>,
    documents: DocumentCache,
    backslash_paths: Option<bool>,
}

impl fmt::Debug for Repositioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repositioner")
            .field("prepared", &self.prepared)
            .field("documents", &self.documents.len())
            .finish_non_exhaustive()
    }
}

impl Repositioner {
    /// Create an engine reading settings from `store`.
    pub fn new(store: impl ConfigStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            prepared: None,
            documents: DocumentCache::default(),
            backslash_paths: None,
        }
    }

    /// Use a document cache of the given capacity.
    pub fn with_document_cache(mut self, capacity: usize) -> Self {
        self.documents = DocumentCache::new(capacity);
        self
    }

    /// Override the platform path convention for `path:` filters.
    pub fn with_path_style(mut self, backslash_paths: bool) -> Self {
        self.backslash_paths = Some(backslash_paths);
        self.prepared = None;
        self
    }

    /// Replace the configuration wholesale.
    ///
    /// Drops the predicate, its pattern cache and all cached documents.
    pub fn reload(&mut self, store: impl ConfigStore + 'static) {
        log::info!("Reloading repositioning configuration");
        self.store = Box::new(store);
        self.prepared = None;
        self.documents.clear();
    }

    /// Documents resolved by the most recent decision or explanation.
    ///
    /// The cache is emptied at the start of every invocation.
    pub fn documents(&self) -> &DocumentCache {
        &self.documents
    }

    /// Effective options for `scope`.
    pub fn options_for(&self, scope: &Scope) -> Options {
        effective_options(&*self.store, scope)
    }

    /// Options of the last decision, if any.
    pub fn current_options(&self) -> Option<&Options> {
        self.prepared.as_ref().map(|prepared| &prepared.options)
    }

    /// Compute the outcome for the host's current state without moving
    /// anything.
    pub fn compute(&mut self, host: &dyn Host) -> RepositionOutcome {
        self.evaluate(host).outcome
    }

    /// Compute the outcome and apply it through the host.
    ///
    /// With `debug` enabled, every decision that does not move the tab is
    /// reported through [`Host::notify`].
    pub fn reposition_active_tab(
        &mut self,
        host: &mut dyn Host,
    ) -> Result<RepositionOutcome, HostError> {
        let Evaluation { outcome, debug } = self.evaluate(host);

        match outcome {
            RepositionOutcome::Moved {
                direction,
                distance,
            } => {
                log::info!("Moving active tab {} by {}", direction, distance);
                host.move_active_tab(direction, distance)?;
            }
            RepositionOutcome::NoMove(reason) => {
                log::debug!("Active tab not moved: {}", reason);
                if debug {
                    host.notify(&format!("tabshift: {}", outcome));
                }
            }
        }
        Ok(outcome)
    }

    /// Describe every tab of the host's focused group and the filter that
    /// blocks it.
    pub fn explain(&mut self, host: &dyn Host) -> Vec<TabReport> {
        self.documents.clear();
        let Some(tabs) = host.active_tab_sequence() else {
            return Vec::new();
        };
        let variables = host.variable_context();
        let scope = self.scope_for(tabs.iter().find(|tab| tab.is_active), host);
        let prepared = Prepared::ensure(
            &mut self.prepared,
            &*self.store,
            self.backslash_paths,
            &scope,
        );
        let resolver = CachingResolver::new(&self.documents, host);
        let env = FilterEnv::new(&resolver, &variables);

        tabs.iter()
            .enumerate()
            .map(|(index, tab)| TabReport {
                index,
                label: tab.label.clone(),
                is_active: tab.is_active,
                blocked_by: prepared
                    .predicate
                    .first_match(tab, &env)
                    .map(ToString::to_string),
            })
            .collect()
    }

    fn scope_for(&self, active: Option<&TabDescriptor>, host: &dyn Host) -> Scope {
        let Some(tab) = active else {
            return Scope::global();
        };
        let language_id = tab
            .resource()
            .and_then(|resource| self.documents.get_or_resolve(resource, host))
            .map(|doc| doc.language_id);
        Scope {
            language_id,
            resource: tab.resource.clone(),
        }
    }

    fn evaluate(&mut self, host: &dyn Host) -> Evaluation {
        // Documents are cached for one invocation only; the host may have
        // changed them since the last trigger
        self.documents.clear();
        let Some(tabs) = host.active_tab_sequence() else {
            return Evaluation::no_move(NoMoveReason::NoTabs, false);
        };
        let active_index = tabs.iter().position(|tab| tab.is_active);
        let scope = self.scope_for(active_index.map(|i| &tabs[i]), host);
        let prepared = Prepared::ensure(
            &mut self.prepared,
            &*self.store,
            self.backslash_paths,
            &scope,
        );
        let options = &prepared.options;

        if !options.enabled {
            return Evaluation::no_move(NoMoveReason::Disabled, options.debug);
        }
        if tabs.is_empty() {
            return Evaluation::no_move(NoMoveReason::NoTabs, options.debug);
        }
        let Some(active_index) = active_index else {
            return Evaluation::no_move(NoMoveReason::NoActiveTab, options.debug);
        };

        let variables = host.variable_context();
        let resolver = CachingResolver::new(&self.documents, host);
        let env = FilterEnv::new(&resolver, &variables);
        let direction = options.move_direction();

        if options.debug {
            log_blocking_tabs(&tabs, &prepared.predicate, &env);
        }

        let outcome = match compute_position(
            active_index,
            &tabs,
            |tab| prepared.predicate.is_blocking(tab, &env),
            direction,
            options.padding,
        ) {
            None => RepositionOutcome::NoMove(NoMoveReason::ActiveTabBlocking),
            Some(0) => RepositionOutcome::NoMove(NoMoveReason::AlreadyInPlace),
            Some(distance) => RepositionOutcome::Moved {
                direction,
                distance,
            },
        };

        if options.debug {
            log::info!(
                "Active tab {} ('{}'), direction {}, padding {}: {}",
                active_index,
                tabs[active_index].label,
                direction,
                options.padding,
                outcome
            );
        }

        Evaluation {
            outcome,
            debug: options.debug,
        }
    }
}

struct Evaluation {
    outcome: RepositionOutcome,
    debug: bool,
}

impl Evaluation {
    fn no_move(reason: NoMoveReason, debug: bool) -> Self {
        Self {
            outcome: RepositionOutcome::NoMove(reason),
            debug,
        }
    }
}

fn log_blocking_tabs(tabs: &[TabDescriptor], predicate: &BlockingPredicate, env: &FilterEnv<'_>) {
    for (index, tab) in tabs.iter().enumerate() {
        if let Some(token) = predicate.first_match(tab, env) {
            log::info!("Tab {} ('{}') blocked by '{}'", index, tab.label, token);
        }
    }
}

/// Whether `documents` and `variables` make `tab` blocking under `options`.
///
/// One-shot helper for callers that do not keep a [`Repositioner`] around.
pub fn is_blocking(
    tab: &TabDescriptor,
    options: &Options,
    documents: &dyn DocumentResolver,
    variables: &VariableContext,
) -> bool {
    BlockingPredicate::from_filters(&options.block_move_filters)
        .is_blocking(tab, &FilterEnv::new(documents, variables))
}
