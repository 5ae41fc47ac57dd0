//! Host abstraction and document caching.
//!
//! A host owns the live tab strip: it supplies the tab sequence and focus
//! context, resolves documents and executes the move the engine decides on.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tabshift_config::{DocumentInfo, MoveDirection, TabDescriptor};
use tabshift_filters::{DocumentResolver, VariableContext};
use thiserror::Error;

/// Default number of documents kept by [`DocumentCache`].
pub const DEFAULT_DOCUMENT_CACHE_CAPACITY: usize = 128;

/// Failure applying a move.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host has no focused tab to move
    #[error("no active tab to move")]
    NoActiveTab,

    /// The move would leave the tab strip
    #[error("cannot move tab at index {from} by {distance} to the {direction}: only {len} tabs")]
    OutOfRange {
        from: usize,
        distance: usize,
        direction: MoveDirection,
        len: usize,
    },

    /// The host refused the move for its own reasons
    #[error("host rejected move: {0}")]
    Rejected(String),
}

/// Live environment the repositioning engine runs against.
pub trait Host: DocumentResolver {
    /// Tabs of the focused group in display order, `None` when no group has focus.
    fn active_tab_sequence(&self) -> Option<Vec<TabDescriptor>>;

    /// Focus and workspace state used to expand `path:` filters.
    fn variable_context(&self) -> VariableContext;

    /// Move the active tab `distance` slots toward `direction`.
    fn move_active_tab(&mut self, direction: MoveDirection, distance: usize)
    -> Result<(), HostError>;

    /// Show an advisory message to the user.
    fn notify(&mut self, message: &str) {
        log::info!("{}", message);
    }
}

/// Bounded cache of resolved documents keyed by resource path.
///
/// Entries are a pure optimization: a miss falls through to the host.
#[derive(Debug)]
pub struct DocumentCache {
    entries: Mutex<LruCache<PathBuf, DocumentInfo>>,
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT_CACHE_CAPACITY)
    }
}

impl DocumentCache {
    /// Create a cache holding at most `capacity` documents (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Cached info for `resource`, resolving through `inner` on a miss.
    ///
    /// Unresolved documents are not cached.
    pub fn get_or_resolve(
        &self,
        resource: &Path,
        inner: &dyn DocumentResolver,
    ) -> Option<DocumentInfo> {
        if let Some(info) = self.entries.lock().get(resource) {
            return Some(info.clone());
        }

        let info = inner.resolve_document(resource)?;
        self.entries
            .lock()
            .put(resource.to_path_buf(), info.clone());
        Some(info)
    }

    /// Forget a single document, e.g. after it was saved or closed.
    pub fn invalidate(&self, resource: &Path) {
        if self.entries.lock().pop(resource).is_some() {
            log::trace!("Invalidated cached document {}", resource.display());
        }
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Resolver that consults a [`DocumentCache`] before the host.
pub struct CachingResolver<'a> {
    cache: &'a DocumentCache,
    inner: &'a dyn DocumentResolver,
}

impl<'a> CachingResolver<'a> {
    pub fn new(cache: &'a DocumentCache, inner: &'a dyn DocumentResolver) -> Self {
        Self { cache, inner }
    }
}

impl DocumentResolver for CachingResolver<'_> {
    fn resolve_document(&self, resource: &Path) -> Option<DocumentInfo> {
        self.cache.get_or_resolve(resource, self.inner)
    }
}
