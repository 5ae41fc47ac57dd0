//! Built-in keyword filters.
//!
//! Each keyword maps to a boolean property of a tab. Content-kind keywords
//! (`terminal`, `webview`, ...) come from [`ContentKind::keyword`].

use super::DocumentResolver;
use tabshift_config::{ContentKind, TabDescriptor};

/// A built-in filter keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Tab is pinned
    Pinned,
    /// Tab has unsaved changes
    Dirty,
    /// Tab is a preview tab
    Preview,
    /// Document behind the tab was never saved
    Untitled,
    /// Tab shows the given kind of content
    Kind(ContentKind),
}

impl Keyword {
    /// Look up a keyword by name. Names are case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "pinned" => Some(Keyword::Pinned),
            "dirty" => Some(Keyword::Dirty),
            "preview" => Some(Keyword::Preview),
            "untitled" => Some(Keyword::Untitled),
            other => ContentKind::from_keyword(other).map(Keyword::Kind),
        }
    }

    /// Keyword name as written in configuration
    pub fn name(&self) -> &'static str {
        match self {
            Keyword::Pinned => "pinned",
            Keyword::Dirty => "dirty",
            Keyword::Preview => "preview",
            Keyword::Untitled => "untitled",
            Keyword::Kind(kind) => kind.keyword(),
        }
    }

    /// All keywords for help output
    pub fn all() -> Vec<Keyword> {
        let mut all = vec![
            Keyword::Pinned,
            Keyword::Dirty,
            Keyword::Preview,
            Keyword::Untitled,
        ];
        all.extend(ContentKind::all().iter().copied().map(Keyword::Kind));
        all
    }

    /// Evaluate the keyword against a tab.
    ///
    /// Only `untitled` consults `documents`; a tab without a resource or whose
    /// document cannot be resolved is not untitled.
    pub fn matches(&self, tab: &TabDescriptor, documents: &dyn DocumentResolver) -> bool {
        match self {
            Keyword::Pinned => tab.is_pinned,
            Keyword::Dirty => tab.is_dirty,
            Keyword::Preview => tab.is_preview,
            Keyword::Untitled => tab
                .resource()
                .and_then(|resource| documents.resolve_document(resource))
                .is_some_and(|doc| doc.is_untitled),
            Keyword::Kind(kind) => tab.kind == *kind,
        }
    }
}
