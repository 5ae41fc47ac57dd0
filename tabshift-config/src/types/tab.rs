//! Tab descriptor and document types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Content Kind
// ============================================================================

/// What a tab is showing.
///
/// The keyword of each variant doubles as a built-in filter token, so
/// `block_move_filters: [terminal]` keeps tabs from sliding past terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    /// Plain text editor
    #[default]
    Text,
    /// Side-by-side or inline diff editor
    Diff,
    /// Notebook editor
    Notebook,
    /// Notebook diff editor
    NotebookDiff,
    /// Extension-provided webview
    Webview,
    /// Terminal hosted in the editor area
    Terminal,
    /// Anything the host cannot classify
    Other,
}

impl ContentKind {
    /// Filter keyword for this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Diff => "diff",
            ContentKind::Notebook => "notebook",
            ContentKind::NotebookDiff => "notebookDiff",
            ContentKind::Webview => "webview",
            ContentKind::Terminal => "terminal",
            ContentKind::Other => "other",
        }
    }

    /// Parse a filter keyword into a content kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.keyword() == keyword)
    }

    /// All content kinds for iteration
    pub fn all() -> &'static [ContentKind] {
        &[
            ContentKind::Text,
            ContentKind::Diff,
            ContentKind::Notebook,
            ContentKind::NotebookDiff,
            ContentKind::Webview,
            ContentKind::Terminal,
            ContentKind::Other,
        ]
    }
}

// ============================================================================
// Tab Descriptor
// ============================================================================

/// One entry of the host's ordered tab sequence.
///
/// Descriptors are read-only snapshots supplied fresh for every invocation;
/// the engine never mutates or retains them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TabDescriptor {
    /// Text shown on the tab
    pub label: String,

    /// Whether this is the focused tab of its group
    #[serde(default)]
    pub is_active: bool,

    /// Whether the tab is pinned
    #[serde(default)]
    pub is_pinned: bool,

    /// Whether the tab has unsaved changes
    #[serde(default)]
    pub is_dirty: bool,

    /// Whether the tab is a transient preview
    #[serde(default)]
    pub is_preview: bool,

    /// What the tab is showing
    #[serde(default)]
    pub kind: ContentKind,

    /// Filesystem path of the underlying resource, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<PathBuf>,
}

impl TabDescriptor {
    /// Create a plain text tab with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Mark the tab as focused.
    pub fn active(mut self) -> Self {
        self.is_active = true;
        self
    }

    /// Mark the tab as pinned.
    pub fn pinned(mut self) -> Self {
        self.is_pinned = true;
        self
    }

    /// Mark the tab as having unsaved changes.
    pub fn dirty(mut self) -> Self {
        self.is_dirty = true;
        self
    }

    /// Mark the tab as a preview tab.
    pub fn preview(mut self) -> Self {
        self.is_preview = true;
        self
    }

    /// Set the content kind.
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach a backing resource path.
    pub fn with_resource(mut self, resource: impl Into<PathBuf>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Backing resource path, if any
    pub fn resource(&self) -> Option<&Path> {
        self.resource.as_deref()
    }
}

// ============================================================================
// Document Info
// ============================================================================

/// Facts about the document behind a tab, resolved by the host on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Language identifier (e.g. "typescript", "rust")
    pub language_id: String,

    /// Whether the document has never been saved to disk
    #[serde(default)]
    pub is_untitled: bool,
}

impl DocumentInfo {
    /// Create info for a saved document of the given language.
    pub fn new(language_id: impl Into<String>) -> Self {
        Self {
            language_id: language_id.into(),
            is_untitled: false,
        }
    }

    /// Mark the document as untitled.
    pub fn untitled(mut self) -> Self {
        self.is_untitled = true;
        self
    }
}
