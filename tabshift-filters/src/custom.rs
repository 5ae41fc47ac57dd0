//! Prefix-triggered pattern filters (`title:`, `path:`, `lang:`).
//!
//! The prefixes are checked in the order of [`PatternKind::all`]; the first
//! one a token starts with decides how the remainder is matched.

use super::DocumentResolver;
use super::matcher::CompiledPattern;
use tabshift_config::TabDescriptor;

/// Which tab attribute a pattern filter matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Tab label
    Title,
    /// Filesystem path of the tab's resource (pattern is variable-expanded)
    Path,
    /// Language id of the tab's document
    Lang,
}

impl PatternKind {
    /// All pattern kinds in prefix-check order
    pub fn all() -> &'static [PatternKind] {
        &[PatternKind::Title, PatternKind::Path, PatternKind::Lang]
    }

    /// Token prefix, including the colon
    pub fn prefix(&self) -> &'static str {
        match self {
            PatternKind::Title => "title:",
            PatternKind::Path => "path:",
            PatternKind::Lang => "lang:",
        }
    }

    /// Split a token into its pattern kind and the pattern after the prefix.
    pub fn strip(token: &str) -> Option<(PatternKind, &str)> {
        Self::all()
            .iter()
            .find_map(|kind| token.strip_prefix(kind.prefix()).map(|rest| (*kind, rest)))
    }

    /// Whether the pattern goes through `${variable}` expansion first.
    pub fn expands_variables(&self) -> bool {
        matches!(self, PatternKind::Path)
    }

    /// The attribute of `tab` this kind matches against, if the tab has one.
    pub fn subject(&self, tab: &TabDescriptor, documents: &dyn DocumentResolver) -> Option<String> {
        match self {
            PatternKind::Title => Some(tab.label.clone()),
            PatternKind::Path => tab
                .resource()
                .map(|path| path.to_string_lossy().into_owned()),
            PatternKind::Lang => tab
                .resource()
                .and_then(|resource| documents.resolve_document(resource))
                .map(|doc| doc.language_id),
        }
    }

    /// Match `tab` against an already compiled (and expanded) pattern.
    pub fn matches(
        &self,
        tab: &TabDescriptor,
        pattern: &CompiledPattern,
        documents: &dyn DocumentResolver,
    ) -> bool {
        self.subject(tab, documents)
            .is_some_and(|subject| pattern.is_match(&subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoDocuments;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tabshift_config::DocumentInfo;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(
            PatternKind::strip("title:*.md"),
            Some((PatternKind::Title, "*.md"))
        );
        assert_eq!(
            PatternKind::strip("path:**/test/*"),
            Some((PatternKind::Path, "**/test/*"))
        );
        assert_eq!(PatternKind::strip("lang:rust"), Some((PatternKind::Lang, "rust")));
        assert_eq!(PatternKind::strip("lang:"), Some((PatternKind::Lang, "")));
        assert_eq!(PatternKind::strip("pinned"), None);
        assert_eq!(PatternKind::strip("Title:x"), None);
    }

    #[test]
    fn test_title_subject() {
        let tab = TabDescriptor::new("README.md");
        let pattern = CompiledPattern::text("*.md").expect("valid pattern");
        assert!(PatternKind::Title.matches(&tab, &pattern, &NoDocuments));
    }

    #[test]
    fn test_path_requires_resource() {
        let pattern = CompiledPattern::path("/src/**", false).expect("valid pattern");
        let with = TabDescriptor::new("a.rs").with_resource("/src/a.rs");
        let without = TabDescriptor::new("a.rs");
        assert!(PatternKind::Path.matches(&with, &pattern, &NoDocuments));
        assert!(!PatternKind::Path.matches(&without, &pattern, &NoDocuments));
    }

    #[test]
    fn test_lang_requires_document() {
        let mut documents = HashMap::new();
        documents.insert(PathBuf::from("/src/a.ts"), DocumentInfo::new("typescript"));
        let pattern = CompiledPattern::text("type*").expect("valid pattern");

        let known = TabDescriptor::new("a.ts").with_resource("/src/a.ts");
        let unknown = TabDescriptor::new("b.ts").with_resource("/src/b.ts");
        assert!(PatternKind::Lang.matches(&known, &pattern, &documents));
        assert!(!PatternKind::Lang.matches(&unknown, &pattern, &documents));
    }
}
