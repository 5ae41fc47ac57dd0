//! Glob pattern matching.
//!
//! Matches titles, filesystem paths and language ids against glob patterns
//! (`*`, `**`, `?`, `[abc]`, `{a,b}`) using `globset`. Path patterns honor the
//! platform's separator convention; text patterns let `*` span `/`.

use super::platform::normalize_separators;
use globset::{GlobBuilder, GlobMatcher};
use std::borrow::Cow;
use thiserror::Error;

/// Error raised when a glob pattern cannot be compiled.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    /// Empty patterns never match and are rejected up front.
    #[error("empty pattern")]
    Empty,

    /// The glob syntax is invalid.
    #[error("invalid glob pattern '{pattern}': {message}")]
    Invalid { pattern: String, message: String },
}

/// How a subject is interpreted while matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternStyle {
    /// Free text (titles, language ids): `*` matches any run of characters.
    Text,
    /// Filesystem path: `*` stops at separators, `**` crosses them.
    /// With `backslash_paths`, `\` is treated as a separator on both sides.
    Path { backslash_paths: bool },
}

/// A compiled glob pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    matcher: GlobMatcher,
    style: PatternStyle,
}

impl CompiledPattern {
    /// Compile `pattern` for the given style.
    pub fn new(pattern: &str, style: PatternStyle) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }

        let (source, literal_separator, backslash_escape): (Cow<'_, str>, bool, bool) =
            match style {
                PatternStyle::Text => (pattern.into(), false, true),
                PatternStyle::Path {
                    backslash_paths: true,
                } => (normalize_separators(pattern), true, false),
                PatternStyle::Path {
                    backslash_paths: false,
                } => (pattern.into(), true, true),
            };

        let glob = GlobBuilder::new(&source)
            .literal_separator(literal_separator)
            .backslash_escape(backslash_escape)
            .build()
            .map_err(|e| PatternError::Invalid {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;

        Ok(Self {
            matcher: glob.compile_matcher(),
            style,
        })
    }

    /// Compile a free-text pattern.
    pub fn text(pattern: &str) -> Result<Self, PatternError> {
        Self::new(pattern, PatternStyle::Text)
    }

    /// Compile a filesystem path pattern.
    pub fn path(pattern: &str, backslash_paths: bool) -> Result<Self, PatternError> {
        Self::new(pattern, PatternStyle::Path { backslash_paths })
    }

    /// Original glob text after separator normalization.
    pub fn glob(&self) -> &str {
        self.matcher.glob().glob()
    }

    /// Check if `subject` matches.
    pub fn is_match(&self, subject: &str) -> bool {
        match self.style {
            PatternStyle::Path {
                backslash_paths: true,
            } => self.matcher.is_match(&*normalize_separators(subject)),
            _ => self.matcher.is_match(subject),
        }
    }
}

/// One-shot path-style match.
///
/// Empty or invalid patterns match nothing.
pub fn matches(subject: &str, pattern: &str, backslash_paths: bool) -> bool {
    match CompiledPattern::path(pattern, backslash_paths) {
        Ok(compiled) => compiled.is_match(subject),
        Err(e) => {
            log::debug!("Pattern '{}' never matches: {}", pattern, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pattern_matches_nothing() {
        assert!(!matches("", "", false));
        assert!(!matches("/src/main.rs", "", false));
        assert!(matches!(CompiledPattern::text(""), Err(PatternError::Empty)));
    }

    #[test]
    fn test_invalid_pattern_matches_nothing() {
        assert!(!matches("/src/[main.rs", "/src/[main.rs", false));
        assert!(matches!(
            CompiledPattern::text("a{b"),
            Err(PatternError::Invalid { .. })
        ));
    }

    #[test]
    fn test_double_star_crosses_directories() {
        assert!(matches("/home/me/proj/test/unit.ts", "**/test/*.ts", false));
        assert!(!matches("/home/me/proj/src/unit.ts", "**/test/*.ts", false));
        assert!(!matches("/home/me/proj/test/deep/unit.ts", "**/test/*.ts", false));
    }

    #[test]
    fn test_classes_and_alternatives() {
        assert!(matches("/a/file1.rs", "/a/file[0-9].rs", false));
        assert!(matches("/a/mod.tsx", "/a/*.{ts,tsx}", false));
        assert!(matches("/a/b.c", "/a/?.c", false));
        assert!(!matches("/a/bb.c", "/a/?.c", false));
    }

    #[test]
    fn test_backslash_paths_are_normalized() {
        assert!(matches(r"C:\proj\test\unit.ts", r"**\test\*.ts", true));
        assert!(matches(r"C:\proj\test\unit.ts", "**/test/*.ts", true));
        assert!(!matches(r"C:\proj\src\unit.ts", "**/test/*.ts", true));
    }

    #[test]
    fn test_text_star_spans_slashes() {
        let pattern = CompiledPattern::text("*settings*").expect("valid pattern");
        assert!(pattern.is_match("Settings / settings.json"));
        assert!(!pattern.is_match("Welcome"));
    }

    #[test]
    fn test_text_match_is_case_sensitive() {
        let pattern = CompiledPattern::text("README*").expect("valid pattern");
        assert!(pattern.is_match("README.md"));
        assert!(!pattern.is_match("readme.md"));
    }
}
