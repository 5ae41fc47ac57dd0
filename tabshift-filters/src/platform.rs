//! Platform-specific path conventions.
//!
//! Contains:
//! - Detection of backslash-separator platforms
//! - Separator normalization applied before glob matching

use std::borrow::Cow;

/// Whether the current platform separates path components with `\`.
#[inline]
pub fn uses_backslash_paths() -> bool {
    cfg!(windows)
}

/// Rewrite `\` separators to `/` so patterns and paths share one convention.
///
/// Borrowed when there is nothing to rewrite.
pub fn normalize_separators(s: &str) -> Cow<'_, str> {
    if s.contains('\\') {
        Cow::Owned(s.replace('\\', "/"))
    } else {
        Cow::Borrowed(s)
    }
}
