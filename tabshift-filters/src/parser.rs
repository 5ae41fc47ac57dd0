//! Filter token parser.
//!
//! Parses configuration strings like `"pinned"`, `"title:*.md"` or
//! `"path:${workspaceFolder}/test/**"` into [`FilterToken`] values.

use super::custom::PatternKind;
use super::registry::Keyword;
use std::fmt;

/// Error type for strict token parsing.
///
/// Lenient parsing never fails; this is only produced for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// A parsed filter token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterToken {
    /// Built-in keyword such as `pinned`
    Keyword(Keyword),
    /// Prefixed glob pattern such as `title:*.md`
    Pattern { kind: PatternKind, pattern: String },
    /// Anything else; never blocks
    Unknown(String),
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterToken::Keyword(keyword) => f.write_str(keyword.name()),
            FilterToken::Pattern { kind, pattern } => write!(f, "{}{}", kind.prefix(), pattern),
            FilterToken::Unknown(raw) => f.write_str(raw),
        }
    }
}

impl FilterToken {
    /// Parse a token, classifying unrecognized input as `Unknown`.
    ///
    /// Surrounding whitespace is ignored. Prefixes are tried before keywords,
    /// so `title:pinned` is a title pattern.
    pub fn parse(raw: &str) -> Self {
        let token = raw.trim();
        if let Some((kind, pattern)) = PatternKind::strip(token) {
            return FilterToken::Pattern {
                kind,
                pattern: pattern.to_string(),
            };
        }
        match Keyword::parse(token) {
            Some(keyword) => FilterToken::Keyword(keyword),
            None => FilterToken::Unknown(raw.to_string()),
        }
    }

    /// Parse a token, rejecting input that could never block a tab.
    pub fn parse_strict(raw: &str) -> Result<Self, ParseError> {
        match Self::parse(raw) {
            FilterToken::Unknown(raw) if raw.trim().is_empty() => {
                Err(ParseError("Empty filter token".to_string()))
            }
            FilterToken::Unknown(raw) => Err(ParseError(format!(
                "Unknown filter '{}': expected a keyword or a title:/path:/lang: pattern",
                raw
            ))),
            FilterToken::Pattern { kind, pattern } if pattern.is_empty() => Err(ParseError(
                format!("Filter '{}' has an empty pattern", kind.prefix()),
            )),
            token => Ok(token),
        }
    }

    /// Check if this token can never match.
    pub fn is_unknown(&self) -> bool {
        matches!(self, FilterToken::Unknown(_))
    }
}

/// Parse a configured filter list, preserving order and duplicates.
pub fn parse_filter_list<S: AsRef<str>>(tokens: &[S]) -> Vec<FilterToken> {
    tokens
        .iter()
        .map(|token| FilterToken::parse(token.as_ref()))
        .collect()
}
