//! Lexical context contract and matching helpers for implementations

use crate::tokens::{Token, TokenKind};
use regex::Regex;
use std::sync::OnceLock;

/// One lexical context of the scanner
///
/// A status is an immutable strategy: it classifies the input at a given
/// byte offset, decides whether a token closes the context, and may name a
/// nested context to enter after a token. It never tracks position itself.
pub trait Status {
    /// Token starting exactly at `offset`, or `None` if the input there
    /// cannot be classified in this context. A returned token must have a
    /// non-empty value and must not use [`TokenKind::Any`].
    fn get_token(&self, source: &str, offset: usize) -> Option<Token>;

    /// Whether `token` closes this context and returns control to the enclosing one
    fn is_end_token(&self, token: &Token) -> bool;

    /// Nested context to enter after `token`, if any
    fn get_new_status(&self, token: &Token) -> Option<Box<dyn Status>>;

    /// Short name used in diagnostics and logs
    fn name(&self) -> &'static str {
        "status"
    }
}

impl std::fmt::Debug for dyn Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Status({})", self.name())
    }
}

// ============================================================================
// MATCHING HELPERS
// ============================================================================

/// Match a literal at `offset`
pub fn match_characters(
    source: &str,
    offset: usize,
    literal: &str,
    kind: TokenKind,
) -> Option<Token> {
    let rest = source.get(offset..)?;
    if !literal.is_empty() && rest.starts_with(literal) {
        Some(Token::new(kind, offset, literal))
    } else {
        None
    }
}

/// Match an anchored pattern at `offset`; empty matches are rejected
pub fn match_pattern(
    source: &str,
    offset: usize,
    pattern: &Regex,
    kind: TokenKind,
) -> Option<Token> {
    let rest = source.get(offset..)?;
    let found = pattern.find(rest)?;
    if found.start() != 0 || found.is_empty() {
        return None;
    }
    Some(Token::new(kind, offset, found.as_str()))
}

/// Lazily compile a built-in pattern
///
/// Built-in patterns are constants covered by unit tests, so a failure here
/// is a programming error.
pub(crate) fn cached_pattern(cell: &'static OnceLock<Regex>, expression: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(expression)
            .unwrap_or_else(|e| panic!("invalid built-in pattern '{}': {}", expression, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_characters() {
        let token = match_characters("E[foo]", 1, "[", TokenKind::SimpleSelectorAttributeStart);
        assert_eq!(
            token,
            Some(Token::new(TokenKind::SimpleSelectorAttributeStart, 1, "["))
        );
        assert!(match_characters("E[foo]", 0, "[", TokenKind::SimpleSelectorAttributeStart).is_none());
        assert!(match_characters("E", 5, "E", TokenKind::SimpleSelectorType).is_none());
    }

    #[test]
    fn test_match_pattern_is_anchored() {
        let pattern = Regex::new(r"[a-z]+").unwrap();

        assert_eq!(
            match_pattern("E div", 2, &pattern, TokenKind::SimpleSelectorType),
            Some(Token::new(TokenKind::SimpleSelectorType, 2, "div"))
        );
        assert!(match_pattern("E div", 0, &pattern, TokenKind::SimpleSelectorType).is_none());
    }

    #[test]
    fn test_match_pattern_rejects_empty_match() {
        let pattern = Regex::new(r"^\s*").unwrap();
        assert!(match_pattern("div", 0, &pattern, TokenKind::Whitespace).is_none());
    }

    #[test]
    fn test_offset_inside_character_is_not_matched() {
        let pattern = Regex::new(r"^.").unwrap();
        assert!(match_pattern("é", 1, &pattern, TokenKind::StringCharacters).is_none());
    }
}
