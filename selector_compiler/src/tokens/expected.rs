//! Sets of acceptable token kinds used by parser matching

use super::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alternatives accepted at one parse position
///
/// `TokenKind::Any` accepts every token. Duplicates are dropped; order of
/// first appearance is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expected {
    kinds: Vec<TokenKind>,
}

impl Expected {
    pub fn new(kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self { kinds: unique }
    }

    pub fn any() -> Self {
        Self::new([TokenKind::Any])
    }

    pub fn kinds(&self) -> &[TokenKind] {
        &self.kinds
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_wildcard(&self) -> bool {
        self.contains(TokenKind::Any)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Whether `token` is accepted by any alternative
    pub fn matches(&self, token: &Token) -> bool {
        self.kinds
            .iter()
            .any(|kind| kind.is_wildcard() || *kind == token.kind)
    }
}

impl From<TokenKind> for Expected {
    fn from(kind: TokenKind) -> Self {
        Self::new([kind])
    }
}

impl From<&[TokenKind]> for Expected {
    fn from(kinds: &[TokenKind]) -> Self {
        Self::new(kinds.iter().copied())
    }
}

impl<const N: usize> From<[TokenKind; N]> for Expected {
    fn from(kinds: [TokenKind; N]) -> Self {
        Self::new(kinds)
    }
}

impl From<Vec<TokenKind>> for Expected {
    fn from(kinds: Vec<TokenKind>) -> Self {
        Self::new(kinds)
    }
}

impl From<&Expected> for Expected {
    fn from(expected: &Expected) -> Self {
        expected.clone()
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.kinds.iter().map(TokenKind::as_str).collect();
        f.write_str(&names.join(" | "))
    }
}
