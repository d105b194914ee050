//! Selector token kinds and the scanned token value
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::Span;

/// Token kinds produced by the selector lexical contexts
///
/// `Any` is reserved for parser matching and is never produced by a scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // === WILDCARD ===
    Any,

    // === LAYOUT ===
    Whitespace,

    // === SIMPLE SELECTORS ===
    #[serde(rename = "SIMPLESELECTOR_TYPE")]
    SimpleSelectorType,
    #[serde(rename = "SIMPLESELECTOR_CLASS")]
    SimpleSelectorClass,
    #[serde(rename = "SIMPLESELECTOR_ID")]
    SimpleSelectorId,

    // === ATTRIBUTE SELECTORS ===
    #[serde(rename = "SIMPLESELECTOR_ATTRIBUTE_START")]
    SimpleSelectorAttributeStart,
    #[serde(rename = "SIMPLESELECTOR_ATTRIBUTE_OPERATOR")]
    SimpleSelectorAttributeOperator,
    #[serde(rename = "SIMPLESELECTOR_ATTRIBUTE_END")]
    SimpleSelectorAttributeEnd,

    // === STRINGS ===
    StringSingleQuoteStart,
    StringSingleQuoteEnd,
    StringDoubleQuoteStart,
    StringDoubleQuoteEnd,
    StringCharacters,
    StringEscapedCharacter,

    // === PSEUDO CLASSES AND ELEMENTS ===
    #[serde(rename = "PSEUDOCLASS")]
    PseudoClass,
    #[serde(rename = "PSEUDOCLASS_PARAMETERS_START")]
    PseudoClassParametersStart,
    #[serde(rename = "PSEUDOCLASS_PARAMETERS_END")]
    PseudoClassParametersEnd,
    #[serde(rename = "PSEUDOCLASS_POSITION")]
    PseudoClassPosition,
    #[serde(rename = "PSEUDOELEMENT")]
    PseudoElement,

    // === STRUCTURE ===
    SelectorCombinator,
    Separator,
}

impl TokenKind {
    /// Every kind, in declaration order
    pub const ALL: [TokenKind; 21] = [
        TokenKind::Any,
        TokenKind::Whitespace,
        TokenKind::SimpleSelectorType,
        TokenKind::SimpleSelectorClass,
        TokenKind::SimpleSelectorId,
        TokenKind::SimpleSelectorAttributeStart,
        TokenKind::SimpleSelectorAttributeOperator,
        TokenKind::SimpleSelectorAttributeEnd,
        TokenKind::StringSingleQuoteStart,
        TokenKind::StringSingleQuoteEnd,
        TokenKind::StringDoubleQuoteStart,
        TokenKind::StringDoubleQuoteEnd,
        TokenKind::StringCharacters,
        TokenKind::StringEscapedCharacter,
        TokenKind::PseudoClass,
        TokenKind::PseudoClassParametersStart,
        TokenKind::PseudoClassParametersEnd,
        TokenKind::PseudoClassPosition,
        TokenKind::PseudoElement,
        TokenKind::SelectorCombinator,
        TokenKind::Separator,
    ];

    /// Upper snake case name used in token rendering
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Any => "ANY",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::SimpleSelectorType => "SIMPLESELECTOR_TYPE",
            TokenKind::SimpleSelectorClass => "SIMPLESELECTOR_CLASS",
            TokenKind::SimpleSelectorId => "SIMPLESELECTOR_ID",
            TokenKind::SimpleSelectorAttributeStart => "SIMPLESELECTOR_ATTRIBUTE_START",
            TokenKind::SimpleSelectorAttributeOperator => "SIMPLESELECTOR_ATTRIBUTE_OPERATOR",
            TokenKind::SimpleSelectorAttributeEnd => "SIMPLESELECTOR_ATTRIBUTE_END",
            TokenKind::StringSingleQuoteStart => "STRING_SINGLE_QUOTE_START",
            TokenKind::StringSingleQuoteEnd => "STRING_SINGLE_QUOTE_END",
            TokenKind::StringDoubleQuoteStart => "STRING_DOUBLE_QUOTE_START",
            TokenKind::StringDoubleQuoteEnd => "STRING_DOUBLE_QUOTE_END",
            TokenKind::StringCharacters => "STRING_CHARACTERS",
            TokenKind::StringEscapedCharacter => "STRING_ESCAPED_CHARACTER",
            TokenKind::PseudoClass => "PSEUDOCLASS",
            TokenKind::PseudoClassParametersStart => "PSEUDOCLASS_PARAMETERS_START",
            TokenKind::PseudoClassParametersEnd => "PSEUDOCLASS_PARAMETERS_END",
            TokenKind::PseudoClassPosition => "PSEUDOCLASS_POSITION",
            TokenKind::PseudoElement => "PSEUDOELEMENT",
            TokenKind::SelectorCombinator => "SELECTOR_COMBINATOR",
            TokenKind::Separator => "SEPARATOR",
        }
    }

    pub fn from_name(name: &str) -> Option<TokenKind> {
        TokenKind::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, TokenKind::Any)
    }

    pub fn token_class(&self) -> TokenClass {
        match self {
            TokenKind::Any => TokenClass::Wildcard,
            TokenKind::Whitespace => TokenClass::Layout,
            TokenKind::SimpleSelectorType
            | TokenKind::SimpleSelectorClass
            | TokenKind::SimpleSelectorId
            | TokenKind::PseudoClass
            | TokenKind::PseudoElement => TokenClass::Selector,
            TokenKind::SimpleSelectorAttributeStart
            | TokenKind::SimpleSelectorAttributeOperator
            | TokenKind::SimpleSelectorAttributeEnd => TokenClass::Attribute,
            TokenKind::StringSingleQuoteStart
            | TokenKind::StringSingleQuoteEnd
            | TokenKind::StringDoubleQuoteStart
            | TokenKind::StringDoubleQuoteEnd
            | TokenKind::StringCharacters
            | TokenKind::StringEscapedCharacter => TokenClass::String,
            TokenKind::PseudoClassParametersStart
            | TokenKind::PseudoClassParametersEnd
            | TokenKind::PseudoClassPosition => TokenClass::Parameters,
            TokenKind::SelectorCombinator | TokenKind::Separator => TokenClass::Structure,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse grouping of token kinds, counted per scan in `ScanMetrics`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Wildcard,
    Layout,
    Selector,
    Attribute,
    String,
    Parameters,
    Structure,
}

/// A classified slice of selector source
///
/// `offset` is the byte offset of the first byte of `value` within the
/// scanned source. Tokens are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize, value: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            value: value.into(),
        }
    }

    /// Synthetic token returned by lookahead past the end of the stream
    pub fn end_of_tokens() -> Self {
        Self::new(TokenKind::Any, 0, "")
    }

    /// Byte length of the value
    pub fn length(&self) -> usize {
        self.value.len()
    }

    /// Byte offset just past the token
    pub fn end(&self) -> usize {
        self.offset + self.length()
    }

    pub fn span(&self) -> Span {
        Span::from_offsets(self.offset, self.end())
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TOKEN::{} @{} '{}'", self.kind, self.offset, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rendering() {
        let token = Token::new(TokenKind::SelectorCombinator, 1, " > ");
        assert_eq!(token.to_string(), "TOKEN::SELECTOR_COMBINATOR @1 ' > '");
        assert_eq!(token.length(), 3);
        assert_eq!(token.end(), 4);
        assert_eq!(token.span(), Span::from_offsets(1, 4));
    }

    #[test]
    fn test_length_counts_bytes() {
        let token = Token::new(TokenKind::StringCharacters, 0, "héllo");
        assert_eq!(token.length(), 6);
    }

    #[test]
    fn test_end_of_tokens_marker() {
        let token = Token::end_of_tokens();
        assert_eq!(token.kind, TokenKind::Any);
        assert_eq!(token.offset, 0);
        assert_eq!(token.length(), 0);
    }

    #[test]
    fn test_kind_names_round_trip_through_lookup() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("SIMPE_SELECTOR_ID"), None);
    }

    #[test]
    fn test_serde_names_match_rendering() {
        for kind in TokenKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_token_classes() {
        assert_eq!(TokenKind::Any.token_class(), TokenClass::Wildcard);
        assert_eq!(TokenKind::SimpleSelectorId.token_class(), TokenClass::Selector);
        assert_eq!(TokenKind::StringEscapedCharacter.token_class(), TokenClass::String);
        assert_eq!(TokenKind::Separator.token_class(), TokenClass::Structure);
    }
}
