//! Built-in lexical contexts for CSS selectors
//!
//! [`SelectorStatus`] is the root context. Attribute brackets, quoted strings
//! and pseudo-class parameter lists each open a nested context that ends on
//! its closing token.

use super::status::{cached_pattern, match_characters, match_pattern, Status};
use crate::tokens::{Token, TokenKind};
use regex::Regex;
use std::sync::OnceLock;

const IDENT: &str = r"-?[^\W\d][\w-]*";

static COMBINATOR: OnceLock<Regex> = OnceLock::new();
static SEPARATOR: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();
static TYPE: OnceLock<Regex> = OnceLock::new();
static CLASS: OnceLock<Regex> = OnceLock::new();
static ID: OnceLock<Regex> = OnceLock::new();
static PSEUDO_CLASS: OnceLock<Regex> = OnceLock::new();
static PSEUDO_ELEMENT: OnceLock<Regex> = OnceLock::new();
static POSITION: OnceLock<Regex> = OnceLock::new();
static ATTRIBUTE_OPERATOR: OnceLock<Regex> = OnceLock::new();
static ATTRIBUTE_NAME: OnceLock<Regex> = OnceLock::new();
static ESCAPED_CHARACTER: OnceLock<Regex> = OnceLock::new();
static SINGLE_QUOTED_CHARACTERS: OnceLock<Regex> = OnceLock::new();
static DOUBLE_QUOTED_CHARACTERS: OnceLock<Regex> = OnceLock::new();

fn whitespace() -> &'static Regex {
    cached_pattern(&WHITESPACE, r"^\s+")
}

/// Quote character opening a string, as its start token
fn string_start(source: &str, offset: usize) -> Option<Token> {
    match_characters(source, offset, "'", TokenKind::StringSingleQuoteStart)
        .or_else(|| match_characters(source, offset, "\"", TokenKind::StringDoubleQuoteStart))
}

fn string_status_for(token: &Token) -> Option<Box<dyn Status>> {
    match token.kind {
        TokenKind::StringSingleQuoteStart => Some(Box::new(StringStatus::single())),
        TokenKind::StringDoubleQuoteStart => Some(Box::new(StringStatus::double())),
        _ => None,
    }
}

// ============================================================================
// SELECTOR CONTEXT
// ============================================================================

/// Selector context; `in_parameters` marks the body of `:pseudo(...)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorStatus {
    pub in_parameters: bool,
}

impl SelectorStatus {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parameters() -> Self {
        Self {
            in_parameters: true,
        }
    }

    /// `an+b`, signed integers, `odd` and `even`, ending at whitespace, `)` or end of input
    fn position(&self, source: &str, offset: usize) -> Option<Token> {
        let pattern = cached_pattern(
            &POSITION,
            r"^(?:[+-]?\d*n(?:\s*[+-]\s*\d+)?|[+-]?\d+|odd|even)",
        );
        let token = match_pattern(source, offset, pattern, TokenKind::PseudoClassPosition)?;
        let terminated = source[token.end()..]
            .chars()
            .next()
            .map_or(true, |ch| ch.is_whitespace() || ch == ')');

        terminated.then_some(token)
    }
}

impl Status for SelectorStatus {
    fn get_token(&self, source: &str, offset: usize) -> Option<Token> {
        if self.in_parameters {
            if let Some(token) =
                match_characters(source, offset, ")", TokenKind::PseudoClassParametersEnd)
            {
                return Some(token);
            }
            if let Some(token) = self.position(source, offset) {
                return Some(token);
            }
        }

        let combinator = cached_pattern(&COMBINATOR, r"^\s*[>+~]\s*");
        let separator = cached_pattern(&SEPARATOR, r"^\s*,\s*");
        let type_selector = cached_pattern(&TYPE, &format!(r"^(?:\*|{})", IDENT));
        let class = cached_pattern(&CLASS, &format!(r"^\.{}", IDENT));
        let id = cached_pattern(&ID, r"^#[\w-]+");
        let pseudo_element = cached_pattern(&PSEUDO_ELEMENT, &format!(r"^::{}", IDENT));
        let pseudo_class = cached_pattern(&PSEUDO_CLASS, &format!(r"^:{}", IDENT));

        match_pattern(source, offset, combinator, TokenKind::SelectorCombinator)
            .or_else(|| match_pattern(source, offset, separator, TokenKind::Separator))
            .or_else(|| match_pattern(source, offset, whitespace(), TokenKind::Whitespace))
            .or_else(|| match_pattern(source, offset, type_selector, TokenKind::SimpleSelectorType))
            .or_else(|| match_pattern(source, offset, class, TokenKind::SimpleSelectorClass))
            .or_else(|| match_pattern(source, offset, id, TokenKind::SimpleSelectorId))
            .or_else(|| match_pattern(source, offset, pseudo_element, TokenKind::PseudoElement))
            .or_else(|| match_pattern(source, offset, pseudo_class, TokenKind::PseudoClass))
            .or_else(|| {
                match_characters(source, offset, "(", TokenKind::PseudoClassParametersStart)
            })
            .or_else(|| {
                match_characters(source, offset, "[", TokenKind::SimpleSelectorAttributeStart)
            })
            .or_else(|| string_start(source, offset))
    }

    fn is_end_token(&self, token: &Token) -> bool {
        self.in_parameters && token.kind == TokenKind::PseudoClassParametersEnd
    }

    fn get_new_status(&self, token: &Token) -> Option<Box<dyn Status>> {
        match token.kind {
            TokenKind::PseudoClassParametersStart => Some(Box::new(SelectorStatus::parameters())),
            TokenKind::SimpleSelectorAttributeStart => Some(Box::new(AttributeStatus)),
            _ => string_status_for(token),
        }
    }

    fn name(&self) -> &'static str {
        if self.in_parameters {
            "selector-parameters"
        } else {
            "selector"
        }
    }
}

// ============================================================================
// ATTRIBUTE CONTEXT
// ============================================================================

/// Body of `[name op value]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeStatus;

impl Status for AttributeStatus {
    fn get_token(&self, source: &str, offset: usize) -> Option<Token> {
        let operator = cached_pattern(&ATTRIBUTE_OPERATOR, r"^[~^$*|]?=");
        let name = cached_pattern(&ATTRIBUTE_NAME, r"^[\w-]+");

        match_characters(source, offset, "]", TokenKind::SimpleSelectorAttributeEnd)
            .or_else(|| match_pattern(source, offset, whitespace(), TokenKind::Whitespace))
            .or_else(|| {
                match_pattern(source, offset, operator, TokenKind::SimpleSelectorAttributeOperator)
            })
            .or_else(|| match_pattern(source, offset, name, TokenKind::StringCharacters))
            .or_else(|| string_start(source, offset))
    }

    fn is_end_token(&self, token: &Token) -> bool {
        token.kind == TokenKind::SimpleSelectorAttributeEnd
    }

    fn get_new_status(&self, token: &Token) -> Option<Box<dyn Status>> {
        string_status_for(token)
    }

    fn name(&self) -> &'static str {
        "attribute"
    }
}

// ============================================================================
// STRING CONTEXT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub fn as_char(&self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// Inside a quoted string, after the opening quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringStatus {
    quote: Quote,
}

impl StringStatus {
    pub fn single() -> Self {
        Self {
            quote: Quote::Single,
        }
    }

    pub fn double() -> Self {
        Self {
            quote: Quote::Double,
        }
    }

    pub fn quote(&self) -> Quote {
        self.quote
    }

    fn end_kind(&self) -> TokenKind {
        match self.quote {
            Quote::Single => TokenKind::StringSingleQuoteEnd,
            Quote::Double => TokenKind::StringDoubleQuoteEnd,
        }
    }
}

impl Status for StringStatus {
    fn get_token(&self, source: &str, offset: usize) -> Option<Token> {
        let characters = match self.quote {
            Quote::Single => cached_pattern(&SINGLE_QUOTED_CHARACTERS, r"^[^'\\]+"),
            Quote::Double => cached_pattern(&DOUBLE_QUOTED_CHARACTERS, r#"^[^"\\]+"#),
        };
        let escaped = cached_pattern(&ESCAPED_CHARACTER, r"^\\(?s:.)");
        let quote = self.quote.as_char().to_string();

        match_characters(source, offset, &quote, self.end_kind())
            .or_else(|| match_pattern(source, offset, escaped, TokenKind::StringEscapedCharacter))
            .or_else(|| match_pattern(source, offset, characters, TokenKind::StringCharacters))
    }

    fn is_end_token(&self, token: &Token) -> bool {
        token.kind == self.end_kind()
    }

    fn get_new_status(&self, _token: &Token) -> Option<Box<dyn Status>> {
        None
    }

    fn name(&self) -> &'static str {
        match self.quote {
            Quote::Single => "single-quoted-string",
            Quote::Double => "double-quoted-string",
        }
    }
}
