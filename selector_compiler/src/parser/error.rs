//! Parser errors carrying the accepted kinds and the offending token

use crate::config::compile_time::syntax::MAX_DELEGATION_DEPTH;
use crate::logging::{codes, Code};
use crate::tokens::{Expected, Token};
use crate::utils::Span;

pub type ParseResult<T> = Result<T, ParserError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("Unexpected '{}' ({}) at offset {}, expected {expected}", .actual.value, .actual.kind, .actual.offset)]
    TokenMismatch { actual: Token, expected: Expected },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEndOfFile { expected: Expected },

    #[error("Grammar delegation nested too deeply: {depth} (max {MAX_DELEGATION_DEPTH})")]
    DelegationTooDeep { depth: usize },

    /// Raised by grammar rules for structural problems the token kinds alone don't catch
    #[error("Grammar violation: {message} at {span}")]
    GrammarViolation { message: String, span: Span },
}

impl ParserError {
    pub fn token_mismatch(actual: Token, expected: impl Into<Expected>) -> Self {
        Self::TokenMismatch {
            actual,
            expected: expected.into(),
        }
    }

    pub fn unexpected_end_of_file(expected: impl Into<Expected>) -> Self {
        Self::UnexpectedEndOfFile {
            expected: expected.into(),
        }
    }

    pub fn grammar_violation(message: impl Into<String>, token: &Token) -> Self {
        Self::GrammarViolation {
            message: message.into(),
            span: token.span(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::TokenMismatch { .. } => codes::parser::TOKEN_MISMATCH,
            Self::UnexpectedEndOfFile { .. } => codes::parser::UNEXPECTED_END_OF_FILE,
            Self::DelegationTooDeep { .. } => codes::parser::DELEGATION_TOO_DEEP,
            Self::GrammarViolation { .. } => codes::parser::GRAMMAR_VIOLATION,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Offending source range; `None` at end of input
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::TokenMismatch { actual, .. } => Some(actual.span()),
            Self::GrammarViolation { span, .. } => Some(*span),
            Self::UnexpectedEndOfFile { .. } | Self::DelegationTooDeep { .. } => None,
        }
    }

    pub fn expected(&self) -> Option<&Expected> {
        match self {
            Self::TokenMismatch { expected, .. } | Self::UnexpectedEndOfFile { expected } => {
                Some(expected)
            }
            _ => None,
        }
    }

    pub fn actual(&self) -> Option<&Token> {
        match self {
            Self::TokenMismatch { actual, .. } => Some(actual),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;

    #[test]
    fn test_mismatch_message_names_token_and_alternatives() {
        let err = ParserError::token_mismatch(
            Token::new(TokenKind::SimpleSelectorClass, 1, ".warning"),
            [TokenKind::SimpleSelectorType, TokenKind::SimpleSelectorId],
        );

        assert_eq!(
            err.to_string(),
            "Unexpected '.warning' (SIMPLESELECTOR_CLASS) at offset 1, expected SIMPLESELECTOR_TYPE | SIMPLESELECTOR_ID"
        );
        assert_eq!(err.span(), Some(Span::from_offsets(1, 9)));
        assert_eq!(err.error_code(), codes::parser::TOKEN_MISMATCH);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_end_of_file_has_no_span() {
        let err = ParserError::unexpected_end_of_file(TokenKind::SimpleSelectorType);

        assert_eq!(
            err.to_string(),
            "Unexpected end of input, expected SIMPLESELECTOR_TYPE"
        );
        assert_eq!(err.span(), None);
        assert_eq!(
            err.expected(),
            Some(&Expected::from(TokenKind::SimpleSelectorType))
        );
        assert!(err.actual().is_none());
    }

    #[test]
    fn test_grammar_violation_points_at_token() {
        let token = Token::new(TokenKind::PseudoClass, 1, ":bogus");
        let err = ParserError::grammar_violation("unknown pseudo-class", &token);

        assert_eq!(err.span(), Some(Span::from_offsets(1, 7)));
        assert_eq!(err.error_code(), codes::parser::GRAMMAR_VIOLATION);
        assert!(err.expected().is_none());
        assert!(err.to_string().starts_with("Grammar violation: unknown pseudo-class"));
    }

    #[test]
    fn test_delegation_depth_halts() {
        let err = ParserError::DelegationTooDeep { depth: 3 };
        assert!(err.requires_halt());
        assert!(!err.is_recoverable());
    }
}
