//! Parser base engine
//!
//! Concrete selector grammars implement [`Grammar`] and drive a [`Parser`]
//! through `read`, `lookahead`, `ignore`, `end_of_tokens` and `delegate`.

pub mod engine;
pub mod error;

use crate::config::compile_time::syntax::MAX_DELEGATION_DEPTH;
use crate::config::runtime::ParserPreferences;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::{log_error, log_success};

pub use engine::{Grammar, Parser};
pub use error::{ParseResult, ParserError};

/// Run `grammar` as the entry rule over `tokens`
///
/// Tokens the grammar does not consume stay in the stream.
pub fn parse_with<A>(tokens: &mut TokenStream, grammar: &dyn Grammar<Ast = A>) -> ParseResult<A> {
    parse_with_preferences(tokens, grammar, ParserPreferences::default())
}

pub fn parse_with_preferences<A>(
    tokens: &mut TokenStream,
    grammar: &dyn Grammar<Ast = A>,
    preferences: ParserPreferences,
) -> ParseResult<A> {
    let total = tokens.len();
    let mut parser = Parser::with_preferences(tokens, preferences);

    match parser.delegate_to(grammar) {
        Ok(ast) => {
            log_success!(codes::success::AST_CONSTRUCTION_COMPLETE, "Selector parsed",
                "grammar" => grammar.name(),
                "consumed" => total - parser.remaining(),
                "remaining" => parser.remaining()
            );
            Ok(ast)
        }
        Err(err) => {
            let message = err.to_string();
            match err.span() {
                Some(span) => log_error!(err.error_code(), &message,
                    span = span,
                    "grammar" => grammar.name()
                ),
                None => log_error!(err.error_code(), &message,
                    "grammar" => grammar.name()
                ),
            }
            Err(err)
        }
    }
}

/// Check that parser codes are registered and limits are usable
pub fn validate_parser() -> Result<(), String> {
    for code in [
        codes::parser::UNEXPECTED_END_OF_FILE,
        codes::parser::TOKEN_MISMATCH,
        codes::parser::DELEGATION_TOO_DEEP,
        codes::parser::GRAMMAR_VIOLATION,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Parser error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_DELEGATION_DEPTH == 0 {
        return Err("MAX_DELEGATION_DEPTH cannot be zero".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{self, LogLevel, LoggingService};
    use crate::tokens::{Token, TokenKind};
    use std::sync::Arc;

    struct Universal;

    impl Grammar for Universal {
        type Ast = ();

        fn parse(&self, parser: &mut Parser<'_>) -> ParseResult<()> {
            parser.read(TokenKind::SimpleSelectorType).map(|_| ())
        }

        fn name(&self) -> &'static str {
            "universal"
        }
    }

    #[test]
    fn test_validate_parser() {
        assert!(validate_parser().is_ok());
    }

    #[test]
    fn test_parse_with_logs_outcome() {
        let memory = logging::service::create_test_logger();
        let service = Arc::new(LoggingService::new(memory.clone(), LogLevel::Info));

        logging::with_scoped_logger(service, || {
            let mut tokens = TokenStream::from(vec![Token::new(TokenKind::SimpleSelectorType, 0, "*")]);
            assert_eq!(parse_with(&mut tokens, &Universal), Ok(()));

            let mut empty = TokenStream::new();
            assert!(parse_with(&mut empty, &Universal).is_err());
        });

        assert!(memory.has_success_with_code(codes::success::AST_CONSTRUCTION_COMPLETE));
        assert!(memory.has_error_with_code(codes::parser::UNEXPECTED_END_OF_FILE));
    }
}
