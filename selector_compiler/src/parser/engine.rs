//! Recursive-descent consumption engine over a shared token stream
//!
//! Grammar rules borrow one [`Parser`] and consume tokens from the front of
//! its stream. Consumption is permanent: a failed rule leaves behind whatever
//! it already read.

use super::error::{ParseResult, ParserError};
use crate::config::compile_time::syntax::MAX_DELEGATION_DEPTH;
use crate::config::runtime::ParserPreferences;
use crate::tokens::{Expected, Token, TokenStream};
use crate::log_debug;

/// A grammar production producing an AST node
pub trait Grammar {
    type Ast;

    fn parse(&self, parser: &mut Parser<'_>) -> ParseResult<Self::Ast>;

    /// Rule name for logs
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

pub struct Parser<'t> {
    tokens: &'t mut TokenStream,
    depth: usize,
    preferences: ParserPreferences,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t mut TokenStream) -> Self {
        Self::with_preferences(tokens, ParserPreferences::default())
    }

    pub fn with_preferences(tokens: &'t mut TokenStream, preferences: ParserPreferences) -> Self {
        log_debug!("Creating selector parser", "tokens" => tokens.len());

        Self {
            tokens,
            depth: 0,
            preferences,
        }
    }

    /// Tokens not consumed yet
    pub fn tokens(&self) -> &TokenStream {
        &*self.tokens
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// Current delegation depth; 0 outside any delegated rule
    pub fn depth(&self) -> usize {
        self.depth
    }

    // ========================================================================
    // PRIMITIVES
    // ========================================================================

    /// Consume the front token if it matches one of `expected`
    pub fn read(&mut self, expected: impl Into<Expected>) -> ParseResult<Token> {
        let expected = expected.into();

        if self.matches_at(&expected, 0) {
            if let Some(token) = self.tokens.pop_front() {
                return Ok(token);
            }
        }

        Err(self.mismatch(expected, 0))
    }

    /// Token at `position` if it matches, without consuming anything
    ///
    /// Past the end of the stream with `allow_end_of_tokens` this returns
    /// [`Token::end_of_tokens`] instead of failing.
    pub fn lookahead(
        &self,
        expected: impl Into<Expected>,
        position: usize,
        allow_end_of_tokens: bool,
    ) -> ParseResult<Token> {
        let expected = expected.into();

        if allow_end_of_tokens && self.end_of_tokens(position) {
            return Ok(Token::end_of_tokens());
        }

        match self.tokens.get(position) {
            Some(token) if expected.matches(token) => Ok(token.clone()),
            _ => Err(self.mismatch(expected, position)),
        }
    }

    /// `lookahead(expected, 0, false)`
    pub fn peek(&self, expected: impl Into<Expected>) -> ParseResult<Token> {
        self.lookahead(expected, 0, false)
    }

    /// Whether no token exists at `position`
    pub fn end_of_tokens(&self, position: usize) -> bool {
        self.tokens.len() <= position
    }

    /// Drop the longest front run of tokens matching `expected`
    ///
    /// `TokenKind::Any` never matches here. Returns whether anything was removed.
    pub fn ignore(&mut self, expected: impl Into<Expected>) -> bool {
        let expected = expected.into();
        debug_assert!(
            !expected.is_wildcard(),
            "ignore() with a wildcard would drop the whole stream"
        );

        let count = self
            .tokens
            .iter()
            .take_while(|token| {
                expected
                    .kinds()
                    .iter()
                    .any(|kind| !kind.is_wildcard() && *kind == token.kind)
            })
            .count();

        self.tokens.drain_front(count);
        count > 0
    }

    // ========================================================================
    // DELEGATION
    // ========================================================================

    /// Run a default-constructed sub-grammar on the same stream
    pub fn delegate<G: Grammar + Default>(&mut self) -> ParseResult<G::Ast> {
        let grammar = G::default();
        self.delegate_to(&grammar)
    }

    /// Run `grammar` on the same stream
    pub fn delegate_to<A>(&mut self, grammar: &dyn Grammar<Ast = A>) -> ParseResult<A> {
        if self.depth >= MAX_DELEGATION_DEPTH {
            return Err(ParserError::DelegationTooDeep {
                depth: self.depth + 1,
            });
        }

        self.depth += 1;
        if self.preferences.log_delegation {
            log_debug!("Delegating to grammar",
                "grammar" => grammar.name(),
                "depth" => self.depth,
                "remaining" => self.tokens.len()
            );
        }

        let result = grammar.parse(self);
        self.depth -= 1;

        result
    }

    // ========================================================================
    // MATCHING
    // ========================================================================

    fn matches_at(&self, expected: &Expected, position: usize) -> bool {
        self.tokens
            .get(position)
            .is_some_and(|token| expected.matches(token))
    }

    fn mismatch(&self, expected: Expected, position: usize) -> ParserError {
        let error = match self.tokens.get(position) {
            Some(token) => ParserError::token_mismatch(token.clone(), expected),
            None => ParserError::unexpected_end_of_file(expected),
        };

        if self.preferences.log_mismatches {
            log_debug!("Token mismatch",
                "code" => error.error_code(),
                "position" => position,
                "error" => &error
            );
        }

        error
    }
}

impl std::fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("remaining", &self.tokens.len())
            .field("depth", &self.depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn stream(tokens: &[(TokenKind, usize, &str)]) -> TokenStream {
        tokens
            .iter()
            .map(|(kind, offset, value)| Token::new(*kind, *offset, *value))
            .collect()
    }

    fn e_warning() -> TokenStream {
        stream(&[
            (TokenKind::SimpleSelectorType, 0, "E"),
            (TokenKind::SimpleSelectorClass, 1, ".warning"),
        ])
    }

    #[test]
    fn test_read_consumes_one_matching_token() {
        let mut tokens = e_warning();
        let mut parser = Parser::new(&mut tokens);

        let token = parser.read(TokenKind::SimpleSelectorType).unwrap();
        assert_eq!(token, Token::new(TokenKind::SimpleSelectorType, 0, "E"));
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn test_read_accepts_any_alternative() {
        let mut tokens = e_warning();
        let mut parser = Parser::new(&mut tokens);

        parser.read(TokenKind::Any).unwrap();
        let token = parser
            .read([TokenKind::SimpleSelectorId, TokenKind::SimpleSelectorClass])
            .unwrap();
        assert_eq!(token.value, ".warning");
        assert!(parser.end_of_tokens(0));
    }

    #[test]
    fn test_read_on_empty_stream_is_end_of_file() {
        let mut tokens = TokenStream::new();
        let mut parser = Parser::new(&mut tokens);

        assert_eq!(
            parser.read(TokenKind::SimpleSelectorType),
            Err(ParserError::unexpected_end_of_file(TokenKind::SimpleSelectorType))
        );
    }

    #[test]
    fn test_read_mismatch_leaves_stream_untouched() {
        let mut tokens = stream(&[(TokenKind::SimpleSelectorClass, 0, ".warning")]);
        let mut parser = Parser::new(&mut tokens);

        assert_eq!(
            parser.read(TokenKind::SimpleSelectorType),
            Err(ParserError::token_mismatch(
                Token::new(TokenKind::SimpleSelectorClass, 0, ".warning"),
                TokenKind::SimpleSelectorType
            ))
        );
        assert_eq!(parser.remaining(), 1);
    }

    #[test]
    fn test_lookahead_does_not_consume() {
        let mut tokens = e_warning();
        let parser = Parser::new(&mut tokens);

        let token = parser
            .lookahead(TokenKind::SimpleSelectorClass, 1, false)
            .unwrap();
        assert_eq!(token.offset, 1);
        assert_matches!(
            parser.lookahead(TokenKind::SimpleSelectorId, 0, false),
            Err(ParserError::TokenMismatch { .. })
        );
        assert_eq!(parser.tokens(), &e_warning());
    }

    #[test]
    fn test_lookahead_past_end() {
        let mut tokens = e_warning();
        let parser = Parser::new(&mut tokens);

        assert_eq!(
            parser.lookahead(TokenKind::SimpleSelectorType, 2, true),
            Ok(Token::end_of_tokens())
        );
        assert_matches!(
            parser.lookahead(TokenKind::SimpleSelectorType, 2, false),
            Err(ParserError::UnexpectedEndOfFile { .. })
        );
        assert_eq!(
            parser.peek(TokenKind::SimpleSelectorType).map(|t| t.value),
            Ok("E".to_string())
        );
    }

    #[test]
    fn test_end_of_tokens() {
        let mut tokens = e_warning();
        let parser = Parser::new(&mut tokens);

        assert!(!parser.end_of_tokens(0));
        assert!(!parser.end_of_tokens(1));
        assert!(parser.end_of_tokens(2));
        assert!(parser.end_of_tokens(usize::MAX));
    }

    #[test]
    fn test_lookahead_at_largest_position() {
        let mut tokens = e_warning();
        let parser = Parser::new(&mut tokens);

        assert_eq!(
            parser.lookahead(TokenKind::SimpleSelectorType, usize::MAX, true),
            Ok(Token::end_of_tokens())
        );
        assert_matches!(
            parser.lookahead(TokenKind::SimpleSelectorType, usize::MAX, false),
            Err(ParserError::UnexpectedEndOfFile { .. })
        );
    }

    #[test]
    fn test_ignore_removes_longest_matching_prefix() {
        let mut tokens = stream(&[
            (TokenKind::Whitespace, 0, " "),
            (TokenKind::Separator, 1, ", "),
            (TokenKind::Whitespace, 3, " "),
            (TokenKind::SimpleSelectorType, 4, "E"),
            (TokenKind::Whitespace, 5, " "),
        ]);
        let mut parser = Parser::new(&mut tokens);

        assert!(parser.ignore([TokenKind::Whitespace, TokenKind::Separator]));
        assert_eq!(parser.remaining(), 2);
        assert!(!parser.ignore(TokenKind::Whitespace));
        assert_eq!(parser.remaining(), 2);
    }

    #[test]
    fn test_ignore_on_empty_stream() {
        let mut tokens = TokenStream::new();
        let mut parser = Parser::new(&mut tokens);

        assert!(!parser.ignore(TokenKind::Whitespace));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "wildcard")]
    fn test_ignore_rejects_wildcard() {
        let mut tokens = e_warning();
        Parser::new(&mut tokens).ignore(TokenKind::Any);
    }

    #[derive(Default)]
    struct TypeName;

    impl Grammar for TypeName {
        type Ast = String;

        fn parse(&self, parser: &mut Parser<'_>) -> ParseResult<String> {
            Ok(parser.read(TokenKind::SimpleSelectorType)?.value)
        }
    }

    /// Type selector followed by any number of classes
    #[derive(Default)]
    struct Compound;

    impl Grammar for Compound {
        type Ast = Vec<String>;

        fn parse(&self, parser: &mut Parser<'_>) -> ParseResult<Vec<String>> {
            let mut parts = vec![parser.delegate::<TypeName>()?];
            while parser
                .lookahead(TokenKind::SimpleSelectorClass, 0, true)?
                .is(TokenKind::SimpleSelectorClass)
            {
                parts.push(parser.read(TokenKind::SimpleSelectorClass)?.value);
            }
            Ok(parts)
        }
    }

    /// Type selector followed by exactly one class
    struct Pair;

    impl Grammar for Pair {
        type Ast = (String, String);

        fn parse(&self, parser: &mut Parser<'_>) -> ParseResult<(String, String)> {
            let name = parser.delegate::<TypeName>()?;
            let class = parser.read(TokenKind::SimpleSelectorClass)?;
            Ok((name, class.value))
        }
    }

    #[test]
    fn test_delegate_shares_stream_in_order() {
        let mut tokens = stream(&[
            (TokenKind::SimpleSelectorType, 0, "E"),
            (TokenKind::SimpleSelectorClass, 1, ".a"),
            (TokenKind::SimpleSelectorClass, 3, ".b"),
        ]);
        let mut parser = Parser::new(&mut tokens);

        assert_eq!(
            parser.delegate::<Compound>(),
            Ok(vec!["E".to_string(), ".a".to_string(), ".b".to_string()])
        );
        assert_eq!(parser.remaining(), 0);
        assert_eq!(parser.depth(), 0);
    }

    #[test]
    fn test_failed_delegation_does_not_roll_back() {
        let mut tokens = stream(&[
            (TokenKind::SimpleSelectorType, 0, "E"),
            (TokenKind::SimpleSelectorId, 1, "#x"),
        ]);
        let mut parser = Parser::new(&mut tokens);

        assert_matches!(
            parser.delegate_to(&Pair),
            Err(ParserError::TokenMismatch { ref actual, .. }) if actual.value == "#x"
        );
        assert_eq!(parser.remaining(), 1);
        assert_eq!(parser.depth(), 0);
    }

    /// Delegates to itself without consuming
    struct Runaway;

    impl Grammar for Runaway {
        type Ast = ();

        fn parse(&self, parser: &mut Parser<'_>) -> ParseResult<()> {
            parser.delegate_to(self)
        }
    }

    #[test]
    fn test_delegation_depth_is_bounded() {
        let mut tokens = e_warning();
        let mut parser = Parser::new(&mut tokens);

        assert_eq!(
            parser.delegate_to(&Runaway),
            Err(ParserError::DelegationTooDeep {
                depth: MAX_DELEGATION_DEPTH + 1
            })
        );
        assert_eq!(parser.depth(), 0);
    }
}
