//! Token tables for the built-in selector contexts

use selector_compiler::scanner::{self, Scanner, ScannerError, SelectorStatus};
use selector_compiler::tokens::TokenStream;
use selector_compiler::TokenKind;
use assert_matches::assert_matches;

fn rendered(source: &str) -> Vec<String> {
    scanner::tokenize(source)
        .unwrap_or_else(|e| panic!("failed to tokenize {:?}: {}", source, e))
        .iter()
        .map(|token| token.to_string())
        .collect()
}

fn assert_tokens(source: &str, expected: &[&str]) {
    assert_eq!(rendered(source), expected, "token table for {:?}", source);
}

#[test]
fn universal_and_type_selectors() {
    assert_tokens("*", &["TOKEN::SIMPLESELECTOR_TYPE @0 '*'"]);
    assert_tokens("E", &["TOKEN::SIMPLESELECTOR_TYPE @0 'E'"]);
    assert_tokens("test", &["TOKEN::SIMPLESELECTOR_TYPE @0 'test'"]);
}

#[test]
fn attribute_presence() {
    assert_tokens(
        "E[foo]",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
            "TOKEN::SIMPLESELECTOR_ATTRIBUTE_START @1 '['",
            "TOKEN::STRING_CHARACTERS @2 'foo'",
            "TOKEN::SIMPLESELECTOR_ATTRIBUTE_END @5 ']'",
        ],
    );
}

#[test]
fn attribute_equality() {
    assert_tokens(
        r#"E[foo="bar"]"#,
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
            "TOKEN::SIMPLESELECTOR_ATTRIBUTE_START @1 '['",
            "TOKEN::STRING_CHARACTERS @2 'foo'",
            "TOKEN::SIMPLESELECTOR_ATTRIBUTE_OPERATOR @5 '='",
            "TOKEN::STRING_DOUBLE_QUOTE_START @6 '\"'",
            "TOKEN::STRING_CHARACTERS @7 'bar'",
            "TOKEN::STRING_DOUBLE_QUOTE_END @10 '\"'",
            "TOKEN::SIMPLESELECTOR_ATTRIBUTE_END @11 ']'",
        ],
    );
}

#[test]
fn attribute_operators() {
    for operator in ["~=", "^=", "$=", "*=", "|="] {
        let source = format!(r#"E[foo{}"bar"]"#, operator);
        let operator_token = format!("TOKEN::SIMPLESELECTOR_ATTRIBUTE_OPERATOR @5 '{}'", operator);

        assert_tokens(
            &source,
            &[
                "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
                "TOKEN::SIMPLESELECTOR_ATTRIBUTE_START @1 '['",
                "TOKEN::STRING_CHARACTERS @2 'foo'",
                &operator_token,
                "TOKEN::STRING_DOUBLE_QUOTE_START @7 '\"'",
                "TOKEN::STRING_CHARACTERS @8 'bar'",
                "TOKEN::STRING_DOUBLE_QUOTE_END @11 '\"'",
                "TOKEN::SIMPLESELECTOR_ATTRIBUTE_END @12 ']'",
            ],
        );
    }
}

#[test]
fn pseudo_class_class_and_id() {
    assert_tokens(
        "E:root",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
            "TOKEN::PSEUDOCLASS @1 ':root'",
        ],
    );
    assert_tokens(
        "E.warning",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
            "TOKEN::SIMPLESELECTOR_CLASS @1 '.warning'",
        ],
    );
    assert_tokens(
        "E#myid",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
            "TOKEN::SIMPLESELECTOR_ID @1 '#myid'",
        ],
    );
}

#[test]
fn combinators() {
    assert_tokens(
        "E F",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
            "TOKEN::WHITESPACE @1 ' '",
            "TOKEN::SIMPLESELECTOR_TYPE @2 'F'",
        ],
    );

    for combinator in [">", "+", "~"] {
        let source = format!("E {} F", combinator);
        let combinator_token = format!("TOKEN::SELECTOR_COMBINATOR @1 ' {} '", combinator);
        assert_tokens(
            &source,
            &[
                "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
                &combinator_token,
                "TOKEN::SIMPLESELECTOR_TYPE @4 'F'",
            ],
        );
    }

    assert_tokens(
        "div > span",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'div'",
            "TOKEN::SELECTOR_COMBINATOR @3 ' > '",
            "TOKEN::SIMPLESELECTOR_TYPE @6 'span'",
        ],
    );
    assert_tokens(
        "div span",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'div'",
            "TOKEN::WHITESPACE @3 ' '",
            "TOKEN::SIMPLESELECTOR_TYPE @4 'span'",
        ],
    );
}

#[test]
fn single_quoted_string_after_type() {
    assert_tokens(
        "test'string'",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'test'",
            "TOKEN::STRING_SINGLE_QUOTE_START @4 '''",
            "TOKEN::STRING_CHARACTERS @5 'string'",
            "TOKEN::STRING_SINGLE_QUOTE_END @11 '''",
        ],
    );
}

#[test]
fn pseudo_class_parameters_keep_absolute_offsets() {
    assert_tokens(
        "div#id.class1.class2:has(span.title)",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'div'",
            "TOKEN::SIMPLESELECTOR_ID @3 '#id'",
            "TOKEN::SIMPLESELECTOR_CLASS @6 '.class1'",
            "TOKEN::SIMPLESELECTOR_CLASS @13 '.class2'",
            "TOKEN::PSEUDOCLASS @20 ':has'",
            "TOKEN::PSEUDOCLASS_PARAMETERS_START @24 '('",
            "TOKEN::SIMPLESELECTOR_TYPE @25 'span'",
            "TOKEN::SIMPLESELECTOR_CLASS @29 '.title'",
            "TOKEN::PSEUDOCLASS_PARAMETERS_END @35 ')'",
        ],
    );
}

#[test]
fn position_needs_a_terminator_inside_parameters() {
    assert_tokens(
        "E:not(n.a)",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'E'",
            "TOKEN::PSEUDOCLASS @1 ':not'",
            "TOKEN::PSEUDOCLASS_PARAMETERS_START @5 '('",
            "TOKEN::SIMPLESELECTOR_TYPE @6 'n'",
            "TOKEN::SIMPLESELECTOR_CLASS @7 '.a'",
            "TOKEN::PSEUDOCLASS_PARAMETERS_END @9 ')'",
        ],
    );
    assert_tokens(
        "li:nth-child(2n + 1)",
        &[
            "TOKEN::SIMPLESELECTOR_TYPE @0 'li'",
            "TOKEN::PSEUDOCLASS @2 ':nth-child'",
            "TOKEN::PSEUDOCLASS_PARAMETERS_START @12 '('",
            "TOKEN::PSEUDOCLASS_POSITION @13 '2n + 1'",
            "TOKEN::PSEUDOCLASS_PARAMETERS_END @19 ')'",
        ],
    );
}

#[test]
fn tokens_cover_the_source_contiguously() {
    let sources = [
        "div#id.class1.class2:has(span.title)",
        r#"a[href^='http'][title~="x \"y\""] > li:nth-child(2n+1), p::before"#,
        "ul li ~ li + li",
    ];

    for source in sources {
        let tokens = scanner::tokenize(source).unwrap();
        let mut cursor = 0;
        for token in &tokens {
            assert_eq!(token.offset, cursor, "gap before {} in {:?}", token, source);
            assert!(token.length() > 0);
            cursor = token.end();
        }
        assert_eq!(cursor, source.len());
        assert_eq!(tokens.iter().map(|t| t.value.as_str()).collect::<String>(), source);
    }
}

#[test]
fn unclassifiable_input_stops_the_scan() {
    let mut tokens = TokenStream::new();
    let mut scanner = Scanner::new(Box::new(SelectorStatus::root()));

    let result = scanner.scan(&mut tokens, "div > @media");
    assert_matches!(
        result,
        Err(ScannerError::Stuck { offset: 6, ref remainder, status: "selector" }) if remainder == "@media"
    );
    assert_eq!(
        tokens.kinds(),
        vec![TokenKind::SimpleSelectorType, TokenKind::SelectorCombinator]
    );
}

#[test]
fn unterminated_string_ends_without_closing_token() {
    let tokens = scanner::tokenize("E[foo='bar").unwrap();
    assert_eq!(tokens.kinds().last(), Some(&TokenKind::StringCharacters));
}
