//! End-to-end selector compilation: source to tokens to AST

mod error;
mod info;
mod result;
mod validation;

pub use error::SelectorError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use result::ScanReport;
pub use validation::validate_pipeline;

use crate::logging::codes;
use crate::parser::{self, Grammar};
use crate::scanner;
use crate::tokens::TokenStream;
use crate::utils::SourceMap;
use std::time::Instant;

/// Tokenize a selector with the built-in lexical contexts
pub fn tokenize(source: &str) -> Result<TokenStream, SelectorError> {
    Ok(scanner::tokenize(source)?)
}

/// Tokenize and keep the scan metrics
pub fn scan(source: &str) -> Result<ScanReport, SelectorError> {
    let start_time = Instant::now();
    let mut scanner = scanner::create_scanner();
    let mut tokens = TokenStream::new();

    scanner.scan(&mut tokens, source)?;

    let report = ScanReport {
        source: source.to_string(),
        tokens,
        metrics: scanner.metrics().clone(),
        duration: start_time.elapsed(),
    };
    report.log_success();

    Ok(report)
}

/// Run `grammar` as the entry rule over an existing stream
pub fn parse_tokens<A>(
    tokens: &mut TokenStream,
    grammar: &dyn Grammar<Ast = A>,
) -> Result<A, SelectorError> {
    Ok(parser::parse_with(tokens, grammar)?)
}

/// Tokenize `source` and parse it with `grammar`
///
/// Tokens the grammar leaves unconsumed are reported as a warning, not an error.
pub fn compile<A>(source: &str, grammar: &dyn Grammar<Ast = A>) -> Result<A, SelectorError> {
    let start_time = Instant::now();

    let mut tokens = tokenize(source)?;
    let token_count = tokens.len();
    let ast = parse_tokens(&mut tokens, grammar)?;

    if let Some(first) = tokens.front() {
        crate::log_warning!("Grammar left tokens unconsumed",
            "grammar" => grammar.name(),
            "remaining" => tokens.len(),
            "first" => first
        );
    }

    crate::log_success!(codes::success::COMPILATION_COMPLETE, "Selector compiled",
        "grammar" => grammar.name(),
        "tokens" => token_count,
        "duration_us" => start_time.elapsed().as_micros()
    );

    Ok(ast)
}

/// Caret diagnostic for `error` against `source`
///
/// Errors without a source range point just past the end of the input.
pub fn render_error(source: &str, error: &SelectorError) -> String {
    let source_map = SourceMap::new(source);
    let span = error
        .span()
        .unwrap_or_else(|| source_map.span_of(source.len(), 0));

    source_map.format_error(&span, &format!("[{}] {}", error.error_code(), error))
}
