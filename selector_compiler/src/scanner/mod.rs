//! Context-stack scanner for CSS selectors
//!
//! A [`Scanner`] runs a root [`Status`] over the source and appends tokens to
//! a shared [`TokenStream`]. Nested contexts (attribute brackets, strings,
//! pseudo-class parameters) are entered and left as tokens are produced.

pub mod engine;
pub mod selector;
pub mod status;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::ScannerPreferences;
use crate::logging::codes;
use crate::tokens::TokenStream;

pub use engine::{ScanMetrics, Scanner, ScannerError};
pub use selector::{AttributeStatus, Quote, SelectorStatus, StringStatus};
pub use status::{match_characters, match_pattern, Status};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize a selector with the built-in selector contexts
pub fn tokenize(source: &str) -> Result<TokenStream, ScannerError> {
    tokenize_with_preferences(source, ScannerPreferences::default())
}

pub fn tokenize_with_preferences(
    source: &str,
    preferences: ScannerPreferences,
) -> Result<TokenStream, ScannerError> {
    let mut tokens = TokenStream::new();
    create_scanner_with_preferences(preferences).scan(&mut tokens, source)?;
    Ok(tokens)
}

/// Scanner rooted at [`SelectorStatus::root`]
pub fn create_scanner() -> Scanner {
    Scanner::new(Box::new(SelectorStatus::root()))
}

pub fn create_scanner_with_preferences(preferences: ScannerPreferences) -> Scanner {
    Scanner::with_preferences(Box::new(SelectorStatus::root()), preferences)
}

// ============================================================================
// MODULE VALIDATION
// ============================================================================

/// Check that scanner codes are registered and limits are usable
pub fn validate_scanner() -> Result<(), String> {
    let scanner_codes = [
        codes::scanner::SCANNER_STUCK,
        codes::scanner::ZERO_LENGTH_TOKEN,
        codes::scanner::WILDCARD_TOKEN,
        codes::scanner::OFFSET_MISMATCH,
        codes::scanner::SOURCE_TOO_LONG,
        codes::scanner::TOO_MANY_TOKENS,
        codes::scanner::CONTEXT_TOO_DEEP,
    ];

    for code in &scanner_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Scanner error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }
    if MAX_CONTEXT_DEPTH < 2 {
        return Err("MAX_CONTEXT_DEPTH must allow at least one nested context".to_string());
    }
    if MAX_SOURCE_LENGTH == 0 {
        return Err("MAX_SOURCE_LENGTH cannot be zero".to_string());
    }

    crate::log_debug!("Scanner limits validated",
        "max_source_length" => MAX_SOURCE_LENGTH,
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_context_depth" => MAX_CONTEXT_DEPTH
    );

    Ok(())
}
