//! Consolidated error codes and classification system
//!
//! Single source of truth for all scanner and parser codes, their metadata,
//! and the classification helpers used by error types and log events.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

/// Scanner (lexical context stack) error codes
pub mod scanner {
    use super::Code;

    pub const SCANNER_STUCK: Code = Code::new("E020");
    pub const ZERO_LENGTH_TOKEN: Code = Code::new("E021");
    pub const WILDCARD_TOKEN: Code = Code::new("E022");
    pub const OFFSET_MISMATCH: Code = Code::new("E023");
    pub const SOURCE_TOO_LONG: Code = Code::new("E024");
    pub const TOO_MANY_TOKENS: Code = Code::new("E025");
    pub const CONTEXT_TOO_DEEP: Code = Code::new("E026");
}

/// Parser (token stream consumption) error codes
pub mod parser {
    use super::Code;

    pub const UNEXPECTED_END_OF_FILE: Code = Code::new("E040");
    pub const TOKEN_MISMATCH: Code = Code::new("E041");
    pub const DELEGATION_TOO_DEEP: Code = Code::new("E042");
    pub const GRAMMAR_VIOLATION: Code = Code::new("E043");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
    pub const COMPILATION_COMPLETE: Code = Code::new("I050");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the failing selector",
            ),
            // Scanner errors
            ErrorMetadata::new(
                "E020",
                "Scanner",
                Severity::High,
                false,
                true,
                "Input could not be classified in the active lexical context",
                "Check the selector near the reported offset for unsupported characters",
            ),
            ErrorMetadata::new(
                "E021",
                "Scanner",
                Severity::Critical,
                false,
                true,
                "Lexical context produced a zero-length token",
                "Fix the lexical context: every token must consume input",
            ),
            ErrorMetadata::new(
                "E022",
                "Scanner",
                Severity::Critical,
                false,
                true,
                "Lexical context produced the reserved wildcard token kind",
                "Fix the lexical context: ANY is only valid for parser matching",
            ),
            ErrorMetadata::new(
                "E023",
                "Scanner",
                Severity::Critical,
                false,
                true,
                "Lexical context produced a token at the wrong offset",
                "Fix the lexical context: tokens must start at the requested offset",
            ),
            ErrorMetadata::new(
                "E024",
                "Scanner",
                Severity::Medium,
                false,
                true,
                "Selector source exceeds the maximum length",
                "Shorten the selector or raise lexical.max_source_length",
            ),
            ErrorMetadata::new(
                "E025",
                "Scanner",
                Severity::Medium,
                false,
                true,
                "Selector produced too many tokens",
                "Split the selector or raise lexical.max_token_count",
            ),
            ErrorMetadata::new(
                "E026",
                "Scanner",
                Severity::High,
                false,
                true,
                "Lexical contexts nested too deeply",
                "Reduce nesting or check for a context that re-enters itself",
            ),
            // Parser errors
            ErrorMetadata::new(
                "E040",
                "Parser",
                Severity::High,
                true,
                false,
                "Token stream ended while more input was expected",
                "Complete the selector; see the expected token kinds",
            ),
            ErrorMetadata::new(
                "E041",
                "Parser",
                Severity::High,
                true,
                false,
                "Token does not match any of the expected kinds",
                "Check the selector at the reported offset against the expected token kinds",
            ),
            ErrorMetadata::new(
                "E042",
                "Parser",
                Severity::Critical,
                false,
                true,
                "Grammar delegation nested too deeply",
                "Check for a grammar rule that delegates without consuming tokens",
            ),
            ErrorMetadata::new(
                "E043",
                "Parser",
                Severity::High,
                true,
                false,
                "Token sequence violates the grammar",
                "Check the selector structure",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

/// Get complete metadata for an error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            scanner::SCANNER_STUCK,
            scanner::ZERO_LENGTH_TOKEN,
            scanner::WILDCARD_TOKEN,
            scanner::OFFSET_MISMATCH,
            scanner::SOURCE_TOO_LONG,
            scanner::TOO_MANY_TOKENS,
            scanner::CONTEXT_TOO_DEEP,
            parser::UNEXPECTED_END_OF_FILE,
            parser::TOKEN_MISMATCH,
            parser::DELEGATION_TOO_DEEP,
            parser::GRAMMAR_VIOLATION,
        ];

        for code in all {
            let metadata = get_error_metadata(code.as_str());
            assert!(metadata.is_some(), "missing metadata for {}", code);
            assert_eq!(metadata.unwrap().code, code.as_str());
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E020"), "Scanner");
        assert_eq!(get_category("E041"), "Parser");
        assert!(requires_halt("E020"));
        assert!(is_recoverable("E041"));
        assert_eq!(get_severity("ERR001"), Severity::Critical);
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_action("X999"), "No specific action available");
        assert!(is_recoverable("X999"));
        assert!(!requires_halt("X999"));
    }
}
