use crate::logging::Code;
use crate::parser::ParserError;
use crate::scanner::ScannerError;
use crate::utils::Span;

/// Errors from any stage of selector compilation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Tokenization failed: {0}")]
    Scanner(#[from] ScannerError),

    #[error("Parsing failed: {0}")]
    Parser(#[from] ParserError),
}

impl SelectorError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Scanner(err) => err.error_code(),
            Self::Parser(err) => err.error_code(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Scanner(err) => err.span(),
            Self::Parser(err) => err.span(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Scanner(err) => err.is_recoverable(),
            Self::Parser(err) => err.is_recoverable(),
        }
    }
}
