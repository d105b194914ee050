// Internal modules
pub mod config;
#[macro_use]
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod scanner;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use parser::{Grammar, ParseResult, Parser, ParserError};
pub use pipeline::{compile, render_error, tokenize, SelectorError};
pub use scanner::{ScanMetrics, Scanner, ScannerError, SelectorStatus, Status};
pub use tokens::{Expected, Token, TokenKind, TokenStream};
