//! Token model for CSS selectors
//!
//! - [`Token`] carries its kind, the byte offset into the scanned source and
//!   the literal text.
//! - [`TokenStream`] is the growable buffer filled by the scanner and consumed
//!   from the front by the parser.
//! - [`Expected`] is a set of acceptable kinds used by parser matching, where
//!   [`TokenKind::Any`] matches every token.

pub mod expected;
pub mod token;
pub mod token_stream;

pub use expected::Expected;
pub use token::{Token, TokenClass, TokenKind};
pub use token_stream::TokenStream;
