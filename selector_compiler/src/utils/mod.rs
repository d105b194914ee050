//! Shared source location types used by tokens, errors and diagnostics.

pub mod span;

pub use span::{Position, SourceMap, Span};
