//! Context-stack scanner
//!
//! The scanner drives a stack of [`Status`] contexts over the source. The
//! active context classifies input at the cursor; a token may close the
//! context or open a nested one. The context stack is the call stack of
//! [`ScanRun::run`].

use super::status::Status;
use crate::config::compile_time::lexical::*;
use crate::config::runtime::ScannerPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenClass, TokenKind, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success};
use serde::Serialize;
use std::collections::BTreeMap;

/// Scanner failures; all of them abort the scan
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScannerError {
    #[error("Unable to tokenize input at offset {offset} in {status} context: '{remainder}'")]
    Stuck {
        offset: usize,
        remainder: String,
        status: &'static str,
    },

    #[error("Lexical context {status} produced a zero-length token of kind {kind} at offset {offset}")]
    ZeroLengthToken {
        offset: usize,
        kind: TokenKind,
        status: &'static str,
    },

    #[error("Lexical context {status} produced a wildcard token at offset {offset}")]
    WildcardToken { offset: usize, status: &'static str },

    #[error("Lexical context {status} produced a token at offset {actual}, expected offset {expected}")]
    OffsetMismatch {
        expected: usize,
        actual: usize,
        status: &'static str,
    },

    #[error("Selector too long: {length} bytes (max {MAX_SOURCE_LENGTH})")]
    SourceTooLong { length: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Lexical contexts nested too deeply: {depth} (max {MAX_CONTEXT_DEPTH})")]
    ContextTooDeep { depth: usize, offset: usize },
}

impl ScannerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ScannerError::Stuck { .. } => codes::scanner::SCANNER_STUCK,
            ScannerError::ZeroLengthToken { .. } => codes::scanner::ZERO_LENGTH_TOKEN,
            ScannerError::WildcardToken { .. } => codes::scanner::WILDCARD_TOKEN,
            ScannerError::OffsetMismatch { .. } => codes::scanner::OFFSET_MISMATCH,
            ScannerError::SourceTooLong { .. } => codes::scanner::SOURCE_TOO_LONG,
            ScannerError::TooManyTokens { .. } => codes::scanner::TOO_MANY_TOKENS,
            ScannerError::ContextTooDeep { .. } => codes::scanner::CONTEXT_TOO_DEEP,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Source range the error refers to, when it has one
    pub fn span(&self) -> Option<Span> {
        match self {
            ScannerError::Stuck {
                offset, remainder, ..
            } => Some(Span::from_offsets(*offset, offset + remainder.len().max(1))),
            ScannerError::ZeroLengthToken { offset, .. }
            | ScannerError::WildcardToken { offset, .. }
            | ScannerError::ContextTooDeep { offset, .. } => {
                Some(Span::from_offsets(*offset, offset + 1))
            }
            ScannerError::OffsetMismatch { expected, .. } => {
                Some(Span::from_offsets(*expected, expected + 1))
            }
            ScannerError::SourceTooLong { .. } | ScannerError::TooManyTokens { .. } => None,
        }
    }
}

/// Per-scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub tokens_by_kind: BTreeMap<TokenKind, usize>,
    pub tokens_by_class: BTreeMap<TokenClass, usize>,
    /// Contexts entered, the root context included
    pub contexts_entered: usize,
    pub max_context_depth: usize,
    pub bytes_scanned: usize,
}

impl ScanMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;
        self.bytes_scanned += token.length();
        *self.tokens_by_kind.entry(token.kind).or_insert(0) += 1;
        *self.tokens_by_class.entry(token.kind.token_class()).or_insert(0) += 1;
    }

    pub(crate) fn record_context(&mut self, depth: usize) {
        self.contexts_entered += 1;
        self.max_context_depth = self.max_context_depth.max(depth);
    }

    pub fn count(&self, kind: TokenKind) -> usize {
        self.tokens_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn count_class(&self, class: TokenClass) -> usize {
        self.tokens_by_class.get(&class).copied().unwrap_or(0)
    }
}

/// Scanner driving a root [`Status`] over selector source
pub struct Scanner {
    status: Box<dyn Status>,
    preferences: ScannerPreferences,
    metrics: ScanMetrics,
}

impl Scanner {
    pub fn new(status: Box<dyn Status>) -> Self {
        Self::with_preferences(status, ScannerPreferences::default())
    }

    pub fn with_preferences(status: Box<dyn Status>, preferences: ScannerPreferences) -> Self {
        Self {
            status,
            preferences,
            metrics: ScanMetrics::default(),
        }
    }

    /// Metrics of the most recent scan (empty when collection is disabled)
    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn root_status(&self) -> &dyn Status {
        self.status.as_ref()
    }

    /// Scan all of `source`, appending tokens to `tokens`
    ///
    /// Returns the final cursor, which equals `source.len()` on success.
    pub fn scan(&mut self, tokens: &mut TokenStream, source: &str) -> Result<usize, ScannerError> {
        self.scan_from(tokens, source, 0)
    }

    /// Scan `source` starting at byte `offset`; token offsets stay absolute
    pub fn scan_from(
        &mut self,
        tokens: &mut TokenStream,
        source: &str,
        offset: usize,
    ) -> Result<usize, ScannerError> {
        self.metrics = ScanMetrics::default();

        if source.len() > MAX_SOURCE_LENGTH {
            let err = ScannerError::SourceTooLong {
                length: source.len(),
            };
            log_error!(err.error_code(), &err.to_string(), "length" => source.len());
            return Err(err);
        }

        log_debug!("Starting scan",
            "root_status" => self.status.name(),
            "source_length" => source.len(),
            "offset" => offset
        );

        let mut run = ScanRun {
            preferences: &self.preferences,
            metrics: &mut self.metrics,
            appended: 0,
        };

        match run.run(self.status.as_ref(), tokens, source, offset, 1) {
            Ok(end) => {
                log_success!(codes::success::TOKENIZATION_COMPLETE, "Selector tokenized",
                    "tokens" => run.appended,
                    "end_offset" => end
                );
                Ok(end)
            }
            Err(err) => {
                let message = err.to_string();
                match err.span() {
                    Some(span) => log_error!(err.error_code(), &message,
                        span = span,
                        "root_status" => self.status.name()
                    ),
                    None => log_error!(err.error_code(), &message,
                        "root_status" => self.status.name()
                    ),
                }
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("status", &self.status.name())
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// State of one `scan` call, shared by all nested contexts
struct ScanRun<'a> {
    preferences: &'a ScannerPreferences,
    metrics: &'a mut ScanMetrics,
    appended: usize,
}

impl ScanRun<'_> {
    fn run(
        &mut self,
        status: &dyn Status,
        tokens: &mut TokenStream,
        source: &str,
        mut offset: usize,
        depth: usize,
    ) -> Result<usize, ScannerError> {
        if depth > MAX_CONTEXT_DEPTH {
            return Err(ScannerError::ContextTooDeep { depth, offset });
        }

        if self.preferences.collect_metrics {
            self.metrics.record_context(depth);
        }
        if self.preferences.log_context_transitions {
            log_debug!("Entering lexical context",
                "status" => status.name(),
                "depth" => depth,
                "offset" => offset
            );
        }

        while offset < source.len() {
            let token = status
                .get_token(source, offset)
                .ok_or_else(|| self.stuck(status, source, offset))?;
            Self::check_token(status, &token, offset)?;

            self.appended += 1;
            if self.appended > MAX_TOKEN_COUNT {
                return Err(ScannerError::TooManyTokens {
                    count: self.appended,
                });
            }

            offset += token.length();
            if self.preferences.collect_metrics {
                self.metrics.record_token(&token);
            }

            let is_end = status.is_end_token(&token);
            let nested = if is_end {
                None
            } else {
                status.get_new_status(&token)
            };
            tokens.push(token);

            if is_end {
                break;
            }
            if let Some(nested) = nested {
                offset = self.run(nested.as_ref(), tokens, source, offset, depth + 1)?;
            }
        }

        if self.preferences.log_context_transitions {
            log_debug!("Leaving lexical context",
                "status" => status.name(),
                "depth" => depth,
                "offset" => offset
            );
        }

        Ok(offset)
    }

    fn check_token(status: &dyn Status, token: &Token, offset: usize) -> Result<(), ScannerError> {
        if token.kind.is_wildcard() {
            return Err(ScannerError::WildcardToken {
                offset,
                status: status.name(),
            });
        }
        if token.offset != offset {
            return Err(ScannerError::OffsetMismatch {
                expected: offset,
                actual: token.offset,
                status: status.name(),
            });
        }
        if token.length() == 0 {
            return Err(ScannerError::ZeroLengthToken {
                offset,
                kind: token.kind,
                status: status.name(),
            });
        }
        Ok(())
    }

    fn stuck(&self, status: &dyn Status, source: &str, offset: usize) -> ScannerError {
        let remainder = if self.preferences.include_remainder_in_errors {
            source.get(offset..).unwrap_or_default().to_string()
        } else {
            String::new()
        };

        ScannerError::Stuck {
            offset,
            remainder,
            status: status.name(),
        }
    }
}
