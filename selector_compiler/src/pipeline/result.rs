use crate::scanner::ScanMetrics;
use crate::tokens::TokenStream;
use serde::Serialize;
use std::time::Duration;

/// Tokens and statistics for one scanned selector
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub source: String,
    pub tokens: TokenStream,
    pub metrics: ScanMetrics,
    #[serde(skip)]
    pub duration: Duration,
}

impl ScanReport {
    pub fn log_success(&self) {
        crate::log_info!("Selector scan report ready",
            "source_length" => self.source.len(),
            "tokens" => self.tokens.len(),
            "contexts" => self.metrics.contexts_entered,
            "duration_us" => self.duration.as_micros()
        );
    }

    /// One rendered token per line
    pub fn render_table(&self) -> String {
        self.tokens.render()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
