use crate::config::compile_time::{lexical, syntax};

/// Capabilities and limits of this build
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub version: &'static str,
    pub lexical_contexts: Vec<&'static str>,
    pub max_source_length: usize,
    pub max_token_count: usize,
    pub max_context_depth: usize,
    pub max_delegation_depth: usize,
    pub global_logging_enabled: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Selector Compiler Front End v{}:\n\
             - Lexical Contexts: {}\n\
             - Max Source Length: {} bytes\n\
             - Max Token Count: {}\n\
             - Max Context Depth: {}\n\
             - Max Delegation Depth: {}\n\
             - Global Logging: {}",
            self.version,
            self.lexical_contexts.join(", "),
            self.max_source_length,
            self.max_token_count,
            self.max_context_depth,
            self.max_delegation_depth,
            self.global_logging_enabled,
        )
    }
}

pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        version: env!("CARGO_PKG_VERSION"),
        lexical_contexts: vec![
            "selector",
            "selector-parameters",
            "attribute",
            "single-quoted-string",
            "double-quoted-string",
        ],
        max_source_length: lexical::MAX_SOURCE_LENGTH,
        max_token_count: lexical::MAX_TOKEN_COUNT,
        max_context_depth: lexical::MAX_CONTEXT_DEPTH,
        max_delegation_depth: syntax::MAX_DELEGATION_DEPTH,
        global_logging_enabled: crate::logging::is_initialized(),
    }
}
