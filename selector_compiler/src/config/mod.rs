//! Configuration module for the selector compiler
//! Compile-time limits are generated from TOML configuration by build.rs

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{
    ConfigError, LoggingPreferences, ParserPreferences, RuntimeConfig, ScannerPreferences,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SELECTOR_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SELECTOR_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::{lexical, logging, syntax};
    use super::*;

    #[test]
    fn test_compile_time_constants_exist() {
        assert!(lexical::MAX_SOURCE_LENGTH > 0);
        assert!(lexical::MAX_TOKEN_COUNT > 0);
        assert!(lexical::MAX_CONTEXT_DEPTH > 0);
        assert!(syntax::MAX_DELEGATION_DEPTH > 0);
        assert!(logging::LOG_BUFFER_SIZE > 0);
    }

    #[test]
    fn test_source_info() {
        let info = build_info::source_info();
        assert!(info.starts_with("Generated from"));
        assert!(info.ends_with(".toml"));
    }
}
