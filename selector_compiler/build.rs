// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_source_length: usize,
    max_token_count: usize,
    max_context_depth: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_delegation_depth: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_error_collection: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SELECTOR_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SELECTOR_CONFIG_DIR");

    let profile = env::var("SELECTOR_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SELECTOR_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of selector_compiler directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_SOURCE_LENGTH: usize = 100_000_000;
    const ABSOLUTE_MAX_DEPTH: usize = 10_000;

    if config.lexical.max_source_length > ABSOLUTE_MAX_SOURCE_LENGTH {
        panic!("LIMITS: max_source_length exceeds absolute maximum");
    }

    if config.lexical.max_token_count == 0 {
        panic!("LIMITS: max_token_count must be positive");
    }

    if config.lexical.max_context_depth == 0 || config.lexical.max_context_depth > ABSOLUTE_MAX_DEPTH
    {
        panic!("LIMITS: max_context_depth must be within 1..={}", ABSOLUTE_MAX_DEPTH);
    }

    if config.syntax.max_delegation_depth == 0
        || config.syntax.max_delegation_depth > ABSOLUTE_MAX_DEPTH
    {
        panic!("LIMITS: max_delegation_depth must be within 1..={}", ABSOLUTE_MAX_DEPTH);
    }

    if profile == "production" && config.lexical.max_source_length > 1_048_576 {
        panic!("PRODUCTION: max_source_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const MAX_SOURCE_LENGTH: usize = {};
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const MAX_CONTEXT_DEPTH: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_DELEGATION_DEPTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_ERROR_COLLECTION: usize = {};
    }}
}}
"#,
        profile,
        // Lexical
        config.lexical.max_source_length,
        config.lexical.max_token_count,
        config.lexical.max_context_depth,
        // Syntax
        config.syntax.max_delegation_depth,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.max_error_collection,
    );

    fs::write(output_path, constants_code).unwrap();
}
