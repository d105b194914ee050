//! Structured logging for the selector compiler
//!
//! A process-wide logger is installed once through [`init_global_logging`].
//! Until then every macro is a silent no-op. Events can be routed to a
//! different service for the duration of a closure with [`with_scoped_logger`].

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static SCOPED_LOGGER: RefCell<Option<Arc<LoggingService>>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize the global logger from the runtime logging preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    for code in [
        codes::scanner::SCANNER_STUCK,
        codes::parser::TOKEN_MISMATCH,
        codes::parser::UNEXPECTED_END_OF_FILE,
    ] {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with a custom service
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Route this thread's events to `service` while `f` runs
pub fn with_scoped_logger<F, R>(service: Arc<LoggingService>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = SCOPED_LOGGER.with(|slot| slot.borrow_mut().replace(service));
    let _restore = ScopeGuard { previous };
    f()
}

/// Puts the outer scoped logger back, also when the scope unwinds
struct ScopeGuard {
    previous: Option<Arc<LoggingService>>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        SCOPED_LOGGER.with(|slot| *slot.borrow_mut() = previous);
    }
}

fn scoped_logger() -> Option<Arc<LoggingService>> {
    SCOPED_LOGGER.with(|slot| slot.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Deliver an event to the scoped logger, else the global one
pub fn dispatch(event: LogEvent) {
    if let Some(service) = scoped_logger() {
        service.log_event(event);
    } else if let Some(service) = try_get_global_logger() {
        service.log_event(event);
    }
}

/// Whether any active logger accepts debug events
pub fn debug_enabled() -> bool {
    let level = scoped_logger()
        .map(|service| service.min_level())
        .or_else(|| try_get_global_logger().map(|service| service.min_level()));

    matches!(level, Some(LogLevel::Debug))
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);

    if let Some(s) = span {
        event = event.with_span(s);
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    dispatch(event);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::success(code, message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    dispatch(event);
}

pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

/// Error logging that falls back to stderr when no logger is installed
pub fn safe_log_error(code: Code, message: &str) {
    if scoped_logger().is_some() || is_initialized() {
        dispatch(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
