//! # Structured Logging Module
//!
//! Diagnostic logging for the CLI, written to stderr so command output on
//! stdout stays parseable. Verbosity flags pick the level, `MQ_DEBUG_LOG`
//! overrides it with a full `EnvFilter` directive, and `MQ_DEBUG_LOG_FORMAT=json`
//! switches to JSON lines for machine consumption.

use chrono::Utc;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Initialize stderr logging for a CLI run; `verbosity` is the number of `-v`
/// flags
pub fn init_cli_logging(verbosity: u8) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let level = level_for_verbosity(verbosity);
        let filter = std::env::var("MQ_DEBUG_LOG")
            .ok()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(level.as_str().to_lowercase()));

        let result = match get_log_format() {
            LogFormat::Json => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init(),
        };

        // A subscriber may already be installed (tests, embedding applications)
        if result.is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing");
        }
    });
}

/// Map the `-v` count to a level
fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn get_log_format() -> LogFormat {
    parse_log_format(std::env::var("MQ_DEBUG_LOG_FORMAT").ok().as_deref())
}

fn parse_log_format(value: Option<&str>) -> LogFormat {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

/// Log structured data for queue operations
pub fn log_queue_operation(
    operation: &str,
    transport_queue: Option<&str>,
    message_id: Option<i64>,
    status: &str,
    details: Option<&str>,
) {
    tracing::debug!(
        operation = %operation,
        transport_queue = transport_queue,
        message_id = message_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "QUEUE_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
