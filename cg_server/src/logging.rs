//! Structured logging configuration.
//!
//! The game library logs through the `log` facade; the subscriber installed
//! here picks those records up alongside the server's own `tracing` events.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Operations slower than this are logged at warn level
pub const SLOW_OPERATION_MS: u64 = 1000;

/// Initialize structured logging
///
/// Levels are configurable via the RUST_LOG env var.
///
/// # Example
///
/// ```no_run
/// use cg_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a handled chat command
///
/// # Arguments
///
/// * `chat_id` - Chat the message came from
/// * `user_id` - Sender
/// * `reply_kind` - Kind of reply produced (`text`, `animation`, ...)
/// * `duration_ms` - Time spent in the dispatcher
///
/// # Example
///
/// ```
/// use cg_server::logging::log_command;
///
/// log_command(-100, 42, "text", 3);
/// ```
pub fn log_command(chat_id: i64, user_id: i64, reply_kind: &str, duration_ms: u64) {
    tracing::info!(
        chat_id = chat_id,
        user_id = user_id,
        reply_kind = reply_kind,
        duration_ms = duration_ms,
        "Command handled"
    );
    log_performance("dispatch", duration_ms, None);
}

/// Log performance metric
///
/// # Arguments
///
/// * `operation` - Operation name
/// * `duration_ms` - Duration in milliseconds
/// * `metadata` - Additional metadata
pub fn log_performance(operation: &str, duration_ms: u64, metadata: Option<&str>) {
    if duration_ms > SLOW_OPERATION_MS {
        tracing::warn!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "PERFORMANCE: Slow operation"
        );
    } else {
        tracing::debug!(
            operation = operation,
            duration_ms = duration_ms,
            metadata = metadata,
            "Performance metric"
        );
    }
}
