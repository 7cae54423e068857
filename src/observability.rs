//! Observability module for logging and metrics setup.
//!
//! This module provides:
//! - Structured logging with configurable levels (pretty or JSON)
//! - Spans for Telegram operations
//! - Metric recording helpers on the `metrics` facade
//!
//! No metrics exporter is installed here; recorded values are dropped unless
//! the embedding process installs a recorder.

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::prelude::*;

use crate::config::LoggingConfig;
use crate::entities::TextSpan;

/// Initialize tracing with the given configuration
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("sophie_bot={}", config.log_level.to_lowercase()).parse()?)
        .add_directive("teloxide=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    if config.use_pretty_format() {
        // Pretty formatting for development
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .try_init()?;
    } else {
        // JSON formatting for production (default)
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .try_init()?;
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Create a span for Telegram operations
pub fn telegram_span(operation: &str, user_id: Option<i64>) -> tracing::Span {
    tracing::info_span!(
        "telegram_operation",
        operation = operation,
        user_id = user_id,
        component = "telegram"
    )
}

/// Record Telegram message processing metrics
pub fn record_telegram_message(message_type: &str) {
    let message_type = message_type.to_string();
    metrics::counter!("telegram_messages_total", "type" => message_type).increment(1);
}

/// Record one markdown formatting pass
pub fn record_format_metrics(spans: &[TextSpan], duration: Duration) {
    metrics::counter!("markdown_format_total").increment(1);
    metrics::histogram!("markdown_spans_per_message").record(spans.len() as f64);
    metrics::histogram!("markdown_format_duration_seconds").record(duration.as_secs_f64());
}

/// Record a failed reply
pub fn record_reply_failure(command: &str) {
    let command = command.to_string();
    metrics::counter!("telegram_reply_failures_total", "command" => command).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SpanKind;

    #[test]
    fn test_metric_helpers_without_recorder() {
        // Without an installed recorder these are no-ops and must not panic
        record_telegram_message("text");
        record_format_metrics(
            &[TextSpan::new(SpanKind::Bold, 0, 1)],
            Duration::from_millis(1),
        );
        record_reply_failure("format");
    }

    #[test]
    fn test_telegram_span_creation() {
        let span = telegram_span("message_handler", Some(42));
        let _enter = span.enter();
    }
}
