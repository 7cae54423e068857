//! # Application Error Types
//!
//! This module defines common error types used throughout the Sophie bot.
//! It provides structured error handling for the text formatting core and
//! the components that configure it.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors (bad delimiters, bad link patterns, env values)
    Config(String),
    /// Validation errors (data that cannot be represented on the wire)
    Validation(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Config(format!("invalid regex: {}", err))
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the application
pub mod error_logging {
    use tracing::error;

    /// Log Telegram API errors with contextual information
    pub fn log_telegram_error(
        error: &impl std::fmt::Display,
        operation: &str,
        chat_id: Option<i64>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            chat_id = ?chat_id,
            "Telegram API operation failed"
        );
    }

    /// Log configuration errors raised while building the formatter
    pub fn log_config_error(error: &impl std::fmt::Display, component: &str) {
        error!(
            error = %error,
            component = %component,
            "Configuration rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_prefixes() {
        assert_eq!(
            AppError::Config("bad".to_string()).to_string(),
            "[CONFIG] bad"
        );
        assert_eq!(
            AppError::Validation("url".to_string()).to_string(),
            "[VALIDATION] url"
        );
        assert_eq!(
            AppError::Internal("boom".to_string()).to_string(),
            "[INTERNAL] boom"
        );
    }

    #[test]
    fn test_regex_error_is_config_error() {
        let err: AppError = regex::Regex::new("[unclosed").unwrap_err().into();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_anyhow_error_is_internal() {
        let err: AppError = anyhow::anyhow!("oops").into();
        assert_eq!(err, AppError::Internal("oops".to_string()));
    }
}
