//! # Unified Application Configuration
//!
//! This module provides a centralized configuration system that consolidates
//! all application settings into a single, structured configuration object.
//! It supports loading from environment variables, validation, and provides
//! a clean interface for accessing configuration throughout the application.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Bot-specific configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.token.trim().is_empty() {
            return Err(AppError::Config("Bot token cannot be empty".to_string()));
        }

        let parts: Vec<&str> = self.token.split(':').collect();
        if parts.len() != 2 {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        // Validate bot ID is numeric
        if parts[0].parse::<u64>().is_err() {
            return Err(AppError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        if parts[1].len() < 20 {
            return Err(AppError::Config(
                "Bot token appears to be too short. Please verify it's a valid token".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(AppError::Config("HTTP timeout cannot be 0".to_string()));
        }

        if self.http_timeout_secs > 300 {
            return Err(AppError::Config(
                "HTTP timeout cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Markdown and template formatting settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormattingConfig {
    /// Render `# Heading` lines as bold text
    pub extract_headings: bool,
    /// Custom inline link regex with two groups (label, url)
    pub link_pattern: Option<String>,
    /// Expand `%%%` choice sections before parsing markdown
    pub expand_random: bool,
}

impl FormattingConfig {
    /// Validate formatting configuration
    pub fn validate(&self) -> AppResult<()> {
        if let Some(pattern) = &self.link_pattern {
            if pattern.trim().is_empty() {
                return Err(AppError::Config(
                    "link_pattern cannot be empty if provided".to_string(),
                ));
            }
            crate::markdown::compile_link_pattern(pattern)?;
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Environment name (development, staging, production)
    pub environment: String,
    /// Log level for the crate
    pub log_level: String,
    /// Output format override ("pretty" or "json")
    pub log_format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_format: None,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> AppResult<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Invalid log level '{}'. Expected one of: {}",
                self.log_level,
                LEVELS.join(", ")
            )));
        }

        if let Some(format) = &self.log_format {
            if format != "pretty" && format != "json" {
                return Err(AppError::Config(format!(
                    "Invalid log format '{}'. Expected 'pretty' or 'json'",
                    format
                )));
            }
        }

        Ok(())
    }

    /// Check if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Pretty output in development or when explicitly requested
    pub fn use_pretty_format(&self) -> bool {
        match self.log_format.as_deref() {
            Some(format) => format == "pretty",
            None => self.is_development(),
        }
    }
}

/// Unified application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Bot configuration
    pub bot: BotConfig,
    /// Formatting configuration
    pub formatting: FormattingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        // Load bot configuration
        config.bot.token = env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
            AppError::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
        })?;
        config.bot.http_timeout_secs = env::var("HTTP_CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| {
                AppError::Config("HTTP_CLIENT_TIMEOUT_SECS must be a valid number".to_string())
            })?;

        // Load formatting configuration
        config.formatting.extract_headings = parse_flag("MARKDOWN_EXTRACT_HEADINGS", false)?;
        config.formatting.expand_random = parse_flag("MARKDOWN_EXPAND_RANDOM", true)?;
        config.formatting.link_pattern = env::var("MARKDOWN_LINK_PATTERN").ok();

        // Load logging configuration
        config.logging.environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        config.logging.log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        config.logging.log_format = env::var("LOG_FORMAT").ok();

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.bot.validate()?;
        self.formatting.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: bot_token=[REDACTED], http_timeout={}s, extract_headings={}, custom_link_pattern={}, expand_random={}, environment={}",
            self.bot.http_timeout_secs,
            self.formatting.extract_headings,
            self.formatting.link_pattern.is_some(),
            self.formatting.expand_random,
            self.logging.environment
        )
    }
}

fn parse_flag(name: &str, default: bool) -> AppResult<bool> {
    match env::var(name) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!(
                "{} must be a boolean (true/false)",
                name
            ))),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = AppConfig::default();
        // Default config has no token, so only the bot section fails
        assert!(config.validate().is_err());
        assert!(config.formatting.validate().is_ok());
        assert!(config.logging.validate().is_ok());
    }

    #[test]
    fn test_bot_config_validation() {
        let mut config = BotConfig::default();

        // Invalid: empty token
        assert!(config.validate().is_err());

        // Invalid: malformed token
        config.token = "invalid-token".to_string();
        assert!(config.validate().is_err());

        // Invalid: short token
        config.token = "123:short".to_string();
        assert!(config.validate().is_err());

        // Valid token format
        config.token = "123456789:AAFakeTokenForTestingPurposes1234567890".to_string();
        assert!(config.validate().is_ok());

        // Invalid: zero timeout
        config.http_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.http_timeout_secs = 301;
        assert!(config.validate().is_err());
        config.http_timeout_secs = 30;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_formatting_config_validation() {
        let mut config = FormattingConfig::default();
        assert!(config.validate().is_ok());

        config.link_pattern = Some("   ".to_string());
        assert!(config.validate().is_err());

        config.link_pattern = Some(r"\[(.+?)\]".to_string());
        assert!(config.validate().is_err());

        config.link_pattern = Some(r"\[(.+?)\]\((.+?)\)".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.use_pretty_format());

        config.environment = "production".to_string();
        assert!(!config.use_pretty_format());
        config.log_format = Some("pretty".to_string());
        assert!(config.use_pretty_format());

        config.log_format = Some("xml".to_string());
        assert!(config.validate().is_err());
        config.log_format = None;

        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_redacts_token() {
        let mut config = AppConfig::default();
        config.bot.token = "123456789:AAFakeTokenForTestingPurposes1234567890".to_string();
        let summary = config.summary();
        assert!(summary.contains("[REDACTED]"));
        assert!(!summary.contains("AAFake"));
    }
}
