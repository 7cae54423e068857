//! Bot module for handling Telegram interactions
//!
//! - `formatter`: template expansion and markdown entity extraction for replies
//! - `message_handler`: command parsing and replies

pub mod formatter;
pub mod message_handler;

// Re-export main handler functions for use in main.rs
pub use formatter::{FormattedText, Formatter};
pub use message_handler::{message_handler, parse_command, BotCommand};
