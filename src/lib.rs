//! # Sophie Telegram Bot
//!
//! Text formatting core of the Sophie bot: markdown-style markup is turned
//! into plain text plus Telegram message entities (offsets in UTF-16 code
//! units), and `%%%` reply templates are expanded to one random variant.

pub mod bot;
pub mod config;
pub mod entities;
pub mod errors;
pub mod markdown;
pub mod observability;
pub mod random_text;
pub mod surrogate;

// Re-export types for easier access
pub use entities::{SpanKind, TextSpan};
pub use markdown::{extract_markdown_entities, DelimiterTable, MarkdownParser};
pub use random_text::{parse_random_text, Chooser, FnChooser, RandomChooser};
