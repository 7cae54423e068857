//! # Random Choice Templates
//!
//! Reply templates may contain choice sections delimited by `%%%`:
//!
//! ```text
//! Hello %%%world%%%universe%%% today!
//! ```
//!
//! One option per section is kept. Two sections separated only by whitespace
//! stay independent, so `%%%a%%%b%%% %%%c%%%d%%%` yields two picks joined by
//! a space. Text outside sections is copied unchanged.

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::trace;

/// Marker that opens, separates and closes choice sections
pub const RANDOM_DELIMITER: &str = "%%%";

/// Selection strategy for choice sections
pub trait Chooser {
    /// Pick one of `options`. Never called with an empty slice.
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str;
}

/// Uniform random selection
#[derive(Debug, Clone)]
pub struct RandomChooser<R = ThreadRng> {
    rng: R,
}

impl RandomChooser<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomChooser<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomChooser<R> {
    /// Use a specific generator, e.g. a seeded `StdRng` for reproducible output
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        if options.is_empty() {
            return "";
        }
        options[self.rng.random_range(0..options.len())]
    }
}

/// Selection by index, for callers that already know which option they want
pub struct FnChooser<F> {
    pick: F,
}

impl<F> FnChooser<F>
where
    F: FnMut(&[&str]) -> usize,
{
    pub fn new(pick: F) -> Self {
        Self { pick }
    }
}

impl<F> Chooser for FnChooser<F>
where
    F: FnMut(&[&str]) -> usize,
{
    fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
        let index = (self.pick)(options);
        options.get(index).copied().unwrap_or_default()
    }
}

/// Expand every choice section in `text` using `chooser`.
///
/// A trailing section without a closing marker takes the rest of the text as
/// its last option. Text without any marker is returned unchanged.
pub fn parse_random_text<C>(text: &str, chooser: &mut C) -> String
where
    C: Chooser + ?Sized,
{
    let Some(first) = text.find(RANDOM_DELIMITER) else {
        return text.to_string();
    };

    let delim_len = RANDOM_DELIMITER.len();
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);

    let mut options: Vec<&str> = Vec::new();
    let mut sections = 0usize;
    let mut cursor = first + delim_len;

    loop {
        let Some(close) = find_from(text, cursor) else {
            options.push(normalize_option(&text[cursor..]));
            out.push_str(chooser.choose(&options));
            sections += 1;
            break;
        };
        options.push(normalize_option(&text[cursor..close]));

        let after = close + delim_len;
        match find_from(text, after) {
            None => {
                out.push_str(chooser.choose(&options));
                out.push_str(&text[after..]);
                sections += 1;
                break;
            }
            Some(next) if text[after..next].trim().is_empty() => {
                // blank gap: this section ends and a new one opens at `next`
                out.push_str(chooser.choose(&options));
                out.push_str(&text[after..next]);
                sections += 1;
                options.clear();
                cursor = next + delim_len;
            }
            Some(_) => cursor = after,
        }
    }

    trace!(sections, "Random text expanded");
    out
}

/// Expand with a thread-local random generator
pub fn parse_random_text_random(text: &str) -> String {
    parse_random_text(text, &mut RandomChooser::new())
}

fn find_from(text: &str, from: usize) -> Option<usize> {
    text[from..].find(RANDOM_DELIMITER).map(|pos| pos + from)
}

/// Drop the newline right after an opening marker and the one right before
/// a closing marker, so multi-line options do not leave blank lines behind.
fn normalize_option(option: &str) -> &str {
    let option = option.strip_prefix('\n').unwrap_or(option);
    if option == "\n" {
        return option;
    }
    option.strip_suffix('\n').unwrap_or(option)
}
