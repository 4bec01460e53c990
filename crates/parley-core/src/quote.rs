//! Recognised quote pairs for quoted tokens.

use serde::{Deserialize, Serialize};

/// An opening quote character and the character that closes it.
///
/// # Example
///
/// ```
/// use parley_core::QuotePair;
///
/// let pair = QuotePair::new('«', '»');
/// assert_eq!(pair.open(), '«');
/// assert_eq!(pair.close(), '»');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotePair {
    open: char,
    close: char,
}

impl QuotePair {
    /// Creates a quote pair.
    #[must_use]
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// Returns the opening character.
    #[must_use]
    pub const fn open(&self) -> char {
        self.open
    }

    /// Returns the closing character.
    #[must_use]
    pub const fn close(&self) -> char {
        self.close
    }
}

/// The set of quote pairs a tokenizer and binder recognise.
///
/// The default set covers ASCII double and single quotes plus the
/// typographic pairs chat clients commonly substitute for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuotePairs(Vec<QuotePair>);

impl QuotePairs {
    /// Creates a set from explicit pairs.
    #[must_use]
    pub const fn new(pairs: Vec<QuotePair>) -> Self {
        Self(pairs)
    }

    /// Returns the configured pairs.
    #[must_use]
    pub fn pairs(&self) -> &[QuotePair] {
        &self.0
    }

    /// Returns the closing character for `open`, if it opens a quote.
    #[must_use]
    pub fn closing_for(&self, open: char) -> Option<char> {
        self.0
            .iter()
            .find(|pair| pair.open == open)
            .map(|pair| pair.close)
    }

    /// Returns `true` when `open` and `close` form a recognised pair.
    #[must_use]
    pub fn is_pair(&self, open: char, close: char) -> bool {
        self.0
            .iter()
            .any(|pair| pair.open == open && pair.close == close)
    }

    /// Strips one matching pair of surrounding quotes from `text`.
    ///
    /// Text that is not wrapped in a recognised pair is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use parley_core::QuotePairs;
    ///
    /// let quotes = QuotePairs::default();
    /// assert_eq!(quotes.dequote("'hello world'"), "hello world");
    /// assert_eq!(quotes.dequote("'mismatched\""), "'mismatched\"");
    /// assert_eq!(quotes.dequote("plain"), "plain");
    /// ```
    #[must_use]
    pub fn dequote<'a>(&self, text: &'a str) -> &'a str {
        let mut chars = text.chars();
        let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
            return text;
        };
        if !self.is_pair(first, last) {
            return text;
        }
        text.get(first.len_utf8()..text.len() - last.len_utf8())
            .unwrap_or(text)
    }
}

impl Default for QuotePairs {
    fn default() -> Self {
        Self(vec![
            QuotePair::new('"', '"'),
            QuotePair::new('\'', '\''),
            QuotePair::new('\u{201C}', '\u{201D}'),
            QuotePair::new('\u{2018}', '\u{2019}'),
            QuotePair::new('\u{00AB}', '\u{00BB}'),
        ])
    }
}
