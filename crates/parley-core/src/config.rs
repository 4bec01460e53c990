//! Tokenizer configuration.

use serde::{Deserialize, Serialize};

use crate::quote::QuotePairs;

/// Configuration controlling quote recognition and input limits.
///
/// # Defaults
///
/// - `quote_pairs`: `"…"`, `'…'`, `“…”`, `‘…’` and `«…»`
/// - `max_input_len`: `None`, so input length is unbounded
///
/// The type deserialises with per-field defaults, so embedding applications
/// can load it from a partial section of their own configuration files.
///
/// # Example
///
/// ```
/// use parley_core::TokenizerConfig;
///
/// let config = TokenizerConfig::default();
/// assert_eq!(config.max_input_len(), None);
/// assert_eq!(config.quote_pairs().closing_for('“'), Some('”'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Quote pairs that delimit quoted tokens.
    quote_pairs: QuotePairs,
    /// Longest accepted input in bytes, or `None` for no limit.
    max_input_len: Option<usize>,
}

impl TokenizerConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(quote_pairs: QuotePairs, max_input_len: Option<usize>) -> Self {
        Self {
            quote_pairs,
            max_input_len,
        }
    }

    /// Returns the recognised quote pairs.
    #[must_use]
    pub const fn quote_pairs(&self) -> &QuotePairs {
        &self.quote_pairs
    }

    /// Returns the input length limit.
    #[must_use]
    pub const fn max_input_len(&self) -> Option<usize> {
        self.max_input_len
    }
}
