//! Structured lexical failures reported by the tokenizer.
//!
//! Malformed input is ordinary data: the tokenizer never panics on user text
//! and instead returns a [`TokenizerFailure`] naming the offending byte
//! offset and a stable [`TokenizerFailureReason`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable reason codes for tokenizer failures.
///
/// # Example
///
/// ```
/// use parley_core::TokenizerFailureReason;
///
/// let reason = TokenizerFailureReason::UnterminatedQuote;
/// assert_eq!(format!("{reason}"), "E_PARLEY_UNTERMINATED_QUOTE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TokenizerFailureReason {
    /// An opening quote has no matching closing quote.
    UnterminatedQuote,
    /// A closing quote is immediately followed by a non-whitespace character.
    UnexpectedCharacterAfterQuote,
    /// The prefix length lies past the input or inside a character.
    PrefixOutOfBounds,
    /// The input exceeds the configured maximum length.
    InputTooLong,
}

impl fmt::Display for TokenizerFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote => f.write_str("E_PARLEY_UNTERMINATED_QUOTE"),
            Self::UnexpectedCharacterAfterQuote => {
                f.write_str("E_PARLEY_UNEXPECTED_CHARACTER_AFTER_QUOTE")
            }
            Self::PrefixOutOfBounds => f.write_str("E_PARLEY_PREFIX_OUT_OF_BOUNDS"),
            Self::InputTooLong => f.write_str("E_PARLEY_INPUT_TOO_LONG"),
        }
    }
}

/// A failed tokenization: the input, where it went wrong, and why.
///
/// # Example
///
/// ```
/// use parley_core::{Tokenizer, TokenizerFailureReason};
///
/// let failure = Tokenizer::default()
///     .tokenize("say 'unfinished", 0)
///     .expect_err("quote is never closed");
/// assert_eq!(failure.offset(), 4);
/// assert_eq!(failure.reason(), TokenizerFailureReason::UnterminatedQuote);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{reason} at byte {offset}")]
pub struct TokenizerFailure {
    input: String,
    offset: usize,
    reason: TokenizerFailureReason,
}

impl TokenizerFailure {
    /// Creates a failure for `input`.
    #[must_use]
    pub fn new(input: impl Into<String>, offset: usize, reason: TokenizerFailureReason) -> Self {
        Self {
            input: input.into(),
            offset,
            reason,
        }
    }

    /// Returns the input that failed to tokenize.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the byte offset where the failure was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the reason code.
    #[must_use]
    pub const fn reason(&self) -> TokenizerFailureReason {
        self.reason
    }
}
