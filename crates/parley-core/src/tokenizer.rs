//! Quote-aware tokenization of command lines into pooled index sets.

use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::TokenizerConfig;
use crate::failure::{TokenizerFailure, TokenizerFailureReason};
use crate::index_set::{IndexSet, Runs};
use crate::pool::RangePool;

/// Tracing target for tokenizer activity.
pub(crate) const TOKENIZER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::tokenizer");

/// Splits command lines into whitespace-separated, optionally quoted tokens.
///
/// Token positions are recorded as byte ranges in an [`IndexSet`] over the
/// whole input, so no token text is copied.
///
/// # Example
///
/// ```
/// use parley_core::Tokenizer;
///
/// let tokenizer = Tokenizer::default();
/// let tokens = tokenizer.tokenize("!say 'hello world' twice", 1)?;
/// let texts: Vec<_> = tokens.tokens().collect();
/// assert_eq!(texts, vec!["say", "'hello world'", "twice"]);
/// # Ok::<(), parley_core::TokenizerFailure>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    pool: Arc<RangePool>,
}

impl Tokenizer {
    /// Creates a tokenizer that rents index sets from the shared pool.
    #[must_use]
    pub fn new(config: TokenizerConfig) -> Self {
        Self::with_pool(config, RangePool::shared())
    }

    /// Creates a tokenizer that rents index sets from `pool`.
    #[must_use]
    pub const fn with_pool(config: TokenizerConfig, pool: Arc<RangePool>) -> Self {
        Self { config, pool }
    }

    /// Returns the tokenizer configuration.
    #[must_use]
    pub const fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Tokenizes `input`, ignoring its first `skip_prefix_len` bytes.
    ///
    /// Whitespace separates tokens. A token that starts with a recognised
    /// opening quote runs to the matching closing quote, and its range
    /// includes both quote characters.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenizerFailure`] when the input is too long, the prefix
    /// does not end on a character boundary within the input, a quote is left
    /// open, or a closing quote is followed by something other than
    /// whitespace.
    pub fn tokenize<'s>(
        &self,
        input: &'s str,
        skip_prefix_len: usize,
    ) -> Result<Tokenized<'s>, TokenizerFailure> {
        if let Some(limit) = self.config.max_input_len()
            && input.len() > limit
        {
            return Err(fail(input, limit, TokenizerFailureReason::InputTooLong));
        }
        let body = input.get(skip_prefix_len..).ok_or_else(|| {
            fail(
                input,
                skip_prefix_len,
                TokenizerFailureReason::PrefixOutOfBounds,
            )
        })?;

        let mut tokens = IndexSet::with_pool(input.len(), Arc::clone(&self.pool));
        let mut scanner = Scanner {
            input,
            chars: body.char_indices().peekable(),
            base: skip_prefix_len,
            config: &self.config,
        };
        while let Some(range) = scanner.next_token()? {
            trace!(
                target: TOKENIZER_TARGET,
                start = range.start,
                end = range.end,
                "token"
            );
            tokens.insert_run(range);
        }

        Ok(Tokenized {
            source: input,
            tokens,
        })
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

fn fail(input: &str, offset: usize, reason: TokenizerFailureReason) -> TokenizerFailure {
    debug!(
        target: TOKENIZER_TARGET,
        offset,
        reason = %reason,
        "tokenization failed"
    );
    TokenizerFailure::new(input, offset, reason)
}

/// Cursor over the unprefixed body of an input.
struct Scanner<'s, 'c> {
    input: &'s str,
    chars: Peekable<CharIndices<'s>>,
    base: usize,
    config: &'c TokenizerConfig,
}

impl Scanner<'_, '_> {
    fn next_token(&mut self) -> Result<Option<Range<usize>>, TokenizerFailure> {
        while let Some((relative, ch)) = self.chars.next() {
            if ch.is_whitespace() {
                continue;
            }
            let start = self.base + relative;
            let end = match self.config.quote_pairs().closing_for(ch) {
                Some(close) => self.quoted_end(start, close)?,
                None => self.bare_end(),
            };
            return Ok(Some(start..end));
        }
        Ok(None)
    }

    fn bare_end(&mut self) -> usize {
        while let Some(&(relative, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                return self.base + relative;
            }
            self.chars.next();
        }
        self.input.len()
    }

    fn quoted_end(&mut self, open_at: usize, close: char) -> Result<usize, TokenizerFailure> {
        let Some((relative, _)) = self.chars.by_ref().find(|&(_, ch)| ch == close) else {
            return Err(fail(
                self.input,
                open_at,
                TokenizerFailureReason::UnterminatedQuote,
            ));
        };
        if let Some(&(next, ch)) = self.chars.peek()
            && !ch.is_whitespace()
        {
            return Err(fail(
                self.input,
                self.base + next,
                TokenizerFailureReason::UnexpectedCharacterAfterQuote,
            ));
        }
        Ok(self.base + relative + close.len_utf8())
    }
}

/// A successfully tokenized input.
///
/// Owns the pooled [`IndexSet`] of token ranges; dropping the value returns
/// the set's block to its pool.
#[derive(Debug)]
pub struct Tokenized<'s> {
    source: &'s str,
    tokens: IndexSet,
}

impl<'s> Tokenized<'s> {
    /// Returns the original input, prefix included.
    #[must_use]
    pub const fn source(&self) -> &'s str {
        self.source
    }

    /// Returns the index set holding the token ranges.
    #[must_use]
    pub const fn index_set(&self) -> &IndexSet {
        &self.tokens
    }

    /// Returns the byte range of every token in order.
    #[must_use]
    pub fn ranges(&self) -> Runs<'_> {
        self.tokens.runs()
    }

    /// Returns the raw text of every token in order, quotes included.
    ///
    /// Yields exactly one item per range. Ranges are built from
    /// `char_indices` offsets, so they always fall on character boundaries.
    pub fn tokens(&self) -> impl Iterator<Item = &'s str> + '_ {
        let source = self.source;
        self.ranges().map(move |range| {
            let text = source.get(range.clone());
            debug_assert!(text.is_some(), "token range {range:?} splits a character");
            text.unwrap_or_default()
        })
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges().count()
    }

    /// Returns `true` when the input held no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
