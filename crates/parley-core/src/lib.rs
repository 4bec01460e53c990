//! Pooled range primitives and the quote-aware tokenizer behind Parley's
//! command resolution.
//!
//! Command lines are split into tokens without copying any text: the
//! [`Tokenizer`] records each token's byte range in an [`IndexSet`], a bit
//! set over the input whose storage is rented from a thread-safe
//! [`RangePool`] and handed back when the set is dropped.
//!
//! # Core types
//!
//! - [`RangePool`] and [`Block`]: size-classed, reusable bit storage
//! - [`IndexSet`], [`Offset`] and [`OffsetRange`]: ordered range sets
//! - [`Tokenizer`] and [`Tokenized`]: quote-aware tokenization
//! - [`TokenizerFailure`] and [`TokenizerFailureReason`]: lexical failures
//! - [`TokenizerConfig`] and [`QuotePairs`]: tokenizer configuration
//!
//! # Example
//!
//! ```
//! use parley_core::Tokenizer;
//!
//! let tokenized = Tokenizer::default().tokenize("ban @someone 'being rude'", 0)?;
//! let ranges: Vec<_> = tokenized.ranges().collect();
//! assert_eq!(ranges, vec![0..3, 4..12, 13..25]);
//! # Ok::<(), parley_core::TokenizerFailure>(())
//! ```

mod config;
mod error;
mod failure;
mod index_set;
mod pool;
mod quote;
mod tokenizer;

pub use config::TokenizerConfig;
pub use error::{IndexSetError, PoolError};
pub use failure::{TokenizerFailure, TokenizerFailureReason};
pub use index_set::{IndexSet, Offset, OffsetRange, Runs};
pub use pool::{Block, DEFAULT_BUCKET_COUNT, RangePool};
pub use quote::{QuotePair, QuotePairs};
pub use tokenizer::{Tokenized, Tokenizer};

#[cfg(test)]
mod tests;
