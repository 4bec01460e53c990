//! Precondition errors raised by the pooled range primitives.
//!
//! Lexical failures are not errors in this sense: they are reported as
//! [`TokenizerFailure`](crate::TokenizerFailure) values by the tokenizer.

use thiserror::Error;

use crate::index_set::Offset;

/// Errors returned when a [`RangePool`](crate::RangePool) is configured with
/// an unusable bucket layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PoolError {
    /// A pool needs at least one size class.
    #[error("a range pool requires at least one bucket")]
    NoBuckets,

    /// The largest size class would not fit in a `usize`.
    #[error("{requested} buckets exceeds the maximum of {maximum}")]
    TooManyBuckets {
        /// The number of buckets requested.
        requested: usize,
        /// The largest supported number of buckets.
        maximum: usize,
    },
}

impl PoolError {
    /// Creates a too-many-buckets error.
    #[must_use]
    pub const fn too_many_buckets(requested: usize, maximum: usize) -> Self {
        Self::TooManyBuckets { requested, maximum }
    }
}

/// Errors returned when an [`IndexSet`](crate::IndexSet) is addressed
/// outside its reference length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IndexSetError {
    /// The offset does not resolve to a position within the set.
    #[error("offset {offset} is out of range for reference length {reference_length}")]
    OffsetOutOfRange {
        /// The offending offset.
        offset: Offset,
        /// The reference length of the set.
        reference_length: usize,
    },

    /// The range resolves to a start beyond its end.
    #[error("range start {start} is past range end {end}")]
    InvertedRange {
        /// The resolved start position.
        start: usize,
        /// The resolved end position.
        end: usize,
    },
}

impl IndexSetError {
    /// Creates an out-of-range error.
    #[must_use]
    pub const fn out_of_range(offset: Offset, reference_length: usize) -> Self {
        Self::OffsetOutOfRange {
            offset,
            reference_length,
        }
    }

    /// Creates an inverted-range error.
    #[must_use]
    pub const fn inverted(start: usize, end: usize) -> Self {
        Self::InvertedRange { start, end }
    }
}
