//! Ordered sets of byte ranges backed by pooled bit blocks.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use std::sync::Arc;

use crate::error::IndexSetError;
use crate::pool::{Block, RangePool};

/// A position within an [`IndexSet`], counted from either end.
///
/// `Offset::End(1)` names the last position, mirroring `^1` index notation;
/// as a range bound `Offset::End(0)` is the reference length itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Offset {
    /// Counted forwards from the start.
    Start(usize),
    /// Counted backwards from the end.
    End(usize),
}

impl Offset {
    /// Resolves this offset as a range bound in `0..=reference_length`.
    #[must_use]
    pub const fn resolve_bound(self, reference_length: usize) -> Option<usize> {
        match self {
            Self::Start(offset) if offset <= reference_length => Some(offset),
            Self::Start(_) => None,
            Self::End(offset) => reference_length.checked_sub(offset),
        }
    }

    /// Resolves this offset as an element position in `0..reference_length`.
    #[must_use]
    pub const fn resolve_index(self, reference_length: usize) -> Option<usize> {
        match self {
            Self::Start(offset) if offset < reference_length => Some(offset),
            Self::End(offset) if offset > 0 => reference_length.checked_sub(offset),
            Self::Start(_) | Self::End(_) => None,
        }
    }
}

impl From<usize> for Offset {
    fn from(offset: usize) -> Self {
        Self::Start(offset)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(offset) => write!(f, "{offset}"),
            Self::End(offset) => write!(f, "^{offset}"),
        }
    }
}

/// A half-open range whose bounds are [`Offset`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetRange {
    start: Offset,
    end: Offset,
}

impl OffsetRange {
    /// Creates a range from `start` (inclusive) to `end` (exclusive).
    #[must_use]
    pub const fn new(start: Offset, end: Offset) -> Self {
        Self { start, end }
    }

    /// Returns the inclusive start bound.
    #[must_use]
    pub const fn start(&self) -> Offset {
        self.start
    }

    /// Returns the exclusive end bound.
    #[must_use]
    pub const fn end(&self) -> Offset {
        self.end
    }

    /// Resolves both bounds against `reference_length`.
    ///
    /// # Errors
    ///
    /// Returns an error when a bound falls outside `0..=reference_length` or
    /// the start resolves past the end.
    pub fn resolve(self, reference_length: usize) -> Result<Range<usize>, IndexSetError> {
        let start = self
            .start
            .resolve_bound(reference_length)
            .ok_or(IndexSetError::out_of_range(self.start, reference_length))?;
        let end = self
            .end
            .resolve_bound(reference_length)
            .ok_or(IndexSetError::out_of_range(self.end, reference_length))?;
        if start > end {
            return Err(IndexSetError::inverted(start, end));
        }
        Ok(start..end)
    }
}

impl From<Range<usize>> for OffsetRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(Offset::Start(range.start), Offset::Start(range.end))
    }
}

impl From<RangeFrom<usize>> for OffsetRange {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::new(Offset::Start(range.start), Offset::End(0))
    }
}

impl From<RangeTo<usize>> for OffsetRange {
    fn from(range: RangeTo<usize>) -> Self {
        Self::new(Offset::Start(0), Offset::Start(range.end))
    }
}

impl From<RangeFull> for OffsetRange {
    fn from(_: RangeFull) -> Self {
        Self::new(Offset::Start(0), Offset::End(0))
    }
}

/// An ordered set of positions over a fixed reference length, enumerated as
/// maximal contiguous runs.
///
/// The set holds one [`Block`] rented from a [`RangePool`] and returns it
/// when dropped, so the block goes back to the pool on every exit path.
///
/// # Example
///
/// ```
/// use parley_core::IndexSet;
///
/// let mut set = IndexSet::new(10);
/// set.add_range(1_usize..3)?;
/// set.add_range(6_usize..)?;
/// let runs: Vec<_> = set.runs().collect();
/// assert_eq!(runs, vec![1..3, 6..10]);
/// # Ok::<(), parley_core::IndexSetError>(())
/// ```
#[derive(Debug)]
pub struct IndexSet {
    pool: Arc<RangePool>,
    block: Block,
    reference_length: usize,
}

impl IndexSet {
    /// Creates an empty set over `reference_length` positions using the
    /// shared pool.
    #[must_use]
    pub fn new(reference_length: usize) -> Self {
        Self::with_pool(reference_length, RangePool::shared())
    }

    /// Creates an empty set over `reference_length` positions using `pool`.
    #[must_use]
    pub fn with_pool(reference_length: usize, pool: Arc<RangePool>) -> Self {
        let block = pool.rent(reference_length);
        Self {
            pool,
            block,
            reference_length,
        }
    }

    /// Returns the number of positions the set ranges over.
    #[must_use]
    pub const fn reference_length(&self) -> usize {
        self.reference_length
    }

    /// Adds a single position.
    ///
    /// # Errors
    ///
    /// Returns an error when `index` does not resolve inside the set.
    pub fn add(&mut self, index: impl Into<Offset>) -> Result<(), IndexSetError> {
        self.toggle(index.into(), true)
    }

    /// Removes a single position.
    ///
    /// # Errors
    ///
    /// Returns an error when `index` does not resolve inside the set.
    pub fn remove(&mut self, index: impl Into<Offset>) -> Result<(), IndexSetError> {
        self.toggle(index.into(), false)
    }

    /// Adds every position in `range`.
    ///
    /// # Errors
    ///
    /// Returns an error when the range does not resolve inside the set.
    pub fn add_range(&mut self, range: impl Into<OffsetRange>) -> Result<(), IndexSetError> {
        let resolved = range.into().resolve(self.reference_length)?;
        self.fill(resolved, true);
        Ok(())
    }

    /// Removes every position in `range`.
    ///
    /// # Errors
    ///
    /// Returns an error when the range does not resolve inside the set.
    pub fn remove_range(&mut self, range: impl Into<OffsetRange>) -> Result<(), IndexSetError> {
        let resolved = range.into().resolve(self.reference_length)?;
        self.fill(resolved, false);
        Ok(())
    }

    /// Returns `true` when `index` is a member of the set.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.reference_length && self.block.get(index)
    }

    /// Returns `true` when the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs().next().is_none()
    }

    /// Returns the maximal runs of members in ascending order.
    ///
    /// Each call rescans the backing block, so the sequence can be restarted
    /// at any time.
    #[must_use]
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            words: self.block.words(),
            limit: self.reference_length,
            cursor: 0,
        }
    }

    /// Marks `range` without bounds resolution; positions past the reference
    /// length are ignored.
    pub(crate) fn insert_run(&mut self, range: Range<usize>) {
        let end = range.end.min(self.reference_length);
        self.fill(range.start..end, true);
    }

    fn toggle(&mut self, index: Offset, value: bool) -> Result<(), IndexSetError> {
        let position = index
            .resolve_index(self.reference_length)
            .ok_or(IndexSetError::out_of_range(index, self.reference_length))?;
        self.block.set(position, value);
        Ok(())
    }

    fn fill(&mut self, range: Range<usize>, value: bool) {
        for position in range {
            self.block.set(position, value);
        }
    }
}

impl Drop for IndexSet {
    fn drop(&mut self) {
        let block = std::mem::take(&mut self.block);
        self.pool.release(block);
    }
}

/// Iterator over the maximal runs of an [`IndexSet`].
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    words: &'a [u64],
    limit: usize,
    cursor: usize,
}

impl Runs<'_> {
    /// Finds the first position at or after `from` whose bit equals `set`.
    fn seek(&self, from: usize, set: bool) -> usize {
        let mut position = from;
        while position < self.limit {
            let word_index = position >> 6;
            let Some(&raw) = self.words.get(word_index) else {
                break;
            };
            let bits = if set { raw } else { !raw };
            let masked = bits & (u64::MAX << (position & 63));
            if masked != 0 {
                let found = (word_index << 6) + masked.trailing_zeros() as usize;
                return found.min(self.limit);
            }
            position = (word_index + 1) << 6;
        }
        self.limit
    }
}

impl Iterator for Runs<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.seek(self.cursor, true);
        if start >= self.limit {
            self.cursor = self.limit;
            return None;
        }
        let end = self.seek(start, false);
        self.cursor = end;
        Some(start..end)
    }
}

impl FusedIterator for Runs<'_> {}
