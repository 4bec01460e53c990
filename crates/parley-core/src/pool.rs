//! Size-classed pool of reusable bit blocks.
//!
//! Every [`IndexSet`](crate::IndexSet) borrows exactly one [`Block`] from a
//! [`RangePool`] and hands it back when dropped. Bucket *k* holds blocks of
//! 2^k bits. Each bucket is an unbounded channel used as a free list, so
//! renting and releasing are safe from any thread without extra locking.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};
use once_cell::sync::Lazy;
use tracing::trace;

use crate::error::PoolError;

/// Tracing target for pool activity.
pub(crate) const POOL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::pool");

/// Number of size classes in the default pool; the largest holds 2^16 bits.
pub const DEFAULT_BUCKET_COUNT: usize = 17;

const WORD_BITS: usize = 64;

static SHARED_POOL: Lazy<Arc<RangePool>> = Lazy::new(|| Arc::new(RangePool::default()));

/// A fixed-capacity bit store rented from a [`RangePool`].
///
/// Blocks handed out by a pool are always zeroed: fresh blocks start empty and
/// pooled blocks are cleared when they are released.
#[derive(Debug, Default)]
pub struct Block {
    words: Box<[u64]>,
    capacity: usize,
}

impl Block {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)].into_boxed_slice(),
            capacity,
        }
    }

    /// Returns the number of addressable bits.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the bit at `bit`, or `false` beyond the block's capacity.
    #[must_use]
    pub fn get(&self, bit: usize) -> bool {
        bit < self.capacity
            && self
                .words
                .get(bit >> 6)
                .is_some_and(|word| word & (1 << (bit & 63)) != 0)
    }

    /// Sets or clears the bit at `bit`.
    ///
    /// Returns `false` and leaves the block untouched when `bit` lies beyond
    /// the block's capacity.
    pub fn set(&mut self, bit: usize, value: bool) -> bool {
        if bit >= self.capacity {
            return false;
        }
        let Some(word) = self.words.get_mut(bit >> 6) else {
            return false;
        };
        let mask = 1_u64 << (bit & 63);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        true
    }

    /// Returns `true` when no bit is set.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }

    fn clear(&mut self) {
        self.words.fill(0);
    }
}

#[derive(Debug)]
struct Bucket {
    capacity: usize,
    free: Sender<Block>,
    idle: Receiver<Block>,
}

impl Bucket {
    fn new(capacity: usize) -> Self {
        let (free, idle) = unbounded();
        Self {
            capacity,
            free,
            idle,
        }
    }

    fn take(&self) -> Block {
        self.idle
            .try_recv()
            .unwrap_or_else(|_| Block::with_capacity(self.capacity))
    }

    fn put(&self, block: Block) {
        // Both channel halves live in the bucket, so sending cannot observe a
        // disconnected receiver while `self` is alive.
        if self.free.send(block).is_err() {
            trace!(
                target: POOL_TARGET,
                capacity = self.capacity,
                "bucket closed; dropping block"
            );
        }
    }
}

/// A thread-safe pool of bit blocks keyed by power-of-two size class.
///
/// The pool never evicts: released blocks stay available for reuse for the
/// lifetime of the pool. Storage is ordinary heap memory and needs no
/// teardown beyond dropping the pool.
///
/// # Example
///
/// ```
/// use parley_core::RangePool;
///
/// let pool = RangePool::new(4)?;
/// let block = pool.rent(5);
/// assert_eq!(block.capacity(), 8);
/// pool.release(block);
/// assert_eq!(pool.idle_blocks(), 1);
/// # Ok::<(), parley_core::PoolError>(())
/// ```
#[derive(Debug)]
pub struct RangePool {
    buckets: Vec<Bucket>,
}

impl RangePool {
    /// Creates a pool with `bucket_count` size classes, the largest holding
    /// blocks of `2^(bucket_count - 1)` bits.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::NoBuckets`] for zero buckets and
    /// [`PoolError::TooManyBuckets`] when the largest size class would
    /// overflow a `usize`.
    pub fn new(bucket_count: usize) -> Result<Self, PoolError> {
        let maximum = max_bucket_count();
        if bucket_count == 0 {
            return Err(PoolError::NoBuckets);
        }
        if bucket_count > maximum {
            return Err(PoolError::too_many_buckets(bucket_count, maximum));
        }
        Ok(Self::with_buckets(bucket_count))
    }

    fn with_buckets(bucket_count: usize) -> Self {
        Self {
            buckets: (0..bucket_count).map(|class| Bucket::new(1 << class)).collect(),
        }
    }

    /// Returns the process-wide pool shared by tokenizers that are not given
    /// an explicit pool.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED_POOL)
    }

    /// Returns the number of size classes.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the capacity of the largest pooled size class.
    #[must_use]
    pub fn largest_capacity(&self) -> usize {
        self.buckets.last().map_or(0, |bucket| bucket.capacity)
    }

    /// Rents a block holding at least `minimum_bits` bits.
    ///
    /// The smallest size class that fits is used. Requests larger than the
    /// largest size class are served with a freshly allocated block.
    #[must_use]
    pub fn rent(&self, minimum_bits: usize) -> Block {
        let last = self.buckets.len().saturating_sub(1);
        let class = size_class(minimum_bits).min(last);
        match self.buckets.get(class) {
            Some(bucket) if bucket.capacity >= minimum_bits => bucket.take(),
            _ => {
                let capacity = minimum_bits
                    .checked_next_power_of_two()
                    .unwrap_or(minimum_bits);
                trace!(
                    target: POOL_TARGET,
                    minimum_bits,
                    capacity,
                    "allocating oversized block outside the pool"
                );
                Block::with_capacity(capacity)
            }
        }
    }

    /// Clears `block` and makes it available to later [`rent`](Self::rent)
    /// calls.
    ///
    /// Blocks whose capacity does not match a size class of this pool are
    /// dropped.
    pub fn release(&self, mut block: Block) {
        let capacity = block.capacity();
        match self.buckets.get(size_class(capacity)) {
            Some(bucket) if bucket.capacity == capacity => {
                block.clear();
                bucket.put(block);
            }
            _ => trace!(
                target: POOL_TARGET,
                capacity,
                "discarding block without a matching size class"
            ),
        }
    }

    /// Returns the number of blocks waiting for reuse across all buckets.
    #[must_use]
    pub fn idle_blocks(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.idle.len()).sum()
    }
}

impl Default for RangePool {
    fn default() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }
}

/// Returns the size class whose capacity is the smallest power of two holding
/// `bits` bits.
pub(crate) const fn size_class(bits: usize) -> usize {
    if bits <= 1 {
        0
    } else {
        (usize::BITS - (bits - 1).leading_zeros()) as usize
    }
}

const fn max_bucket_count() -> usize {
    (usize::BITS - 1) as usize
}
