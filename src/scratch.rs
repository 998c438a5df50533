//! The scratch allocator: the one piece of memory management a host needs
//! to hand the core.
//!
//! The hash table needs exactly two zero-initialized arrays per call (a
//! bucket-head array and a slot chain-link array), sized by `source_len +
//! target_len`. Rather than allocate those fresh on every `generate_vdelta`
//! call, `Scratch` keeps its buffers around and grows them only when a
//! larger window demands it — the default window size is ~100 KiB and a
//! host typically drives many windows back to back, so reuse amortizes the
//! allocation cost to roughly zero after the first few calls.

use thiserror::Error;

/// Errors from the scratch allocation boundary.
///
/// This is the only error class the core itself can surface; see the
/// crate-level error handling notes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScratchError {
    /// `source_len + target_len` does not fit in a `usize`, or the bucket
    /// count derived from it would overflow.
    #[error("source_len + target_len overflows the platform's address space")]
    CapacityOverflow,
}

/// A reusable scratch buffer for hash table allocation.
///
/// Create one with [`Scratch::new`] and pass `&mut` references to
/// successive [`crate::generate_vdelta`] calls; buffers are resized (never
/// shrunk) as needed and zeroed on every reuse.
#[derive(Default)]
pub struct Scratch {
    buckets: Vec<u32>,
    next: Vec<u32>,
}

impl Scratch {
    /// An empty scratch allocator. The first call that uses it will
    /// allocate buffers sized for that call's window.
    pub fn new() -> Self {
        Scratch {
            buckets: Vec::new(),
            next: Vec::new(),
        }
    }

    /// Pre-size the scratch buffers for a window of up to `num_slots`
    /// bytes, so the first real call doesn't pay for the allocation.
    pub fn with_capacity(num_slots: usize) -> Self {
        let mut scratch = Scratch::new();
        let num_buckets = if num_slots == 0 {
            1
        } else {
            (num_slots / 3) | 1
        };
        scratch.buckets.resize(num_buckets, u32::MAX);
        scratch.next.resize(num_slots, u32::MAX);
        scratch
    }

    /// Hand out the two zero-initialized arrays the hash table needs,
    /// growing the underlying buffers if this call's window is larger than
    /// any previous one.
    ///
    /// Returns `(buckets, next)` with exactly `num_buckets` and `num_slots`
    /// elements respectively. `HashTable::new` is responsible for writing
    /// the end-of-chain sentinel into every element; this method only
    /// guarantees the buffers are the right length.
    pub(crate) fn alloc(&mut self, num_buckets: usize, num_slots: usize) -> (&mut [u32], &mut [u32]) {
        if self.buckets.len() < num_buckets {
            self.buckets.resize(num_buckets, u32::MAX);
        }
        if self.next.len() < num_slots {
            self.next.resize(num_slots, u32::MAX);
        }
        (&mut self.buckets[..num_buckets], &mut self.next[..num_slots])
    }
}

/// Validate that `source_len + target_len` is representable, the way a
/// scratch allocator backed by a fallible arena would surface the same
/// failure as a `Result` instead of a panic.
#[fehler::throws(ScratchError)]
pub(crate) fn checked_window_size(source_len: usize, target_len: usize) -> usize {
    source_len
        .checked_add(target_len)
        .ok_or(ScratchError::CapacityOverflow)?
}
