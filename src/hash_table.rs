//! The vdelta multimap hash table.
//!
//! Every four-byte key occurring anywhere in the combined source+target
//! buffer is assigned a bucket. Unlike a typical string-interning hash map,
//! this table never overwrites an existing mapping: a new occurrence of a
//! key is spliced onto the head of its bucket's chain, and the old
//! occurrence stays reachable behind it. Preserving every historical
//! occurrence (not just the most recent) is what lets the matcher compare
//! against every candidate and pick the longest one.
//!
//! The slot array is indexed by absolute buffer offset, so a slot's
//! position in the array *is* the key offset it represents — there is no
//! separate offset field to keep in sync.

use crate::scratch::Scratch;

/// Size of a vdelta hash key, in bytes.
pub const KEY_SIZE: usize = 4;

/// Sentinel chain link value meaning "no next slot".
const END_OF_CHAIN: u32 = u32::MAX;

/// The vdelta hash table: a bucket array of chain heads plus a slot array
/// of chain links, both backed by caller-supplied scratch memory.
pub struct HashTable<'s> {
    num_buckets: usize,
    buckets: &'s mut [u32],
    /// `next[i]` is the chain successor of the slot representing the key at
    /// buffer offset `i`, or `END_OF_CHAIN`.
    next: &'s mut [u32],
    links_stored: usize,
}

impl<'s> HashTable<'s> {
    /// Build a table over `num_slots` positions, backed by buffers obtained
    /// from `scratch`. `num_slots` should be `source_len + target_len`.
    pub fn new(scratch: &'s mut Scratch, num_slots: usize) -> Self {
        // Empirically well-loaded for vdelta's insertion pattern: about one
        // bucket for every three slots, rounded up to an odd number.
        let num_buckets = if num_slots == 0 {
            1
        } else {
            (num_slots / 3) | 1
        };

        let (buckets, next) = scratch.alloc(num_buckets, num_slots);
        for b in buckets.iter_mut() {
            *b = END_OF_CHAIN;
        }
        for n in next.iter_mut() {
            *n = END_OF_CHAIN;
        }

        HashTable {
            num_buckets,
            buckets,
            next,
            links_stored: 0,
        }
    }

    /// A 2-universal multiplicative hash over the four key bytes.
    ///
    /// The multiplier `127` is an arbitrary small prime; what matters is
    /// that it never changes, since the emitted instruction stream for a
    /// given input is only deterministic if this constant is stable.
    #[inline]
    fn bucket_of(&self, key: &[u8]) -> usize {
        debug_assert_eq!(key.len(), KEY_SIZE);
        let mut hash: u32 = 0;
        for &b in key {
            hash = hash.wrapping_mul(127).wrapping_add(b as u32);
        }
        (hash as usize) % self.num_buckets
    }

    /// Record that the key starting at `key_offset` occurs in the buffer.
    ///
    /// `key_offset`'s slot must currently be unlinked; each buffer position
    /// is stored at most once (see the matcher's indexing discipline).
    pub fn store(&mut self, data: &[u8], key_offset: usize) {
        let key = &data[key_offset..key_offset + KEY_SIZE];
        let bucket = self.bucket_of(key);
        debug_assert_eq!(
            self.next[key_offset], END_OF_CHAIN,
            "slot {} stored twice",
            key_offset
        );
        self.next[key_offset] = self.buckets[bucket];
        self.buckets[bucket] = key_offset as u32;
        self.links_stored += 1;
    }

    /// Iterate the chain of candidate offsets for `key`, most recently
    /// stored first. The caller must verify each candidate by byte
    /// comparison — bucket membership alone does not guarantee a key match.
    pub fn walk(&self, key: &[u8]) -> ChainIter<'_> {
        let bucket = self.bucket_of(key);
        ChainIter {
            next: &self.next,
            cursor: self.buckets[bucket],
        }
    }

    /// Bucket load factor (fraction of buckets with at least one entry) and
    /// total collision count (extra entries beyond the first, per bucket).
    /// Intended for a once-per-call debug log line, not for hot-path use.
    pub fn stats(&self) -> HashTableStats {
        let mut occupied = 0usize;
        let mut collisions = 0usize;
        for &head in self.buckets.iter() {
            if head == END_OF_CHAIN {
                continue;
            }
            occupied += 1;
            let mut cursor = self.next[head as usize];
            while cursor != END_OF_CHAIN {
                collisions += 1;
                cursor = self.next[cursor as usize];
            }
        }
        HashTableStats {
            num_buckets: self.num_buckets,
            occupied_buckets: occupied,
            collisions,
            links_stored: self.links_stored,
        }
    }
}

/// Snapshot of hash table occupancy, logged at `debug` level by the driver.
#[derive(Debug, Clone, Copy)]
pub struct HashTableStats {
    pub num_buckets: usize,
    pub occupied_buckets: usize,
    pub collisions: usize,
    pub links_stored: usize,
}

impl HashTableStats {
    /// Percentage of buckets with at least one entry.
    pub fn load_percent(&self) -> usize {
        if self.num_buckets == 0 {
            0
        } else {
            100 * self.occupied_buckets / self.num_buckets
        }
    }
}

/// Iterator over a bucket's chain, yielding buffer offsets.
pub struct ChainIter<'a> {
    next: &'a [u32],
    cursor: u32,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.cursor == END_OF_CHAIN {
            return None;
        }
        let offset = self.cursor as usize;
        self.cursor = self.next[offset];
        Some(offset)
    }
}
