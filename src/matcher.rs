//! Greedy longest-match search and iterative extension.
//!
//! This is the hot loop of the algorithm. Given a
//! scan position `here`, it walks every historical occurrence of the
//! current key, extends each one byte-by-byte, and re-keys on the tail of
//! the best match found so far to see if an even longer match exists. The
//! loop is bounded: `current_match_len` strictly increases every iteration
//! that makes progress, so it terminates within the length of the target.

use crate::hash_table::{HashTable, KEY_SIZE};

/// The best match found for the key starting at `here`, if any reached the
/// four-byte minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Buffer offset the match copies from.
    pub candidate: usize,
    /// Number of bytes matched.
    pub len: usize,
}

/// Longest common prefix of `data[candidate..]` and `data[here..end]`.
///
/// Callers must ensure `candidate < here <= end <= data.len()`, which holds
/// for every candidate this module ever extends (see `find_best_match`).
#[inline]
fn longest_prefix_match(data: &[u8], candidate: usize, here: usize, end: usize) -> usize {
    data[candidate..]
        .iter()
        .zip(&data[here..end])
        .take_while(|(a, b)| a == b)
        .count()
}

/// Search for the longest match at `here`, iteratively re-keying on the
/// tail of the best match found so far (following the original Hunt/Vo/Tichy
/// re-keying step).
///
/// `start` is the source/target boundary: a match is clamped so it never
/// crosses it, since the wire format distinguishes source and target
/// copies.
pub fn find_best_match(
    table: &HashTable<'_>,
    data: &[u8],
    here: usize,
    end: usize,
    start: usize,
) -> Option<Match> {
    let mut current: Option<Match> = None;
    let mut key_offset = here;

    loop {
        let mut progress = false;
        let delta = key_offset - here;
        let key = &data[key_offset..key_offset + KEY_SIZE];

        for slot_offset in table.walk(key) {
            let candidate = match slot_offset.checked_sub(delta) {
                Some(c) => c,
                // Too close to start: the aligned candidate would lie
                // before the buffer.
                None => continue,
            };

            let mut match_len = longest_prefix_match(data, candidate, here, end);

            // A single instruction must not straddle the source/target
            // boundary, since source and target copies are distinct
            // opcodes downstream.
            if candidate < start && candidate + match_len > start {
                match_len = start - candidate;
            }

            let is_longer = match current {
                Some(best) => match_len > best.len,
                None => true,
            };
            if match_len >= KEY_SIZE && is_longer {
                current = Some(Match {
                    candidate,
                    len: match_len,
                });
                progress = true;
            }
        }

        if !progress {
            break;
        }
        // Re-key on the last three matched bytes plus one unmatched byte,
        // to see whether a different candidate extends further still.
        key_offset = here + current.unwrap().len - (KEY_SIZE - 1);
        if end - key_offset < KEY_SIZE {
            break;
        }
    }

    current
}
