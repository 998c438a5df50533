//! The two-pass driver and instruction emission policy.
//!
//! `generate_vdelta` walks a single buffer that holds the source followed
//! by the target (`data[..source_len]` then `data[source_len..]`) twice,
//! via the same `scan` loop: a silent pass over the source, then an
//! emitting pass over the target. Both runs perform the identical greedy
//! match search and skip-ahead; only whether anything reaches `sink` (and
//! whether a pending insert run is tracked) differs. Both passes share one
//! hash table, so target-side matches can land anywhere in the source or
//! in the target bytes already scanned.

use fehler::throws;
use log::{debug, trace};

use crate::error::VdeltaError;
use crate::hash_table::{HashTable, KEY_SIZE};
use crate::matcher::find_best_match;
use crate::scratch::{checked_window_size, Scratch};
use crate::sink::WindowSink;

/// Encode `data[source_len..source_len + target_len]` as a sequence of
/// insert/copy instructions against `data[..source_len]` and itself,
/// delivered to `sink` in emission order.
///
/// `scratch` supplies the hash table's backing storage; reuse the same
/// `Scratch` across calls to amortize allocation. Paging a larger stream
/// into fixed-size windows (governed by `VdeltaConfig::window_size`) is a
/// host-level policy above this call, not something `generate_vdelta`
/// itself enforces.
#[throws(VdeltaError)]
pub fn generate_vdelta<S: WindowSink>(
    sink: &mut S,
    data: &[u8],
    source_len: usize,
    target_len: usize,
    scratch: &mut Scratch,
) {
    debug_assert_eq!(data.len(), source_len + target_len);

    let num_slots = checked_window_size(source_len, target_len)?;
    let mut table = HashTable::new(scratch, num_slots);
    let start = source_len;
    let end = source_len + target_len;

    if source_len > 0 {
        trace!("vdelta: indexing pass over {} source bytes", source_len);
        scan(sink, &mut table, data, 0, start, start, false);
    } else {
        trace!("vdelta: source is empty, skipping the indexing pass");
    }

    trace!("vdelta: emitting pass over {} target bytes", target_len);
    scan(sink, &mut table, data, start, end, start, true);

    let stats = table.stats();
    debug!(
        "vdelta: done (load {}%, {} collisions, {} keys stored)",
        stats.load_percent(),
        stats.collisions,
        stats.links_stored,
    );
}

/// One pass over `[scan_start, scan_end)`: search for the best match at
/// each position, skip ahead by the match length when one is found, and
/// fall back to indexing-and-advance-by-one otherwise. `boundary` is the
/// source/target split used to clamp matches that would straddle it.
///
/// `outputflag` gates only the emission step (`sink.emit_*` calls and
/// insert-run bookkeeping), not the search or skip-ahead: the source pass
/// runs the identical match search as the target pass, it just never hands
/// anything to `sink`. This is what lets a self-repeating source region
/// collapse to a handful of indexed positions instead of one per byte, the
/// same way the target pass does.
fn scan<S: WindowSink>(
    sink: &mut S,
    table: &mut HashTable<'_>,
    data: &[u8],
    scan_start: usize,
    scan_end: usize,
    boundary: usize,
    outputflag: bool,
) {
    let mut here = scan_start;
    let mut insert_from: Option<usize> = None;

    while here < scan_end {
        if scan_end - here < KEY_SIZE {
            break;
        }

        match find_best_match(table, data, here, scan_end, boundary) {
            None => {
                // No usable match: store this position's key (so later
                // positions can reference it) and, if emitting, fold the
                // byte into the pending insert run.
                table.store(data, here);
                if outputflag && insert_from.is_none() {
                    insert_from = Some(here);
                }
                here += 1;
            }
            Some(m) => {
                if outputflag {
                    flush_insert(sink, data, &mut insert_from, here);
                    emit_copy(sink, boundary, m.candidate, m.len);
                }
                here += m.len;
                // Index the tail of the match so the next search can
                // chain off it; the positions before the tail were
                // already indexed by earlier iterations.
                if scan_end - here >= KEY_SIZE {
                    for tail in (here - (KEY_SIZE - 1))..here {
                        table.store(data, tail);
                    }
                }
            }
        }
    }

    if outputflag {
        // A single instruction for whatever's left: either the pending
        // insert run extended through the short tail, or just the tail
        // itself if nothing was pending.
        let from = insert_from.unwrap_or(here);
        if from < scan_end {
            sink.emit_insert(&data[from..scan_end]);
        }
    }
}

/// Flush a pending insert run, if any, covering `data[from..here]`.
fn flush_insert<S: WindowSink>(
    sink: &mut S,
    data: &[u8],
    insert_from: &mut Option<usize>,
    here: usize,
) {
    if let Some(from) = insert_from.take() {
        sink.emit_insert(&data[from..here]);
    }
}

/// Translate a match against the combined buffer into the source- or
/// target-relative copy instruction the sink expects.
fn emit_copy<S: WindowSink>(sink: &mut S, start: usize, candidate: usize, len: usize) {
    if candidate < start {
        sink.emit_copy_source(candidate, len);
    } else {
        sink.emit_copy_target(candidate - start, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Instruction, RecordingWindow};
    use crate::test_support::reconstruct;

    fn run(source: &[u8], target: &[u8]) -> Vec<Instruction> {
        let mut data = Vec::with_capacity(source.len() + target.len());
        data.extend_from_slice(source);
        data.extend_from_slice(target);
        let mut scratch = Scratch::new();
        let mut sink = RecordingWindow::new();
        generate_vdelta(&mut sink, &data, source.len(), target.len(), &mut scratch)
            .expect("scratch allocation cannot fail for test-sized buffers");
        sink.into_instructions()
    }

    #[test]
    fn identical_source_and_target_is_one_copy() {
        let source = b"the quick brown fox jumps over";
        let instructions = run(source, source);
        assert_eq!(
            instructions,
            vec![Instruction::CopySource {
                offset: 0,
                length: source.len(),
            }]
        );
    }

    #[test]
    fn wholly_novel_target_is_one_insert() {
        // Every byte in the target is distinct, and distinct from every
        // byte in the source, so no 4-byte key can repeat anywhere.
        let target = b"1029384756ZYXWVUTSRQ";
        let instructions = run(b"abcdefgh", target);
        assert_eq!(instructions, vec![Instruction::Insert(target.to_vec())]);
    }

    #[test]
    fn empty_source_skips_indexing_pass_but_still_emits() {
        let instructions = run(b"", b"hello world, hello world");
        assert!(!instructions.is_empty());
        let rebuilt = reconstruct(b"", &instructions);
        assert_eq!(rebuilt, b"hello world, hello world");
    }

    #[test]
    fn empty_target_produces_no_instructions() {
        let instructions = run(b"nonempty source data", b"");
        assert!(instructions.is_empty());
    }

    #[test]
    fn both_empty_produces_no_instructions() {
        let instructions = run(b"", b"");
        assert!(instructions.is_empty());
    }

    #[test]
    fn repeated_target_tail_copies_from_target() {
        // The target repeats a run long enough to trigger a self-copy
        // (`CopyTarget`) once the first occurrence has been indexed.
        let source = b"unrelated padding bytes";
        let target = b"abcdefghabcdefgh";
        let instructions = run(source, target);
        assert!(instructions
            .iter()
            .any(|i| matches!(i, Instruction::CopyTarget { .. })));
        assert_eq!(reconstruct(source, &instructions), target);
    }

    #[test]
    fn small_edit_produces_insert_and_copies() {
        let source = b"The quick brown fox jumps over the lazy dog.";
        let target = b"The quick brown cat jumps over the lazy dog.";
        let instructions = run(source, target);
        assert_eq!(reconstruct(source, &instructions), target);
        assert!(instructions.len() > 1);
    }

    #[test]
    fn trailing_short_tail_coalesces_into_one_insert() {
        // No internal repeats, so every position up to the point where
        // fewer than 4 bytes remain is a miss: the whole target must come
        // out as a single `Insert`, not one insert for the pending run
        // plus a second one for the sub-4-byte tail.
        let instructions = run(b"", b"abcdefg");
        assert_eq!(instructions, vec![Instruction::Insert(b"abcdefg".to_vec())]);
    }

    #[test]
    fn short_target_with_no_pending_insert_is_one_tail_insert() {
        // The match consumes everything except a sub-4-byte tail with no
        // miss beforehand, so `insert_from` is `None` when the loop ends;
        // the tail must still be emitted as its own single insert.
        let source = b"abcdefgh";
        let target = b"abcdefghXY";
        let instructions = run(source, target);
        assert_eq!(
            instructions,
            vec![
                Instruction::CopySource { offset: 0, length: 8 },
                Instruction::Insert(b"XY".to_vec()),
            ]
        );
    }

    #[test]
    fn source_indexing_pass_skips_ahead_on_internal_matches() {
        // A self-repeating source should be indexed the same way the
        // target pass would scan it: the match search jumps "here" forward
        // by the match length instead of storing every overlapping
        // position, so a 16-byte source built from one repeated 4-byte
        // unit stores far fewer than `source_len - KEY_SIZE + 1` keys.
        let source = b"abcdabcdabcdabcd";
        let mut data = Vec::new();
        data.extend_from_slice(source);
        data.extend_from_slice(b"zzzz"); // unrelated 4-byte target, no matches
        let mut scratch = Scratch::new();
        let mut table = HashTable::new(&mut scratch, data.len());
        let mut sink = RecordingWindow::new();

        scan(&mut sink, &mut table, &data, 0, source.len(), source.len(), false);

        let stats = table.stats();
        // A naive "store every overlapping position" pass would store
        // source.len() - KEY_SIZE + 1 == 13 keys; skip-ahead on the
        // internal self-match collapses that to a handful.
        assert!(
            stats.links_stored < source.len() - KEY_SIZE + 1,
            "expected skip-ahead to store fewer than {} keys, got {}",
            source.len() - KEY_SIZE + 1,
            stats.links_stored
        );
    }
}
