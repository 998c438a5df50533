//! Test-only helpers shared across this crate's unit and property tests.
//!
//! None of this is part of the public API: production consumers of
//! `generate_vdelta` bring their own `WindowSink` and have no need to
//! invert one back into bytes.

#![cfg(test)]

use crate::sink::Instruction;

/// Replay a recorded instruction stream against `source` to recover the
/// target bytes it encodes.
pub(crate) fn reconstruct(source: &[u8], instructions: &[Instruction]) -> Vec<u8> {
    let mut target = Vec::new();
    for instruction in instructions {
        match instruction {
            Instruction::Insert(bytes) => target.extend_from_slice(bytes),
            Instruction::CopySource { offset, length } => {
                target.extend_from_slice(&source[*offset..*offset + *length]);
            }
            Instruction::CopyTarget { offset, length } => {
                let end = *offset + *length;
                // A target self-copy may overlap the bytes currently being
                // appended (a run-length-style repeat), so copy byte by
                // byte instead of slicing the not-yet-extended tail.
                for i in *offset..end {
                    let byte = target[i];
                    target.push(byte);
                }
            }
        }
    }
    target
}
