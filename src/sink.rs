//! The instruction sink: the capability the core needs from whatever turns
//! a stream of copy/insert instructions into something durable (a vcdiff
//! writer, an in-memory patch, a test harness).
//!
//! This is deliberately a small trait, not a class hierarchy — three
//! methods, one per instruction kind. The core never inspects how a sink
//! stores what it's given.

/// A single vdelta instruction.
///
/// Three variants, no more: this is a tagged sum type, not an extensible
/// hierarchy. `RecordingWindow` stores these directly; a wire-format
/// encoder would translate each variant into its own opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Literal bytes, carried inline.
    Insert(Vec<u8>),
    /// Copy `length` bytes starting at `offset` within the source half.
    CopySource { offset: usize, length: usize },
    /// Copy `length` bytes starting at `offset` within the target half
    /// already reconstructed (a self-reference into the delta's own
    /// output).
    CopyTarget { offset: usize, length: usize },
}

/// The capability the vdelta core needs from its output collaborator.
///
/// Implementations decide how to serialize or store what they're given;
/// the core only guarantees emission order and the four-byte minimum copy
/// length.
pub trait WindowSink {
    /// Append an insert instruction carrying `bytes` as literal data.
    fn emit_insert(&mut self, bytes: &[u8]);

    /// Append a copy from the source half.
    fn emit_copy_source(&mut self, offset: usize, length: usize);

    /// Append a copy from the already-reconstructed target half.
    fn emit_copy_target(&mut self, offset: usize, length: usize);
}

/// A `WindowSink` that simply records every instruction it receives, in
/// order, into an owned `Vec`.
///
/// Most library consumers and all of this crate's own tests use this
/// instead of writing a custom sink.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingWindow {
    instructions: Vec<Instruction>,
}

impl RecordingWindow {
    pub fn new() -> Self {
        RecordingWindow::default()
    }

    /// The recorded instructions, in emission order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Consume the window, yielding the recorded instructions.
    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl WindowSink for RecordingWindow {
    fn emit_insert(&mut self, bytes: &[u8]) {
        self.instructions.push(Instruction::Insert(bytes.to_vec()));
    }

    fn emit_copy_source(&mut self, offset: usize, length: usize) {
        self.instructions
            .push(Instruction::CopySource { offset, length });
    }

    fn emit_copy_target(&mut self, offset: usize, length: usize) {
        self.instructions
            .push(Instruction::CopyTarget { offset, length });
    }
}
