//! `vdelta`: a binary delta generator.
//!
//! Given a source byte string and a target byte string, [`generate_vdelta`]
//! expresses the target as a sequence of copy-and-insert instructions
//! against the source and the already-emitted prefix of the target itself.
//! This is the Hunt/Vo/Tichy `vdelta` algorithm: a greedy, linear-time,
//! one-pass construction that trades optimal compression for speed and
//! simplicity — the algorithmic core of a version-control system's
//! "txdelta" pipeline.
//!
//! This crate covers the core only. Turning the emitted [`sink::Instruction`]
//! stream into a wire format (vcdiff or otherwise), paging a larger stream
//! into fixed-size windows, and applying a delta back against a source are
//! all left to the host; see [`sink`] and [`config`] for the seams.
//!
//! ```
//! use vdelta::{generate_vdelta, Scratch};
//! use vdelta::sink::RecordingWindow;
//!
//! let source = b"the quick brown fox";
//! let target = b"the quick brown fox jumps";
//! let mut data = Vec::new();
//! data.extend_from_slice(source);
//! data.extend_from_slice(target);
//!
//! let mut window = RecordingWindow::new();
//! let mut scratch = Scratch::new();
//! generate_vdelta(&mut window, &data, source.len(), target.len(), &mut scratch).unwrap();
//! assert!(!window.instructions().is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod delta;
pub mod error;
pub mod hash_table;
pub mod matcher;
pub mod scratch;
pub mod sink;

#[cfg(test)]
mod test_support;

pub use config::VdeltaConfig;
pub use delta::generate_vdelta;
pub use error::VdeltaError;
pub use scratch::Scratch;
pub use sink::{Instruction, RecordingWindow, WindowSink};
