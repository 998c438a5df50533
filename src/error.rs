//! Crate-level error type.
//!
//! The core is designed to be infallible given well-formed inputs: the only
//! thing that can actually fail at runtime is the scratch allocation
//! boundary. Contract violations (out-of-range offsets, a null buffer with
//! nonzero length) are programmer errors, caught by
//! `assert!`/`debug_assert!` rather than surfaced as `Result`.

use thiserror::Error;

use crate::scratch::ScratchError;

/// Everything that can go wrong calling [`crate::generate_vdelta`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VdeltaError {
    #[error("scratch allocation failed: {0}")]
    Scratch(#[from] ScratchError),
}
