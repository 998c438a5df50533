//! Driver configuration.
//!
//! `window_size` bounds the quadratic worst case of pathological inputs
//! and keeps the hash table's working set in cache; it's a property of the
//! host's window-paging policy, not of the vdelta algorithm itself, so it
//! lives on an explicit config object rather than as a constant baked into
//! the core.

use std::sync::OnceLock;

/// Default window size, in bytes, matching the reference implementation.
pub const DEFAULT_WINDOW_SIZE: usize = 102_400;

/// Configuration for a `generate_vdelta` driver.
///
/// `generate_vdelta` itself does not read `window_size` — it operates on
/// whatever `(source_len, target_len)` it's given. The field exists so a
/// host that pages a larger stream into fixed-size windows has one place
/// to carry that policy, rather than threading a bare `usize` through its
/// own call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VdeltaConfig {
    pub window_size: usize,
}

impl Default for VdeltaConfig {
    fn default() -> Self {
        VdeltaConfig {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl VdeltaConfig {
    pub fn new(window_size: usize) -> Self {
        VdeltaConfig { window_size }
    }
}

static LEGACY_WINDOW_SIZE: OnceLock<usize> = OnceLock::new();

/// Set a process-wide default window size, for hosts migrating from a
/// global-tunable design that can't thread a `VdeltaConfig` through every
/// call site yet.
///
/// This has no effect on `generate_vdelta`, which only ever looks at the
/// `VdeltaConfig` (or raw lengths) it's explicitly given; it exists purely
/// as a value new callers can read with [`legacy_window_size`]. May be
/// called at most once per process; subsequent calls are ignored.
pub fn set_legacy_window_size(window_size: usize) {
    let _ = LEGACY_WINDOW_SIZE.set(window_size);
}

/// The process-wide default set by [`set_legacy_window_size`], or
/// [`DEFAULT_WINDOW_SIZE`] if it was never called.
pub fn legacy_window_size() -> usize {
    *LEGACY_WINDOW_SIZE.get().unwrap_or(&DEFAULT_WINDOW_SIZE)
}
