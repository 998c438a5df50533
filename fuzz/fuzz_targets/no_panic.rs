#![no_main]
use libfuzzer_sys::fuzz_target;
use vdelta::sink::RecordingWindow;
use vdelta::{generate_vdelta, Scratch};

// Splits the raw fuzzer input at a byte derived from its own length rather
// than deriving a struct with `arbitrary`, so this target also stresses the
// source_len == 0 / target_len == 0 edges that a structured split tends to
// under-sample.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let split = (data[0] as usize) % (data.len() + 1);
    let source_len = split;
    let target_len = data.len() - split;

    let mut window = RecordingWindow::new();
    let mut scratch = Scratch::new();
    let _ = generate_vdelta(&mut window, data, source_len, target_len, &mut scratch);
});
