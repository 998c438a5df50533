#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vdelta::sink::{Instruction, RecordingWindow};
use vdelta::{generate_vdelta, Scratch};

#[derive(Arbitrary, Debug)]
struct Input {
    source: Vec<u8>,
    target: Vec<u8>,
}

fn reconstruct(source: &[u8], instructions: &[Instruction]) -> Vec<u8> {
    let mut target = Vec::new();
    for instruction in instructions {
        match instruction {
            Instruction::Insert(bytes) => target.extend_from_slice(bytes),
            Instruction::CopySource { offset, length } => {
                target.extend_from_slice(&source[*offset..*offset + *length]);
            }
            Instruction::CopyTarget { offset, length } => {
                let end = *offset + *length;
                for i in *offset..end {
                    let byte = target[i];
                    target.push(byte);
                }
            }
        }
    }
    target
}

fuzz_target!(|input: Input| {
    let Input { source, target } = input;

    let mut data = Vec::with_capacity(source.len() + target.len());
    data.extend_from_slice(&source);
    data.extend_from_slice(&target);

    let mut window = RecordingWindow::new();
    let mut scratch = Scratch::new();
    generate_vdelta(&mut window, &data, source.len(), target.len(), &mut scratch)
        .expect("scratch allocation should not fail for fuzzer-sized inputs");

    let instructions = window.instructions();
    assert_eq!(reconstruct(&source, instructions), target);
});
