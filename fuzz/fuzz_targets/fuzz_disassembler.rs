//! Fuzz target for the disassembler.
//!
//! Feeds arbitrary byte sequences to the disassembler and checks that the
//! listing is contiguous and accounts for every input byte.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::disassemble_bytes;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    origin: u16,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to one address space
    if input.bytes.len() > 65536 {
        return;
    }

    let instructions = disassemble_bytes(&input.bytes, input.origin);

    let mut total_size: usize = 0;
    let mut expected_address = input.origin;

    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!((1..=3).contains(&instr.length));
        assert_eq!(instr.bytes.len(), instr.length as usize);
        assert!(!instr.text.is_empty());

        total_size += instr.length as usize;
        expected_address = expected_address.wrapping_add(instr.length as u16);
    }

    assert_eq!(total_size, input.bytes.len());
});
