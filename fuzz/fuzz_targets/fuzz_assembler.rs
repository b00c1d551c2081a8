//! Fuzz target for the assembler.
//!
//! Feeds arbitrary text to the assembler. Any input must produce either
//! output or diagnostics, never a panic; successful output must disassemble
//! to exactly as many bytes as were emitted.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sim6502::{assemble, disassemble_bytes};

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    match assemble(&source) {
        Ok(output) => {
            let covered: usize = disassemble_bytes(&output.bytes, output.origin)
                .iter()
                .map(|instr| instr.length as usize)
                .sum();
            assert_eq!(covered, output.bytes.len());
        }
        Err(errors) => {
            assert!(!errors.is_empty());
            assert!(errors.windows(2).all(|w| w[0].line <= w[1].line));
        }
    }
});
