//! Instruction decoder for the 6502 disassembler

use crate::addressing::AddressingMode;
use crate::disassembler::{formatter, Instruction};
use crate::opcodes;

/// Decodes the instruction at `address`.
///
/// `fetch` returns the byte at an address, or `None` past the end of the
/// input. An undefined opcode, or one whose operand bytes are not all
/// available, decodes as a one-byte `.BYTE` record.
pub fn decode(address: u16, fetch: impl Fn(u16) -> Option<u8>) -> Instruction {
    let opcode = fetch(address).unwrap_or(0);

    let decoded = opcodes::metadata(opcode).and_then(|meta| {
        let bytes = (0..meta.size_bytes as u16)
            .map(|i| fetch(address.wrapping_add(i)))
            .collect::<Option<Vec<u8>>>()?;
        Some((meta, bytes))
    });

    let mut instr = match decoded {
        Some((meta, bytes)) => Instruction {
            address,
            opcode,
            mnemonic: Some(meta.mnemonic),
            addressing_mode: meta.addressing_mode,
            bytes,
            length: meta.size_bytes,
            text: String::new(),
        },
        None => Instruction {
            address,
            opcode,
            mnemonic: None,
            addressing_mode: AddressingMode::Implied,
            bytes: vec![opcode],
            length: 1,
            text: String::new(),
        },
    };

    instr.text = formatter::format_instruction(&instr);
    instr
}
