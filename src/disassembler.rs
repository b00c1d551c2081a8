//! 6502 Disassembler Module
//!
//! Converts machine code into assembly text, one [`Instruction`] record per
//! decoded instruction. Decoding is a linear sweep driven by
//! [`OPCODE_TABLE`](crate::opcodes::OPCODE_TABLE): it does not follow control
//! flow, so walking into data produces nonsense until it happens to
//! resynchronize.
//!
//! The disassembler never fails and never writes to memory. Undefined
//! opcodes come out as `.BYTE $XX`, which the assembler accepts back.
//!
//! # Example
//!
//! ```
//! use sim6502::disassembler::disassemble_bytes;
//!
//! let listing: Vec<String> = disassemble_bytes(&[0xA9, 0x01, 0x85, 0x00], 0x0000)
//!     .into_iter()
//!     .map(|instr| instr.text)
//!     .collect();
//!
//! assert_eq!(listing, ["LDA #$01", "STA $00"]);
//! ```

pub mod decoder;
pub mod formatter;

use std::iter::FusedIterator;

use crate::addressing::AddressingMode;
use crate::opcodes::Mnemonic;
use crate::MemoryBus;

/// A single disassembled instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// `None` for an undefined opcode
    pub mnemonic: Option<Mnemonic>,

    /// Addressing mode used by this instruction (`Implied` for undefined opcodes)
    pub addressing_mode: AddressingMode,

    /// Raw bytes: opcode followed by 0-2 operand bytes
    pub bytes: Vec<u8>,

    /// Total size in bytes
    pub length: u8,

    /// Rendered assembly text, e.g. `LDA ($20),Y` or `BNE $8004`
    pub text: String,
}

impl Instruction {
    /// Operand bytes, without the opcode.
    pub fn operand(&self) -> &[u8] {
        &self.bytes[1..]
    }
}

/// Lazy disassembly of `count` instructions from a bus.
///
/// Created by [`disassemble`]. A clone continues independently from the
/// same position.
pub struct Disassembly<'a, B: MemoryBus + ?Sized> {
    bus: &'a B,
    address: u16,
    remaining: usize,
}

impl<B: MemoryBus + ?Sized> Clone for Disassembly<'_, B> {
    fn clone(&self) -> Self {
        Self {
            bus: self.bus,
            address: self.address,
            remaining: self.remaining,
        }
    }
}

impl<B: MemoryBus + ?Sized> Iterator for Disassembly<'_, B> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        if self.remaining == 0 {
            return None;
        }
        let instr = decoder::decode(self.address, |addr| Some(self.bus.read(addr)));
        self.address = self.address.wrapping_add(instr.length as u16);
        self.remaining -= 1;
        Some(instr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<B: MemoryBus + ?Sized> ExactSizeIterator for Disassembly<'_, B> {}

impl<B: MemoryBus + ?Sized> FusedIterator for Disassembly<'_, B> {}

/// Disassembles `count` consecutive instructions starting at `start`.
///
/// Addresses wrap from 0xFFFF to 0x0000. Only reads the bus.
pub fn disassemble<B: MemoryBus + ?Sized>(bus: &B, start: u16, count: usize) -> Disassembly<'_, B> {
    Disassembly {
        bus,
        address: start,
        remaining: count,
    }
}

/// Disassembles a whole byte slice loaded at `origin`.
///
/// An instruction cut short by the end of the slice is rendered as `.BYTE`
/// placeholders for the bytes that are present.
pub fn disassemble_bytes(bytes: &[u8], origin: u16) -> Vec<Instruction> {
    let fetch = |addr: u16| bytes.get(addr.wrapping_sub(origin) as usize).copied();

    let mut instructions = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let instr = decoder::decode(origin.wrapping_add(offset as u16), &fetch);
        offset += instr.length as usize;
        instructions.push(instr);
    }
    instructions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_disassemble_empty() {
        assert!(disassemble_bytes(&[], 0x8000).is_empty());
    }

    #[test]
    fn test_disassemble_truncated_tail() {
        // JMP with only one operand byte present
        let instrs = disassemble_bytes(&[0xEA, 0x4C, 0x00], 0x0200);
        let text: Vec<&str> = instrs.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(text, ["NOP", ".BYTE $4C", ".BYTE $00"]);
        assert_eq!(instrs[2].address, 0x0202);
    }

    #[test]
    fn test_iterator_is_lazy_and_exact() {
        let mut memory = FlatMemory::new();
        memory.load(0x1000, &[0xA2, 0x00, 0xE8, 0xD0, 0xFD]);

        let mut listing = disassemble(&memory, 0x1000, 3);
        assert_eq!(listing.len(), 3);

        let first = listing.next().unwrap();
        assert_eq!(first.text, "LDX #$00");

        let rest: Vec<_> = listing.clone().collect();
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[1].text, "BNE $1002");
        assert_eq!(listing.count(), 2);
    }

    #[test]
    fn test_operand_slice() {
        let instr = &disassemble_bytes(&[0x8D, 0x00, 0x80], 0)[0];
        assert_eq!(instr.operand(), &[0x00, 0x80]);
        assert_eq!(instr.mnemonic, Some(Mnemonic::STA));
    }
}
