//! # Addressing Modes
//!
//! How an opcode finds its operand. The mode fixes the instruction length and
//! the assembler syntax; the CPU resolves it to a value or an effective address.

/// One of the 13 NMOS 6502 addressing modes.
///
/// Syntax shown is what the assembler accepts and the disassembler prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// `CLC`, `RTS`
    Implied,
    /// `ASL A`; an empty operand on a shift or rotate means the same.
    Accumulator,
    /// `LDA #$10`
    Immediate,
    /// `LDA $80`
    ZeroPage,
    /// `LDA $80,X`. The sum stays in page zero.
    ZeroPageX,
    /// `LDX $80,Y`. The sum stays in page zero.
    ZeroPageY,
    /// `JMP $1234`
    Absolute,
    /// `LDA $1234,X`
    AbsoluteX,
    /// `LDA $1234,Y`
    AbsoluteY,
    /// `JMP ($FFFC)`. The pointer's high byte is fetched from the same page
    /// as its low byte, so `JMP ($10FF)` reads $10FF and $1000.
    Indirect,
    /// `LDA ($40,X)`: pointer at `$40 + X` in page zero.
    IndirectX,
    /// `LDA ($40),Y`: pointer at `$40`, then `+ Y`.
    IndirectY,
    /// Branch target, stored as a signed offset from the next instruction.
    Relative,
}

impl AddressingMode {
    /// Number of modes, used to size per-mode lookup tables.
    pub const COUNT: usize = 13;

    /// Every mode, in declaration order.
    pub const ALL: [AddressingMode; Self::COUNT] = [
        AddressingMode::Implied,
        AddressingMode::Accumulator,
        AddressingMode::Immediate,
        AddressingMode::ZeroPage,
        AddressingMode::ZeroPageX,
        AddressingMode::ZeroPageY,
        AddressingMode::Absolute,
        AddressingMode::AbsoluteX,
        AddressingMode::AbsoluteY,
        AddressingMode::Indirect,
        AddressingMode::IndirectX,
        AddressingMode::IndirectY,
        AddressingMode::Relative,
    ];

    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implied | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndirectX | IndirectY | Relative => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }
}
