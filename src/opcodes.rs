//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for instruction decoding, execution cost and encoding. The
//! engine, the assembler and the disassembler all read from it, so the three
//! can never disagree about an instruction's length, mode or cycle cost.
//!
//! The table covers the 151 documented NMOS 6502 opcodes. The remaining 105
//! byte values are `None`; the engine treats them as a two-cycle no-op and the
//! disassembler renders them as a `.BYTE` placeholder.
//!
//! The reverse direction (mnemonic + addressing mode → opcode) is derived from
//! the same table at compile time, see [`ENCODING_TABLE`].

use std::fmt;
use std::str::FromStr;

use crate::addressing::AddressingMode;

macro_rules! mnemonics {
    ($($name:ident => $doc:literal,)*) => {
        /// Instruction mnemonic; doubles as the operation selector for execution.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Mnemonic {
            $(
                #[doc = $doc]
                $name,
            )*
        }

        impl Mnemonic {
            /// Every mnemonic, in declaration order.
            pub const ALL: &'static [Mnemonic] = &[$(Mnemonic::$name,)*];

            /// Number of mnemonics, used to size per-mnemonic lookup tables.
            pub const COUNT: usize = Self::ALL.len();

            /// Upper-case three-letter name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Mnemonic::$name => stringify!($name),)*
                }
            }
        }
    };
}

mnemonics! {
    ADC => "Add with carry",
    AND => "Logical AND",
    ASL => "Arithmetic shift left",
    BCC => "Branch if carry clear",
    BCS => "Branch if carry set",
    BEQ => "Branch if equal (zero set)",
    BIT => "Bit test",
    BMI => "Branch if minus",
    BNE => "Branch if not equal (zero clear)",
    BPL => "Branch if plus",
    BRK => "Force interrupt",
    BVC => "Branch if overflow clear",
    BVS => "Branch if overflow set",
    CLC => "Clear carry",
    CLD => "Clear decimal mode",
    CLI => "Clear interrupt disable",
    CLV => "Clear overflow",
    CMP => "Compare accumulator",
    CPX => "Compare X",
    CPY => "Compare Y",
    DEC => "Decrement memory",
    DEX => "Decrement X",
    DEY => "Decrement Y",
    EOR => "Exclusive OR",
    INC => "Increment memory",
    INX => "Increment X",
    INY => "Increment Y",
    JMP => "Jump",
    JSR => "Jump to subroutine",
    LDA => "Load accumulator",
    LDX => "Load X",
    LDY => "Load Y",
    LSR => "Logical shift right",
    NOP => "No operation",
    ORA => "Logical inclusive OR",
    PHA => "Push accumulator",
    PHP => "Push processor status",
    PLA => "Pull accumulator",
    PLP => "Pull processor status",
    ROL => "Rotate left",
    ROR => "Rotate right",
    RTI => "Return from interrupt",
    RTS => "Return from subroutine",
    SBC => "Subtract with carry",
    SEC => "Set carry",
    SED => "Set decimal mode",
    SEI => "Set interrupt disable",
    STA => "Store accumulator",
    STX => "Store X",
    STY => "Store Y",
    TAX => "Transfer A to X",
    TAY => "Transfer A to Y",
    TSX => "Transfer SP to X",
    TXA => "Transfer X to A",
    TXS => "Transfer X to SP",
    TYA => "Transfer Y to A",
}

impl Mnemonic {
    /// True for the eight conditional branches, whose operand is a relative displacement.
    pub const fn is_branch(self) -> bool {
        use Mnemonic::*;
        matches!(self, BCC | BCS | BEQ | BMI | BNE | BPL | BVC | BVS)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mnemonic {
    type Err = ();

    /// Case-insensitive lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Conditional cycle penalty attached to an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraCycle {
    /// Cycle count is fixed.
    Never,

    /// +1 when indexing crosses a page boundary (read-class indexed modes only).
    PageCross,

    /// +1 when the branch is taken, +1 more when the target is on another page.
    Branch,
}

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use sim6502::{metadata, AddressingMode, Mnemonic};
///
/// let lda_imm = metadata(0xA9).unwrap();
/// assert_eq!(lda_imm.mnemonic, Mnemonic::LDA);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing and branch penalties).
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// Rule for conditional extra cycles.
    pub extra_cycle: ExtraCycle,
}

const fn entry(
    mnemonic: Mnemonic,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    extra_cycle: ExtraCycle,
) -> Option<OpcodeMetadata> {
    Some(OpcodeMetadata {
        mnemonic,
        addressing_mode,
        base_cycles,
        size_bytes: 1 + addressing_mode.operand_len(),
        extra_cycle,
    })
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// Undefined opcodes are `None`.
pub const OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_opcode_table();

const fn build_opcode_table() -> [Option<OpcodeMetadata>; 256] {
    use AddressingMode::*;
    use ExtraCycle::*;
    use Mnemonic::*;

    let mut t: [Option<OpcodeMetadata>; 256] = [None; 256];

    // Load / store
    t[0xA9] = entry(LDA, Immediate, 2, Never);
    t[0xA5] = entry(LDA, ZeroPage, 3, Never);
    t[0xB5] = entry(LDA, ZeroPageX, 4, Never);
    t[0xAD] = entry(LDA, Absolute, 4, Never);
    t[0xBD] = entry(LDA, AbsoluteX, 4, PageCross);
    t[0xB9] = entry(LDA, AbsoluteY, 4, PageCross);
    t[0xA1] = entry(LDA, IndirectX, 6, Never);
    t[0xB1] = entry(LDA, IndirectY, 5, PageCross);

    t[0xA2] = entry(LDX, Immediate, 2, Never);
    t[0xA6] = entry(LDX, ZeroPage, 3, Never);
    t[0xB6] = entry(LDX, ZeroPageY, 4, Never);
    t[0xAE] = entry(LDX, Absolute, 4, Never);
    t[0xBE] = entry(LDX, AbsoluteY, 4, PageCross);

    t[0xA0] = entry(LDY, Immediate, 2, Never);
    t[0xA4] = entry(LDY, ZeroPage, 3, Never);
    t[0xB4] = entry(LDY, ZeroPageX, 4, Never);
    t[0xAC] = entry(LDY, Absolute, 4, Never);
    t[0xBC] = entry(LDY, AbsoluteX, 4, PageCross);

    t[0x85] = entry(STA, ZeroPage, 3, Never);
    t[0x95] = entry(STA, ZeroPageX, 4, Never);
    t[0x8D] = entry(STA, Absolute, 4, Never);
    t[0x9D] = entry(STA, AbsoluteX, 5, Never);
    t[0x99] = entry(STA, AbsoluteY, 5, Never);
    t[0x81] = entry(STA, IndirectX, 6, Never);
    t[0x91] = entry(STA, IndirectY, 6, Never);

    t[0x86] = entry(STX, ZeroPage, 3, Never);
    t[0x96] = entry(STX, ZeroPageY, 4, Never);
    t[0x8E] = entry(STX, Absolute, 4, Never);

    t[0x84] = entry(STY, ZeroPage, 3, Never);
    t[0x94] = entry(STY, ZeroPageX, 4, Never);
    t[0x8C] = entry(STY, Absolute, 4, Never);

    // Register transfers
    t[0xAA] = entry(TAX, Implied, 2, Never);
    t[0xA8] = entry(TAY, Implied, 2, Never);
    t[0xBA] = entry(TSX, Implied, 2, Never);
    t[0x8A] = entry(TXA, Implied, 2, Never);
    t[0x9A] = entry(TXS, Implied, 2, Never);
    t[0x98] = entry(TYA, Implied, 2, Never);

    // Stack
    t[0x48] = entry(PHA, Implied, 3, Never);
    t[0x08] = entry(PHP, Implied, 3, Never);
    t[0x68] = entry(PLA, Implied, 4, Never);
    t[0x28] = entry(PLP, Implied, 4, Never);

    // Logical
    t[0x29] = entry(AND, Immediate, 2, Never);
    t[0x25] = entry(AND, ZeroPage, 3, Never);
    t[0x35] = entry(AND, ZeroPageX, 4, Never);
    t[0x2D] = entry(AND, Absolute, 4, Never);
    t[0x3D] = entry(AND, AbsoluteX, 4, PageCross);
    t[0x39] = entry(AND, AbsoluteY, 4, PageCross);
    t[0x21] = entry(AND, IndirectX, 6, Never);
    t[0x31] = entry(AND, IndirectY, 5, PageCross);

    t[0x49] = entry(EOR, Immediate, 2, Never);
    t[0x45] = entry(EOR, ZeroPage, 3, Never);
    t[0x55] = entry(EOR, ZeroPageX, 4, Never);
    t[0x4D] = entry(EOR, Absolute, 4, Never);
    t[0x5D] = entry(EOR, AbsoluteX, 4, PageCross);
    t[0x59] = entry(EOR, AbsoluteY, 4, PageCross);
    t[0x41] = entry(EOR, IndirectX, 6, Never);
    t[0x51] = entry(EOR, IndirectY, 5, PageCross);

    t[0x09] = entry(ORA, Immediate, 2, Never);
    t[0x05] = entry(ORA, ZeroPage, 3, Never);
    t[0x15] = entry(ORA, ZeroPageX, 4, Never);
    t[0x0D] = entry(ORA, Absolute, 4, Never);
    t[0x1D] = entry(ORA, AbsoluteX, 4, PageCross);
    t[0x19] = entry(ORA, AbsoluteY, 4, PageCross);
    t[0x01] = entry(ORA, IndirectX, 6, Never);
    t[0x11] = entry(ORA, IndirectY, 5, PageCross);

    t[0x24] = entry(BIT, ZeroPage, 3, Never);
    t[0x2C] = entry(BIT, Absolute, 4, Never);

    // Arithmetic
    t[0x69] = entry(ADC, Immediate, 2, Never);
    t[0x65] = entry(ADC, ZeroPage, 3, Never);
    t[0x75] = entry(ADC, ZeroPageX, 4, Never);
    t[0x6D] = entry(ADC, Absolute, 4, Never);
    t[0x7D] = entry(ADC, AbsoluteX, 4, PageCross);
    t[0x79] = entry(ADC, AbsoluteY, 4, PageCross);
    t[0x61] = entry(ADC, IndirectX, 6, Never);
    t[0x71] = entry(ADC, IndirectY, 5, PageCross);

    t[0xE9] = entry(SBC, Immediate, 2, Never);
    t[0xE5] = entry(SBC, ZeroPage, 3, Never);
    t[0xF5] = entry(SBC, ZeroPageX, 4, Never);
    t[0xED] = entry(SBC, Absolute, 4, Never);
    t[0xFD] = entry(SBC, AbsoluteX, 4, PageCross);
    t[0xF9] = entry(SBC, AbsoluteY, 4, PageCross);
    t[0xE1] = entry(SBC, IndirectX, 6, Never);
    t[0xF1] = entry(SBC, IndirectY, 5, PageCross);

    t[0xC9] = entry(CMP, Immediate, 2, Never);
    t[0xC5] = entry(CMP, ZeroPage, 3, Never);
    t[0xD5] = entry(CMP, ZeroPageX, 4, Never);
    t[0xCD] = entry(CMP, Absolute, 4, Never);
    t[0xDD] = entry(CMP, AbsoluteX, 4, PageCross);
    t[0xD9] = entry(CMP, AbsoluteY, 4, PageCross);
    t[0xC1] = entry(CMP, IndirectX, 6, Never);
    t[0xD1] = entry(CMP, IndirectY, 5, PageCross);

    t[0xE0] = entry(CPX, Immediate, 2, Never);
    t[0xE4] = entry(CPX, ZeroPage, 3, Never);
    t[0xEC] = entry(CPX, Absolute, 4, Never);

    t[0xC0] = entry(CPY, Immediate, 2, Never);
    t[0xC4] = entry(CPY, ZeroPage, 3, Never);
    t[0xCC] = entry(CPY, Absolute, 4, Never);

    // Increment / decrement
    t[0xE6] = entry(INC, ZeroPage, 5, Never);
    t[0xF6] = entry(INC, ZeroPageX, 6, Never);
    t[0xEE] = entry(INC, Absolute, 6, Never);
    t[0xFE] = entry(INC, AbsoluteX, 7, Never);
    t[0xE8] = entry(INX, Implied, 2, Never);
    t[0xC8] = entry(INY, Implied, 2, Never);

    t[0xC6] = entry(DEC, ZeroPage, 5, Never);
    t[0xD6] = entry(DEC, ZeroPageX, 6, Never);
    t[0xCE] = entry(DEC, Absolute, 6, Never);
    t[0xDE] = entry(DEC, AbsoluteX, 7, Never);
    t[0xCA] = entry(DEX, Implied, 2, Never);
    t[0x88] = entry(DEY, Implied, 2, Never);

    // Shifts and rotates
    t[0x0A] = entry(ASL, Accumulator, 2, Never);
    t[0x06] = entry(ASL, ZeroPage, 5, Never);
    t[0x16] = entry(ASL, ZeroPageX, 6, Never);
    t[0x0E] = entry(ASL, Absolute, 6, Never);
    t[0x1E] = entry(ASL, AbsoluteX, 7, Never);

    t[0x4A] = entry(LSR, Accumulator, 2, Never);
    t[0x46] = entry(LSR, ZeroPage, 5, Never);
    t[0x56] = entry(LSR, ZeroPageX, 6, Never);
    t[0x4E] = entry(LSR, Absolute, 6, Never);
    t[0x5E] = entry(LSR, AbsoluteX, 7, Never);

    t[0x2A] = entry(ROL, Accumulator, 2, Never);
    t[0x26] = entry(ROL, ZeroPage, 5, Never);
    t[0x36] = entry(ROL, ZeroPageX, 6, Never);
    t[0x2E] = entry(ROL, Absolute, 6, Never);
    t[0x3E] = entry(ROL, AbsoluteX, 7, Never);

    t[0x6A] = entry(ROR, Accumulator, 2, Never);
    t[0x66] = entry(ROR, ZeroPage, 5, Never);
    t[0x76] = entry(ROR, ZeroPageX, 6, Never);
    t[0x6E] = entry(ROR, Absolute, 6, Never);
    t[0x7E] = entry(ROR, AbsoluteX, 7, Never);

    // Branches
    t[0x10] = entry(BPL, Relative, 2, Branch);
    t[0x30] = entry(BMI, Relative, 2, Branch);
    t[0x50] = entry(BVC, Relative, 2, Branch);
    t[0x70] = entry(BVS, Relative, 2, Branch);
    t[0x90] = entry(BCC, Relative, 2, Branch);
    t[0xB0] = entry(BCS, Relative, 2, Branch);
    t[0xD0] = entry(BNE, Relative, 2, Branch);
    t[0xF0] = entry(BEQ, Relative, 2, Branch);

    // Jumps, calls, returns
    t[0x4C] = entry(JMP, Absolute, 3, Never);
    t[0x6C] = entry(JMP, Indirect, 5, Never);
    t[0x20] = entry(JSR, Absolute, 6, Never);
    t[0x60] = entry(RTS, Implied, 6, Never);
    t[0x40] = entry(RTI, Implied, 6, Never);
    t[0x00] = entry(BRK, Implied, 7, Never);
    t[0xEA] = entry(NOP, Implied, 2, Never);

    // Flags
    t[0x18] = entry(CLC, Implied, 2, Never);
    t[0x38] = entry(SEC, Implied, 2, Never);
    t[0x58] = entry(CLI, Implied, 2, Never);
    t[0x78] = entry(SEI, Implied, 2, Never);
    t[0xB8] = entry(CLV, Implied, 2, Never);
    t[0xD8] = entry(CLD, Implied, 2, Never);
    t[0xF8] = entry(SED, Implied, 2, Never);

    t
}

/// Mnemonic × addressing mode → opcode, derived from [`OPCODE_TABLE`].
///
/// Indexed by `Mnemonic as usize`, then `AddressingMode as usize`.
pub const ENCODING_TABLE: [[Option<u8>; AddressingMode::COUNT]; Mnemonic::COUNT] =
    build_encoding_table();

const fn build_encoding_table() -> [[Option<u8>; AddressingMode::COUNT]; Mnemonic::COUNT] {
    let mut table = [[None; AddressingMode::COUNT]; Mnemonic::COUNT];
    let mut opcode = 0;
    while opcode < 256 {
        if let Some(meta) = OPCODE_TABLE[opcode] {
            table[meta.mnemonic as usize][meta.addressing_mode as usize] = Some(opcode as u8);
        }
        opcode += 1;
    }
    table
}

static OPCODES: [Option<OpcodeMetadata>; 256] = OPCODE_TABLE;

/// Looks up the metadata for an opcode byte; `None` for undefined opcodes.
pub fn metadata(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODES[opcode as usize].as_ref()
}

/// Looks up the opcode encoding `mnemonic` in `mode`, if the combination exists.
///
/// ```
/// use sim6502::{opcode_for, AddressingMode, Mnemonic};
///
/// assert_eq!(opcode_for(Mnemonic::STA, AddressingMode::ZeroPage), Some(0x85));
/// assert_eq!(opcode_for(Mnemonic::STA, AddressingMode::Immediate), None);
/// ```
pub const fn opcode_for(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    ENCODING_TABLE[mnemonic as usize][mode as usize]
}
