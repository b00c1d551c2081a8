//! Formatting functions for disassembled instructions

use std::fmt::Write;

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;

/// Assembly text for `instr`, in the syntax the assembler accepts.
pub fn format_instruction(instr: &Instruction) -> String {
    let Some(mnemonic) = instr.mnemonic else {
        return format!(".BYTE ${:02X}", instr.opcode);
    };

    let operand = format_operand(instr);
    if operand.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{} {}", mnemonic, operand)
    }
}

fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    let operand = instr.operand();
    let byte = operand.first().copied().unwrap_or(0);
    let word = match operand {
        [lo, hi] => u16::from_le_bytes([*lo, *hi]),
        _ => byte as u16,
    };

    match instr.addressing_mode {
        Implied => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", byte),
        ZeroPage => format!("${:02X}", byte),
        ZeroPageX => format!("${:02X},X", byte),
        ZeroPageY => format!("${:02X},Y", byte),
        Absolute => format!("${:04X}", word),
        AbsoluteX => format!("${:04X},X", word),
        AbsoluteY => format!("${:04X},Y", word),
        Indirect => format!("(${:04X})", word),
        IndirectX => format!("(${:02X},X)", byte),
        IndirectY => format!("(${:02X}),Y", byte),
        Relative => format!("${:04X}", branch_target(instr.address, instr.length, byte)),
    }
}

/// Target of a relative branch: instruction address + length + signed displacement.
pub fn branch_target(address: u16, length: u8, displacement: u8) -> u16 {
    address
        .wrapping_add(length as u16)
        .wrapping_add_signed(displacement as i8 as i16)
}

/// One listing line: `AAAA: BB BB BB  TEXT`, bytes padded to three columns.
pub fn listing_line(instr: &Instruction) -> String {
    let mut line = format!("{:04X}:", instr.address);
    for i in 0..3 {
        match instr.bytes.get(i) {
            Some(b) => {
                let _ = write!(line, " {:02X}", b);
            }
            None => line.push_str("   "),
        }
    }
    line.push_str("  ");
    line.push_str(&instr.text);
    line
}
