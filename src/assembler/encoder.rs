//! Instruction encoder for the 6502 assembler
//!
//! Turns a mnemonic and its operand text into an addressing mode and bytes.
//! Mode inference is split in two steps so pass 1 can size an instruction
//! whose operand is not resolvable yet:
//!
//! 1. [`classify`] reads the operand's surface syntax (`#`, parentheses,
//!    index suffix)
//! 2. [`select_mode`] picks the concrete mode from the syntax, the operand
//!    value when known, and what the mnemonic supports
//!
//! [`encode`] then looks the opcode up in [`ENCODING_TABLE`](crate::opcodes::ENCODING_TABLE)
//! and appends the operand bytes.

use crate::addressing::AddressingMode;
use crate::assembler::{AssemblerError, ErrorKind};
use crate::opcodes::{opcode_for, Mnemonic};

/// Index register named by an operand suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    X,
    Y,
}

/// Surface form of an operand, before any value is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSyntax<'a> {
    /// No operand text
    None,
    /// `A`
    Accumulator,
    /// `#expr`
    Immediate(&'a str),
    /// `(expr,X)`
    IndexedIndirect(&'a str),
    /// `(expr),Y`
    IndirectIndexed(&'a str),
    /// `(expr)`
    Indirect(&'a str),
    /// `expr`, `expr,X`, `expr,Y`
    Direct(&'a str, Option<Index>),
}

impl<'a> OperandSyntax<'a> {
    /// The expression inside the operand, if it has one.
    pub fn expression(&self) -> Option<&'a str> {
        match *self {
            OperandSyntax::None | OperandSyntax::Accumulator => None,
            OperandSyntax::Immediate(e)
            | OperandSyntax::IndexedIndirect(e)
            | OperandSyntax::IndirectIndexed(e)
            | OperandSyntax::Indirect(e)
            | OperandSyntax::Direct(e, _) => Some(e),
        }
    }
}

/// Reads the addressing syntax of `operand`. Index suffixes are case-insensitive.
///
/// A lone `A` names the accumulator only when `mnemonic` has an accumulator
/// form; otherwise it is an expression like any other identifier.
pub fn classify(mnemonic: Mnemonic, operand: &str) -> OperandSyntax<'_> {
    let operand = operand.trim();

    if operand.is_empty() {
        return OperandSyntax::None;
    }
    if operand.eq_ignore_ascii_case("A") && opcode_for(mnemonic, AddressingMode::Accumulator).is_some() {
        return OperandSyntax::Accumulator;
    }
    if let Some(expr) = operand.strip_prefix('#') {
        return OperandSyntax::Immediate(expr.trim());
    }

    if let Some(inner) = operand.strip_prefix('(') {
        if let Some((head, Index::Y)) = split_index(inner) {
            if let Some(expr) = head.strip_suffix(')') {
                return OperandSyntax::IndirectIndexed(expr.trim());
            }
        }
        if let Some(inner) = inner.strip_suffix(')') {
            return match split_index(inner) {
                Some((expr, Index::X)) => OperandSyntax::IndexedIndirect(expr),
                _ => OperandSyntax::Indirect(inner.trim()),
            };
        }
    }

    match split_index(operand) {
        Some((expr, index)) => OperandSyntax::Direct(expr, Some(index)),
        None => OperandSyntax::Direct(operand, None),
    }
}

/// Splits a trailing `,X` / `,Y` off `text`.
fn split_index(text: &str) -> Option<(&str, Index)> {
    let (head, suffix) = text.rsplit_once(',')?;
    let index = match suffix.trim() {
        s if s.eq_ignore_ascii_case("X") => Index::X,
        s if s.eq_ignore_ascii_case("Y") => Index::Y,
        _ => return None,
    };
    Some((head.trim(), index))
}

/// Chooses the addressing mode for `mnemonic` with the given operand syntax.
///
/// `value` is the operand's value when already known. `wide` forces the
/// absolute form of a direct operand even when the value would fit in the
/// zero page, which keeps forward references the same size in both passes.
///
/// The mode returned here may still be unencodable for the mnemonic;
/// [`encode`] reports that.
pub fn select_mode(
    mnemonic: Mnemonic,
    syntax: OperandSyntax<'_>,
    value: Option<i32>,
    wide: bool,
) -> AddressingMode {
    use AddressingMode::*;

    match syntax {
        OperandSyntax::Direct(_, None) if mnemonic.is_branch() => Relative,
        OperandSyntax::None => {
            if opcode_for(mnemonic, Implied).is_none() && opcode_for(mnemonic, Accumulator).is_some() {
                Accumulator
            } else {
                Implied
            }
        }
        OperandSyntax::Accumulator => Accumulator,
        OperandSyntax::Immediate(_) => Immediate,
        OperandSyntax::IndexedIndirect(_) => IndirectX,
        OperandSyntax::IndirectIndexed(_) => IndirectY,
        OperandSyntax::Indirect(_) => Indirect,
        OperandSyntax::Direct(_, index) => direct_mode(mnemonic, index, value, wide),
    }
}

fn direct_mode(mnemonic: Mnemonic, index: Option<Index>, value: Option<i32>, wide: bool) -> AddressingMode {
    use AddressingMode::*;

    let (zero_page, absolute) = match index {
        None => (ZeroPage, Absolute),
        Some(Index::X) => (ZeroPageX, AbsoluteX),
        Some(Index::Y) => (ZeroPageY, AbsoluteY),
    };

    let fits = matches!(value, Some(v) if (0..=0xFF).contains(&v));
    let has_zero_page = opcode_for(mnemonic, zero_page).is_some();
    let has_absolute = opcode_for(mnemonic, absolute).is_some();

    if has_zero_page && (!has_absolute || (fits && !wide)) {
        zero_page
    } else {
        absolute
    }
}

/// Encodes one instruction at `pc`: the opcode byte followed by its operand bytes.
///
/// `value` must be the fully resolved operand value (or `None` for operand-less
/// syntax).
pub fn encode(
    line: usize,
    mnemonic: Mnemonic,
    mode: AddressingMode,
    value: Option<i32>,
    pc: u16,
) -> Result<Vec<u8>, AssemblerError> {
    use AddressingMode::*;

    let opcode = opcode_for(mnemonic, mode).ok_or_else(|| {
        AssemblerError::new(
            line,
            ErrorKind::InvalidAddressingMode,
            format!("{} does not support {:?} addressing", mnemonic, mode),
        )
    })?;

    let mut bytes = vec![opcode];
    let value = match (mode, value) {
        (Implied | Accumulator, _) => return Ok(bytes),
        (_, Some(value)) => value,
        (_, None) => {
            return Err(AssemblerError::new(
                line,
                ErrorKind::InvalidAddressingMode,
                format!("{} requires an operand", mnemonic),
            ))
        }
    };

    let out_of_range = |what: &str| {
        AssemblerError::new(
            line,
            ErrorKind::ValueOutOfRange,
            format!("{} ${:X} out of range for {}", what, value, mnemonic),
        )
    };

    match mode {
        Immediate => {
            if !(-128..=0xFF).contains(&value) {
                return Err(out_of_range("immediate value"));
            }
            bytes.push(value as u8);
        }
        ZeroPage | ZeroPageX | ZeroPageY | IndirectX | IndirectY => {
            if !(0..=0xFF).contains(&value) {
                return Err(out_of_range("zero page address"));
            }
            bytes.push(value as u8);
        }
        Absolute | AbsoluteX | AbsoluteY | Indirect => {
            if !(0..=0xFFFF).contains(&value) {
                return Err(out_of_range("address"));
            }
            bytes.extend_from_slice(&(value as u16).to_le_bytes());
        }
        Relative => {
            let offset = value - (pc as i32 + 2);
            if !(-128..=127).contains(&offset) {
                return Err(AssemblerError::new(
                    line,
                    ErrorKind::BranchOutOfRange,
                    format!("branch target ${:04X} is {} bytes away (limit -128..127)", value, offset),
                ));
            }
            bytes.push(offset as i8 as u8);
        }
        Implied | Accumulator => {}
    }

    Ok(bytes)
}
