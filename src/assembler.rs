//! 6502 Assembler Module
//!
//! Converts assembly language source code into binary machine code.
//!
//! Assembly runs in two passes over the parsed lines. Pass 1 tracks the
//! program counter and defines every label and constant; pass 2 re-walks the
//! same lines with the complete symbol table and emits bytes. Diagnostics from
//! parsing and from both passes are collected, and any diagnostic at all
//! suppresses the output.
//!
//! # Source syntax
//!
//! ```text
//! SCREEN  = $D000         ; constant
//!         *= $8000        ; origin (also ORG / .ORG)
//! START:  LDX #0          ; colon label
//! LOOP    LDA MSG,X       ; bare label
//!         BEQ DONE
//!         STA SCREEN,X
//!         INX
//!         BNE LOOP
//! DONE    RTS
//! MSG     .BYTE "HI", 0   ; also DCB / .DB; .WORD / DCW / .DW for words
//! ```
//!
//! Mnemonics, directives and index registers are case-insensitive; symbols
//! are case-sensitive. Operand expressions are terms joined by `+`/`-`, with
//! optional `<`/`>` for the low/high byte. A term is a symbol, `$hex`, `0xhex`,
//! `%binary` or decimal.
//!
//! # Example
//!
//! ```
//! use sim6502::assembler::assemble;
//!
//! let output = assemble("*= $0600\nLDA #$01\nSTA $00").unwrap();
//! assert_eq!(output.origin, 0x0600);
//! assert_eq!(output.bytes, vec![0xA9, 0x01, 0x85, 0x00]);
//! ```

pub mod encoder;
pub mod parser;
pub mod source_map;
pub mod symbol_table;

use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use self::encoder::{classify, encode, select_mode};
use self::parser::{evaluate, parse_line, string_literal, ExprError, SourceLine, Statement};
use self::source_map::SourceMap;
use self::symbol_table::SymbolTable;
use crate::opcodes::Mnemonic;

/// Complete output from assembling source code
#[derive(Debug, Clone)]
pub struct AssemblerOutput {
    /// Address of the first emitted byte
    pub origin: u16,

    /// Assembled machine code bytes, contiguous from `origin`
    pub bytes: Vec<u8>,

    /// Every label and constant, in definition order
    pub symbols: Vec<Symbol>,

    /// Source line for each emitted instruction or data directive
    pub source_map: SourceMap,
}

impl AssemblerOutput {
    /// Value of a defined symbol.
    pub fn symbol(&self, name: &str) -> Option<u16> {
        self.symbols.iter().find(|s| s.name == name).map(|s| s.value)
    }
}

/// A symbol table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Name as written in the source
    pub name: String,

    /// Address of a label, or the value of a constant
    pub value: u16,

    /// Source line where the symbol was defined
    pub defined_at: usize,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct AssemblerError {
    /// Line number where error occurred (1-indexed)
    pub line: usize,

    /// Error type classification
    pub kind: ErrorKind,

    /// Human-readable error message
    pub message: String,
}

impl AssemblerError {
    /// Diagnostic for 1-based source `line`.
    pub fn new(line: usize, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            message: message.into(),
        }
    }
}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Neither a mnemonic nor a directive
    UnknownMnemonic,

    /// The mnemonic has no opcode for the operand's addressing mode
    InvalidAddressingMode,

    /// Branch displacement outside -128..=127
    BranchOutOfRange,

    /// Reference to a symbol that is never defined
    UndefinedSymbol,

    /// Symbol defined twice
    DuplicateSymbol,

    /// Malformed number or expression
    InvalidNumber,

    /// Value does not fit the operand or data width
    ValueOutOfRange,

    /// Directive used incorrectly
    InvalidDirective,
}

/// Assemble source code into machine code
///
/// Returns every diagnostic when any line fails; no partial output is produced.
pub fn assemble(source: &str) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    let mut errors = Vec::new();

    let lines: Vec<SourceLine<'_>> = source
        .lines()
        .enumerate()
        .filter_map(|(i, text)| {
            parse_line(i + 1, text)
                .map_err(|e| errors.push(e))
                .ok()
        })
        .collect();

    let mut assembler = Assembler::default();
    assembler.first_pass(&lines, &mut errors);
    let output = assembler.second_pass(&lines, &mut errors);

    if !errors.is_empty() {
        errors.sort_by_key(|e| e.line);
        debug!("assembly failed with {} error(s)", errors.len());
        return Err(errors);
    }

    debug!(
        "assembled {} bytes at ${:04X}, {} symbols",
        output.bytes.len(),
        output.origin,
        output.symbols.len()
    );
    Ok(output)
}

/// State shared by the two passes.
#[derive(Default)]
struct Assembler {
    symbols: SymbolTable,

    /// Lines whose operand named a symbol not yet defined in pass 1; their
    /// operands keep the absolute width in pass 2.
    forward_refs: HashSet<usize>,
}

/// Pass-2 output under construction.
struct Emitter {
    origin: Option<u16>,
    bytes: Vec<u8>,
    source_map: SourceMap,
}

impl Assembler {
    fn evaluate(&self, line: usize, expr: &str) -> Result<i32, AssemblerError> {
        evaluate(expr, &|name| self.symbols.value(name)).map_err(|e| match e {
            ExprError::Undefined(name) => AssemblerError::new(
                line,
                ErrorKind::UndefinedSymbol,
                format!("undefined symbol '{}'", name),
            ),
            ExprError::Invalid(message) => AssemblerError::new(line, ErrorKind::InvalidNumber, message),
        })
    }

    fn evaluate_address(&self, line: usize, expr: &str) -> Result<u16, AssemblerError> {
        let value = self.evaluate(line, expr)?;
        u16::try_from(value).map_err(|_| {
            AssemblerError::new(
                line,
                ErrorKind::ValueOutOfRange,
                format!("'{}' = {} is not a 16-bit address", expr, value),
            )
        })
    }

    fn define(&mut self, name: &str, value: u16, line: usize, errors: &mut Vec<AssemblerError>) {
        if let Err(existing) = self.symbols.add_symbol(name, value, line) {
            errors.push(AssemblerError::new(
                line,
                ErrorKind::DuplicateSymbol,
                format!("'{}' already defined on line {}", name, existing.defined_at),
            ));
        }
    }

    /// Bytes occupied by an instruction, resolving what can be resolved now.
    fn instruction_size(&mut self, line: usize, mnemonic: Mnemonic, operand: &str) -> u16 {
        let syntax = classify(mnemonic, operand);
        let value = syntax
            .expression()
            .and_then(|expr| match evaluate(expr, &|name| self.symbols.value(name)) {
                Ok(value) => Some(value),
                Err(ExprError::Undefined(_)) => {
                    self.forward_refs.insert(line);
                    None
                }
                Err(ExprError::Invalid(_)) => None,
            });
        let wide = self.forward_refs.contains(&line);
        1 + select_mode(mnemonic, syntax, value, wide).operand_len() as u16
    }

    /// Pass 1: define symbols and advance the program counter. Nothing is emitted.
    fn first_pass(&mut self, lines: &[SourceLine<'_>], errors: &mut Vec<AssemblerError>) {
        let mut pc: u16 = 0;

        for line in lines {
            let n = line.number;
            if let Some(label) = line.label {
                self.define(label, pc, n, errors);
            }

            match &line.statement {
                Statement::Empty => {}
                Statement::Origin(expr) => match self.evaluate_address(n, expr) {
                    Ok(address) => pc = address,
                    Err(e) => errors.push(e),
                },
                Statement::Assign { name, value } => match self.evaluate_address(n, value) {
                    Ok(value) => self.define(name, value, n, errors),
                    Err(e) => errors.push(e),
                },
                Statement::Bytes(items) => pc = pc.wrapping_add(data_len(items)),
                Statement::Words(items) => pc = pc.wrapping_add(2 * items.len() as u16),
                Statement::Instruction { mnemonic, operand } => {
                    pc = pc.wrapping_add(self.instruction_size(n, *mnemonic, operand));
                }
            }
        }
    }

    /// Pass 2: emit bytes with the complete symbol table.
    fn second_pass(&self, lines: &[SourceLine<'_>], errors: &mut Vec<AssemblerError>) -> AssemblerOutput {
        let mut pc: u16 = 0;
        let mut out = Emitter {
            origin: None,
            bytes: Vec::new(),
            source_map: SourceMap::new(),
        };

        for line in lines {
            let n = line.number;

            match &line.statement {
                Statement::Empty | Statement::Assign { .. } => {}
                // already diagnosed in pass 1
                Statement::Origin(expr) => {
                    if let Ok(address) = self.evaluate_address(n, expr) {
                        pc = address;
                    }
                }
                Statement::Bytes(items) => {
                    let data = self.byte_data(n, items, errors);
                    out.emit(pc, &data, n, errors);
                    pc = pc.wrapping_add(data_len(items));
                }
                Statement::Words(items) => {
                    let data = self.word_data(n, items, errors);
                    out.emit(pc, &data, n, errors);
                    pc = pc.wrapping_add(2 * items.len() as u16);
                }
                Statement::Instruction { mnemonic, operand } => {
                    let syntax = classify(*mnemonic, operand);
                    let wide = self.forward_refs.contains(&n);

                    let value = match syntax.expression().map(|e| self.evaluate(n, e)).transpose() {
                        Ok(value) => value,
                        Err(e) => {
                            errors.push(e);
                            let mode = select_mode(*mnemonic, syntax, None, true);
                            pc = pc.wrapping_add(1 + mode.operand_len() as u16);
                            continue;
                        }
                    };

                    let mode = select_mode(*mnemonic, syntax, value, wide);
                    match encode(n, *mnemonic, mode, value, pc) {
                        Ok(bytes) => out.emit(pc, &bytes, n, errors),
                        Err(e) => errors.push(e),
                    }
                    pc = pc.wrapping_add(1 + mode.operand_len() as u16);
                }
            }
        }

        AssemblerOutput {
            origin: out.origin.unwrap_or(pc),
            bytes: out.bytes,
            symbols: self.symbols.clone().into_symbols(),
            source_map: out.source_map,
        }
    }

    fn byte_data(&self, line: usize, items: &[&str], errors: &mut Vec<AssemblerError>) -> Vec<u8> {
        if items.is_empty() {
            errors.push(AssemblerError::new(line, ErrorKind::InvalidDirective, "byte directive needs at least one value"));
        }

        let mut data = Vec::new();
        for item in items {
            if let Some(text) = string_literal(item) {
                data.extend_from_slice(text);
                continue;
            }
            match self.evaluate(line, item) {
                Ok(value) if (-128..=0xFF).contains(&value) => data.push(value as u8),
                Ok(value) => errors.push(AssemblerError::new(
                    line,
                    ErrorKind::ValueOutOfRange,
                    format!("byte value {} out of range", value),
                )),
                Err(e) => errors.push(e),
            }
        }
        data
    }

    fn word_data(&self, line: usize, items: &[&str], errors: &mut Vec<AssemblerError>) -> Vec<u8> {
        if items.is_empty() {
            errors.push(AssemblerError::new(line, ErrorKind::InvalidDirective, "word directive needs at least one value"));
        }

        let mut data = Vec::with_capacity(items.len() * 2);
        for item in items {
            match self.evaluate(line, item) {
                Ok(value) if (-0x8000..=0xFFFF).contains(&value) => {
                    data.extend_from_slice(&(value as u16).to_le_bytes())
                }
                Ok(value) => errors.push(AssemblerError::new(
                    line,
                    ErrorKind::ValueOutOfRange,
                    format!("word value {} out of range", value),
                )),
                Err(e) => errors.push(e),
            }
        }
        data
    }
}

impl Emitter {
    /// Appends `data` at `pc`, zero-filling any gap left by a forward origin change.
    fn emit(&mut self, pc: u16, data: &[u8], line: usize, errors: &mut Vec<AssemblerError>) {
        if data.is_empty() {
            return;
        }

        let origin = *self.origin.get_or_insert(pc);
        let next = origin as usize + self.bytes.len();
        if (pc as usize) < next {
            errors.push(AssemblerError::new(
                line,
                ErrorKind::InvalidDirective,
                format!("code at ${:04X} overlaps output already emitted up to ${:04X}", pc, next - 1),
            ));
            return;
        }

        self.bytes.resize(pc as usize - origin as usize, 0);
        self.bytes.extend_from_slice(data);
        self.source_map.add_mapping(pc, data.len() as u16, line);
    }
}

/// Bytes occupied by a `.BYTE` list: one per value, one per string character.
fn data_len(items: &[&str]) -> u16 {
    items
        .iter()
        .map(|item| string_literal(item).map_or(1, <[u8]>::len) as u16)
        .sum()
}
