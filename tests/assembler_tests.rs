//! Tests for the assembler: instruction encoding, mode inference, symbols
//! and diagnostics.

use sim6502::{assemble, ErrorKind};

fn bytes(source: &str) -> Vec<u8> {
    match assemble(source) {
        Ok(output) => output.bytes,
        Err(errors) => panic!("assembly failed: {:?}", errors),
    }
}

fn error_kinds(source: &str) -> Vec<(usize, ErrorKind)> {
    match assemble(source) {
        Ok(output) => panic!("expected errors, got {:02X?}", output.bytes),
        Err(errors) => errors.iter().map(|e| (e.line, e.kind)).collect(),
    }
}

// ========== Basic encoding ==========

#[test]
fn test_simple_program() {
    let output = assemble("LDA #$01\nSTA $00").unwrap();
    assert_eq!(output.origin, 0x0000);
    assert_eq!(output.bytes, vec![0xA9, 0x01, 0x85, 0x00]);
}

#[test]
fn test_origin_sets_addresses() {
    let output = assemble("*= $0600\nSTART LDA #$01\n  JMP START").unwrap();
    assert_eq!(output.origin, 0x0600);
    assert_eq!(output.bytes, vec![0xA9, 0x01, 0x4C, 0x00, 0x06]);
    assert_eq!(output.symbol("START"), Some(0x0600));
}

#[test]
fn test_implied_instructions() {
    assert_eq!(bytes("NOP\nINX\nRTS\nBRK"), vec![0xEA, 0xE8, 0x60, 0x00]);
}

#[test]
fn test_comments_and_blank_lines() {
    let source = "
        ; header comment
        LDA #$01   ; load

        RTS
    ";
    assert_eq!(bytes(source), vec![0xA9, 0x01, 0x60]);
}

// ========== Addressing mode inference ==========

#[test]
fn test_zero_page_versus_absolute() {
    assert_eq!(bytes("LDA $10"), vec![0xA5, 0x10]);
    assert_eq!(bytes("LDA $1234"), vec![0xAD, 0x34, 0x12]);
    assert_eq!(bytes("LDA $10,X"), vec![0xB5, 0x10]);
    assert_eq!(bytes("LDA $1234,X"), vec![0xBD, 0x34, 0x12]);
    assert_eq!(bytes("LDA $1234,Y"), vec![0xB9, 0x34, 0x12]);
}

#[test]
fn test_missing_zero_page_form_falls_back_to_absolute() {
    // LDA has no zp,Y form
    assert_eq!(bytes("LDA $10,Y"), vec![0xB9, 0x10, 0x00]);
    // JMP and JSR only take absolute operands
    assert_eq!(bytes("JMP $10"), vec![0x4C, 0x10, 0x00]);
    assert_eq!(bytes("JSR $0010"), vec![0x20, 0x10, 0x00]);
}

#[test]
fn test_zero_page_y_forms() {
    assert_eq!(bytes("LDX $10,Y"), vec![0xB6, 0x10]);
    assert_eq!(bytes("STX $10,Y"), vec![0x96, 0x10]);
    assert_eq!(bytes("LDX $1234,Y"), vec![0xBE, 0x34, 0x12]);
}

#[test]
fn test_indirect_forms() {
    assert_eq!(bytes("LDA ($20,X)"), vec![0xA1, 0x20]);
    assert_eq!(bytes("LDA ($20),Y"), vec![0xB1, 0x20]);
    assert_eq!(bytes("JMP ($1234)"), vec![0x6C, 0x34, 0x12]);
    assert_eq!(bytes("sta ($44), y"), vec![0x91, 0x44]);
}

#[test]
fn test_accumulator_forms() {
    assert_eq!(bytes("ASL"), vec![0x0A]);
    assert_eq!(bytes("ASL A"), vec![0x0A]);
    assert_eq!(bytes("ror a"), vec![0x6A]);
    assert_eq!(bytes("LSR $20"), vec![0x46, 0x20]);
}

#[test]
fn test_a_as_symbol_without_accumulator_form() {
    assert_eq!(bytes("A = $10\nLDA A"), vec![0xA5, 0x10]);
    assert_eq!(bytes("A = $1234\nJMP A"), vec![0x4C, 0x34, 0x12]);
    // shifts keep reading it as the register
    assert_eq!(bytes("A = $10\nROL A"), vec![0x2A]);
}

#[test]
fn test_stacked_byte_selectors_do_not_overflow() {
    let source = format!("LDA #{}1", "<".repeat(8_000));
    assert_eq!(bytes(&source), vec![0xA9, 0x01]);
}

#[test]
fn test_immediate_values() {
    assert_eq!(bytes("LDA #$FF"), vec![0xA9, 0xFF]);
    assert_eq!(bytes("LDA #-1"), vec![0xA9, 0xFF]);
    assert_eq!(bytes("LDA #%1010"), vec![0xA9, 0x0A]);
    assert_eq!(bytes("LDA #10"), vec![0xA9, 0x0A]);
    assert_eq!(bytes("LDA #0x0A"), vec![0xA9, 0x0A]);
}

// ========== Symbols ==========

#[test]
fn test_forward_jump() {
    let source = "*= $8000\n  JMP END\n  NOP\nEND RTS";
    assert_eq!(bytes(source), vec![0x4C, 0x04, 0x80, 0xEA, 0x60]);
}

#[test]
fn test_colon_labels() {
    let output = assemble("START: LDX #0\nLOOP:\n  JMP START").unwrap();
    assert_eq!(output.bytes, vec![0xA2, 0x00, 0x4C, 0x00, 0x00]);
    assert_eq!(output.symbol("LOOP"), Some(0x0002));
}

#[test]
fn test_constants() {
    let source = "
SCREEN = $D000
COUNT=5
        LDX #COUNT
        STA SCREEN,X
";
    let output = assemble(source).unwrap();
    assert_eq!(output.bytes, vec![0xA2, 0x05, 0x9D, 0x00, 0xD0]);
    assert_eq!(output.symbol("SCREEN"), Some(0xD000));
    assert_eq!(output.symbol("COUNT"), Some(5));
}

#[test]
fn test_constant_in_zero_page() {
    assert_eq!(bytes("PTR = $FB\n  LDA (PTR),Y\n  STA PTR"), vec![0xB1, 0xFB, 0x85, 0xFB]);
}

#[test]
fn test_forward_reference_to_zero_page_constant_stays_absolute() {
    // the operand was sized before PTR was known
    assert_eq!(bytes("  STA PTR\nPTR = $20"), vec![0x8D, 0x20, 0x00]);
}

#[test]
fn test_low_high_byte_operators() {
    let source = "ADDR = $1234\n  LDA #<ADDR\n  LDX #>ADDR";
    assert_eq!(bytes(source), vec![0xA9, 0x34, 0xA2, 0x12]);
}

#[test]
fn test_expression_arithmetic() {
    let source = "TABLE = $2000\n  LDA TABLE+1\n  LDA TABLE-1\n  LDA TABLE+$10-2";
    assert_eq!(
        bytes(source),
        vec![0xAD, 0x01, 0x20, 0xAD, 0xFF, 0x1F, 0xAD, 0x0E, 0x20]
    );
}

#[test]
fn test_symbols_are_case_sensitive() {
    let output = assemble("Loop NOP\nLOOP NOP").unwrap();
    assert_eq!(output.symbol("Loop"), Some(0));
    assert_eq!(output.symbol("LOOP"), Some(1));

    assert_eq!(error_kinds("Loop NOP\n  JMP loop"), vec![(2, ErrorKind::UndefinedSymbol)]);
}

#[test]
fn test_mnemonics_are_case_insensitive() {
    assert_eq!(bytes("lda #1\nLdA #1\nLDA #1"), vec![0xA9, 1, 0xA9, 1, 0xA9, 1]);
}

#[test]
fn test_symbols_in_definition_order() {
    let output = assemble("B = 2\nA1 = 1\nSTART NOP").unwrap();
    let names: Vec<&str> = output.symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["B", "A1", "START"]);
    assert_eq!(output.symbols[2].defined_at, 3);
}

// ========== Branches ==========

#[test]
fn test_branch_forward_and_backward() {
    let source = "
        *= $1000
LOOP    DEX
        BNE LOOP
        BEQ DONE
        NOP
DONE    RTS
";
    assert_eq!(
        bytes(source),
        vec![0xCA, 0xD0, 0xFD, 0xF0, 0x01, 0xEA, 0x60]
    );
}

#[test]
fn test_branch_range_limits() {
    assert_eq!(bytes("*= $1000\nBEQ $1081"), vec![0xF0, 0x7F]);
    assert_eq!(bytes("*= $1000\nBEQ $1064"), vec![0xF0, 0x62]);
    assert_eq!(bytes("*= $1080\nBEQ $1002"), vec![0xF0, 0x80]);

    assert_eq!(
        error_kinds("*= $1000\nBEQ $1082"),
        vec![(2, ErrorKind::BranchOutOfRange)]
    );
    assert_eq!(
        error_kinds("*= $1080\nBEQ $1001"),
        vec![(2, ErrorKind::BranchOutOfRange)]
    );
}

#[test]
fn test_branch_rejects_other_syntax() {
    assert_eq!(error_kinds("BNE #$10"), vec![(1, ErrorKind::InvalidAddressingMode)]);
}

// ========== Diagnostics ==========

#[test]
fn test_unknown_mnemonic() {
    assert_eq!(error_kinds("  FOO #1"), vec![(1, ErrorKind::UnknownMnemonic)]);
}

#[test]
fn test_lone_identifier_is_not_a_label() {
    assert_eq!(error_kinds("START"), vec![(1, ErrorKind::UnknownMnemonic)]);
}

#[test]
fn test_invalid_addressing_modes() {
    assert_eq!(error_kinds("STA #$10"), vec![(1, ErrorKind::InvalidAddressingMode)]);
    assert_eq!(error_kinds("LDA"), vec![(1, ErrorKind::InvalidAddressingMode)]);
    assert_eq!(error_kinds("INX $10"), vec![(1, ErrorKind::InvalidAddressingMode)]);
    assert_eq!(error_kinds("JMP ($10),Y"), vec![(1, ErrorKind::InvalidAddressingMode)]);
}

#[test]
fn test_undefined_symbol() {
    let errors = assemble("  LDA MISSING").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::UndefinedSymbol);
    assert!(errors[0].message.contains("MISSING"));
}

#[test]
fn test_duplicate_symbol() {
    assert_eq!(
        error_kinds("L1 NOP\nL1 NOP"),
        vec![(2, ErrorKind::DuplicateSymbol)]
    );
    assert_eq!(
        error_kinds("X1 = 1\nX1 = 2"),
        vec![(2, ErrorKind::DuplicateSymbol)]
    );
}

#[test]
fn test_value_out_of_range() {
    assert_eq!(error_kinds("LDA #$100"), vec![(1, ErrorKind::ValueOutOfRange)]);
    assert_eq!(error_kinds("LDA #-129"), vec![(1, ErrorKind::ValueOutOfRange)]);
    assert_eq!(error_kinds("LDA ($100),Y"), vec![(1, ErrorKind::ValueOutOfRange)]);
    assert_eq!(error_kinds("LDA $FFFF+1"), vec![(1, ErrorKind::ValueOutOfRange)]);
}

#[test]
fn test_invalid_number() {
    assert_eq!(error_kinds("LDA #$ZZ"), vec![(1, ErrorKind::InvalidNumber)]);
    assert_eq!(error_kinds("LDA #%102"), vec![(1, ErrorKind::InvalidNumber)]);
}

#[test]
fn test_all_errors_reported_in_line_order() {
    let source = "FOO\nLDA #$100\nBAR #1\n  NOP";
    assert_eq!(
        error_kinds(source),
        vec![
            (1, ErrorKind::UnknownMnemonic),
            (2, ErrorKind::ValueOutOfRange),
            (3, ErrorKind::UnknownMnemonic),
        ]
    );
}

#[test]
fn test_error_message_carries_line_number() {
    let errors = assemble("NOP\nNOP\n  XYZ").unwrap_err();
    assert_eq!(errors[0].to_string(), "line 3: unknown mnemonic 'XYZ'");
}
