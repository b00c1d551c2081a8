//! Tests for the disassembler: text format, undefined opcodes, truncation
//! and bus-driven disassembly.

use sim6502::disassembler::formatter::listing_line;
use sim6502::{disassemble, disassemble_bytes, AddressingMode, FlatMemory, MemoryBus, Mnemonic};

fn texts(bytes: &[u8], origin: u16) -> Vec<String> {
    disassemble_bytes(bytes, origin)
        .into_iter()
        .map(|instr| instr.text)
        .collect()
}

// ========== Operand formats ==========

#[test]
fn test_every_operand_format() {
    let cases: [(&[u8], &str); 13] = [
        (&[0xEA], "NOP"),
        (&[0x0A], "ASL A"),
        (&[0xA9, 0x0F], "LDA #$0F"),
        (&[0xA5, 0x10], "LDA $10"),
        (&[0xB5, 0x10], "LDA $10,X"),
        (&[0xB6, 0x10], "LDX $10,Y"),
        (&[0xAD, 0x34, 0x12], "LDA $1234"),
        (&[0xBD, 0x34, 0x12], "LDA $1234,X"),
        (&[0xB9, 0x34, 0x12], "LDA $1234,Y"),
        (&[0x6C, 0xFC, 0xFF], "JMP ($FFFC)"),
        (&[0xA1, 0x20], "LDA ($20,X)"),
        (&[0xB1, 0x20], "LDA ($20),Y"),
        (&[0xD0, 0x02], "BNE $0604"),
    ];

    for (bytes, expected) in cases {
        assert_eq!(texts(bytes, 0x0600), [expected]);
    }
}

#[test]
fn test_absolute_keeps_four_digits() {
    assert_eq!(texts(&[0x8D, 0x10, 0x00], 0), ["STA $0010"]);
}

#[test]
fn test_branch_targets() {
    // backward to self
    assert_eq!(texts(&[0xF0, 0xFE], 0x1000), ["BEQ $1000"]);
    // maximum reach in both directions
    assert_eq!(texts(&[0x10, 0x7F], 0x1000), ["BPL $1081"]);
    assert_eq!(texts(&[0x30, 0x80], 0x1080), ["BMI $1002"]);
}

#[test]
fn test_branch_target_wraps_address_space() {
    assert_eq!(texts(&[0xD0, 0x10], 0xFFF0), ["BNE $0002"]);
}

// ========== Undefined and truncated ==========

#[test]
fn test_undefined_opcodes_become_byte_directives() {
    let listing = disassemble_bytes(&[0x02, 0xEA, 0xFF], 0x0200);

    assert_eq!(listing.len(), 3);
    assert_eq!(listing[0].text, ".BYTE $02");
    assert_eq!(listing[0].mnemonic, None);
    assert_eq!(listing[0].length, 1);
    assert_eq!(listing[1].text, "NOP");
    assert_eq!(listing[1].address, 0x0201);
    assert_eq!(listing[2].text, ".BYTE $FF");
}

#[test]
fn test_truncated_instruction_at_end_of_slice() {
    // LDA abs with only one operand byte present
    let listing = texts(&[0xEA, 0xAD, 0x34], 0x0000);
    assert_eq!(listing, ["NOP", ".BYTE $AD", ".BYTE $34"]);
}

#[test]
fn test_empty_slice() {
    assert!(disassemble_bytes(&[], 0x1000).is_empty());
}

// ========== Records ==========

#[test]
fn test_instruction_record_fields() {
    let listing = disassemble_bytes(&[0xA9, 0x01, 0x8D, 0x00, 0x02, 0x60], 0x0600);

    let sta = &listing[1];
    assert_eq!(sta.address, 0x0602);
    assert_eq!(sta.opcode, 0x8D);
    assert_eq!(sta.mnemonic, Some(Mnemonic::STA));
    assert_eq!(sta.addressing_mode, AddressingMode::Absolute);
    assert_eq!(sta.bytes, vec![0x8D, 0x00, 0x02]);
    assert_eq!(sta.operand(), &[0x00, 0x02]);
    assert_eq!(sta.length, 3);

    let addresses: Vec<u16> = listing.iter().map(|i| i.address).collect();
    assert_eq!(addresses, [0x0600, 0x0602, 0x0605]);
}

#[test]
fn test_listing_line_layout() {
    let listing = disassemble_bytes(&[0xA9, 0x01, 0x8D, 0x00, 0x02, 0xEA], 0x0600);

    assert_eq!(listing_line(&listing[0]), "0600: A9 01     LDA #$01");
    assert_eq!(listing_line(&listing[1]), "0602: 8D 00 02  STA $0200");
    assert_eq!(listing_line(&listing[2]), "0605: EA        NOP");
}

// ========== Bus disassembly ==========

#[test]
fn test_disassemble_from_bus() {
    let mut memory = FlatMemory::new();
    memory.load(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x60]);

    let listing: Vec<String> = disassemble(&memory, 0x8000, 4).map(|i| i.text).collect();
    assert_eq!(listing, ["LDX #$03", "DEX", "BNE $8002", "RTS"]);
}

#[test]
fn test_disassemble_count_and_size_hint() {
    let memory = FlatMemory::new();
    let iter = disassemble(&memory, 0x0000, 5);

    assert_eq!(iter.len(), 5);
    // zeroed memory is a run of BRK
    assert!(iter.map(|i| i.text).all(|t| t == "BRK"));
}

#[test]
fn test_disassemble_wraps_at_top_of_memory() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFF, 0xAD);
    memory.write(0x0000, 0x34);
    memory.write(0x0001, 0x12);
    memory.write(0x0002, 0xEA);

    let listing: Vec<_> = disassemble(&memory, 0xFFFF, 2).collect();
    assert_eq!(listing[0].text, "LDA $1234");
    assert_eq!(listing[1].address, 0x0002);
    assert_eq!(listing[1].text, "NOP");
}

#[test]
fn test_disassemble_never_writes() {
    let mut memory = FlatMemory::new();
    memory.load(0x0300, &[0x8D, 0x00, 0x03]);
    let before = memory.clone();

    let _ = disassemble(&memory, 0x0300, 10).count();
    assert_eq!(memory.as_slice(), before.as_slice());
}
