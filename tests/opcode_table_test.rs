//! Sweeps the opcode table against the engine: every documented opcode
//! advances PC by its encoded size and costs at least its base cycles.

use sim6502::{metadata, FlatMemory, MemoryBus, Mnemonic, CPU, OPCODE_TABLE};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

fn changes_pc(mnemonic: Mnemonic) -> bool {
    matches!(
        mnemonic,
        Mnemonic::JMP | Mnemonic::JSR | Mnemonic::RTS | Mnemonic::RTI | Mnemonic::BRK
    )
}

#[test]
fn test_documented_opcodes_advance_pc_by_size() {
    for opcode in 0..=255u8 {
        let Some(meta) = metadata(opcode) else {
            continue;
        };
        if changes_pc(meta.mnemonic) {
            continue;
        }

        // operand bytes are zero: branches land on the next instruction
        // whether taken or not, and X = Y = 0 never crosses a page
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, opcode);

        let cycles = cpu.step();
        assert_eq!(
            cpu.pc(),
            0x8000 + meta.size_bytes as u16,
            "{} {:?} (${:02X})",
            meta.mnemonic,
            meta.addressing_mode,
            opcode
        );
        assert!(cycles >= meta.base_cycles, "${:02X}", opcode);
        assert!(cycles <= meta.base_cycles + 1, "${:02X}", opcode);
        assert_eq!(cpu.cycles(), cycles as u64);
    }
}

#[test]
fn test_table_cycle_ranges() {
    for meta in OPCODE_TABLE.iter().flatten() {
        assert!((2..=7).contains(&meta.base_cycles), "{:?}", meta);
        assert!((1..=3).contains(&meta.size_bytes), "{:?}", meta);
    }
}

#[test]
fn test_every_mnemonic_has_an_opcode() {
    for &mnemonic in Mnemonic::ALL {
        assert!(
            OPCODE_TABLE.iter().flatten().any(|m| m.mnemonic == mnemonic),
            "{}",
            mnemonic
        );
    }
}
