//! Tests for undefined opcode handling.

use sim6502::{metadata, FlatMemory, MemoryBus, CPU, UNKNOWN_OPCODE_CYCLES};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_unknown_opcode_is_skipped() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0x02, 0xA9, 0x01]);
    let before = cpu.registers();

    assert_eq!(cpu.step(), UNKNOWN_OPCODE_CYCLES);
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.a(), before.a);
    assert_eq!(cpu.sp(), before.sp);
    assert_eq!(cpu.status(), before.p.bits());

    // execution continues with the next byte
    cpu.step();
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_every_undefined_opcode_costs_two_cycles() {
    for opcode in 0..=255u8 {
        if metadata(opcode).is_some() {
            continue;
        }
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, opcode);

        assert_eq!(cpu.step(), 2, "opcode {:02X}", opcode);
        assert_eq!(cpu.pc(), 0x8001, "opcode {:02X}", opcode);
        assert_eq!(cpu.cycles(), 2);
    }
}

#[test]
fn test_unknown_opcode_in_run_for_cycles() {
    let mut cpu = setup_cpu();
    // four undefined bytes
    cpu.memory_mut().load(0x8000, &[0xFF, 0xFF, 0xFF, 0xFF]);

    assert_eq!(cpu.run_for_cycles(8), 8);
    assert_eq!(cpu.pc(), 0x8004);
}
