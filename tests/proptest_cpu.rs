//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to check that instruction execution keeps its
//! fundamental invariants across the whole input space.

use proptest::prelude::*;
use sim6502::{metadata, FlatMemory, MemoryBus, Mnemonic, Status, CPU, OPCODE_TABLE};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

fn defined_opcodes() -> Vec<u8> {
    (0..=255u8).filter(|&op| metadata(op).is_some()).collect()
}

fn undefined_opcodes() -> Vec<u8> {
    (0..=255u8).filter(|&op| metadata(op).is_none()).collect()
}

/// Opcodes whose only effect on PC is stepping past themselves.
fn non_branching_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter_map(|(op, meta)| meta.map(|m| (op as u8, m)))
        .filter(|(_, m)| {
            !m.mnemonic.is_branch()
                && !matches!(
                    m.mnemonic,
                    Mnemonic::JMP | Mnemonic::JSR | Mnemonic::RTS | Mnemonic::RTI | Mnemonic::BRK
                )
        })
        .map(|(op, _)| op)
        .collect()
}

fn load_instruction(cpu: &mut CPU<FlatMemory>, opcode: u8, operand1: u8, operand2: u8) {
    cpu.memory_mut().load(0x8000, &[opcode, operand1, operand2]);
}

// ========== PC and cycle properties ==========

proptest! {
    /// Property: for non-branching instructions, PC advances by exactly size_bytes
    #[test]
    fn prop_pc_advances_by_instruction_size(
        opcode in prop::sample::select(non_branching_opcodes()),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.set_x(x);
        cpu.set_y(y);
        load_instruction(&mut cpu, opcode, operand1, operand2);
        let meta = OPCODE_TABLE[opcode as usize].unwrap();

        cpu.step();

        prop_assert_eq!(
            cpu.pc(),
            0x8000 + meta.size_bytes as u16,
            "PC should advance by {} bytes for opcode 0x{:02X} ({})",
            meta.size_bytes,
            opcode,
            meta.mnemonic
        );
    }

    /// Property: an instruction costs its base cycles plus at most two penalties,
    /// and the running counter grows by exactly what step reports
    #[test]
    fn prop_cycles_within_bounds(
        opcode in prop::sample::select(defined_opcodes()),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
        p in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.set_x(x);
        cpu.set_y(y);
        cpu.set_status(p);
        load_instruction(&mut cpu, opcode, operand1, operand2);
        let meta = OPCODE_TABLE[opcode as usize].unwrap();

        let cycles = cpu.step();

        prop_assert!(cycles >= meta.base_cycles);
        prop_assert!(cycles <= meta.base_cycles + 2);
        prop_assert_eq!(cpu.cycles(), cycles as u64);
    }

    /// Property: the unused status bit reads as set after any instruction
    #[test]
    fn prop_unused_flag_always_set(
        opcode in any::<u8>(),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
        stacked in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        // whatever PLP/RTI would pop
        cpu.memory_mut().write(0x01FE, stacked);
        load_instruction(&mut cpu, opcode, operand1, operand2);

        cpu.step();

        prop_assert!(cpu.status() & 0x20 != 0);
    }

    /// Property: undefined opcodes cost two cycles and skip one byte
    #[test]
    fn prop_undefined_opcode_is_two_cycle_skip(opcode in prop::sample::select(undefined_opcodes())) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, opcode);
        let before = cpu.registers();

        prop_assert_eq!(cpu.step(), 2);
        prop_assert_eq!(cpu.pc(), 0x8001);
        prop_assert_eq!(cpu.a(), before.a);
        prop_assert_eq!(cpu.sp(), before.sp);
    }
}

// ========== Arithmetic properties ==========

proptest! {
    /// Property: ADC is binary addition with carry in and out
    #[test]
    fn prop_adc_matches_wide_addition(a in any::<u8>(), value in any::<u8>(), carry in any::<bool>(), decimal in any::<bool>()) {
        let mut cpu = setup_cpu();
        cpu.set_a(a);
        cpu.set_flag(Status::CARRY, carry);
        cpu.set_flag(Status::DECIMAL, decimal);
        load_instruction(&mut cpu, 0x69, value, 0);

        cpu.step();

        let sum = a as u16 + value as u16 + carry as u16;
        let result = sum as u8;
        let overflow = (a ^ result) & (value ^ result) & 0x80 != 0;
        prop_assert_eq!(cpu.a(), result);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_z(), result == 0);
        prop_assert_eq!(cpu.flag_n(), result & 0x80 != 0);
        prop_assert_eq!(cpu.flag_v(), overflow);
    }

    /// Property: SBC #v behaves exactly like ADC #!v
    #[test]
    fn prop_sbc_is_adc_of_complement(a in any::<u8>(), value in any::<u8>(), carry in any::<bool>()) {
        let mut sbc = setup_cpu();
        sbc.set_a(a);
        sbc.set_flag(Status::CARRY, carry);
        load_instruction(&mut sbc, 0xE9, value, 0);
        sbc.step();

        let mut adc = setup_cpu();
        adc.set_a(a);
        adc.set_flag(Status::CARRY, carry);
        load_instruction(&mut adc, 0x69, !value, 0);
        adc.step();

        prop_assert_eq!(sbc.a(), adc.a());
        prop_assert_eq!(sbc.status(), adc.status());
    }

    /// Property: CMP sets C for A >= M and Z for A == M, without changing A
    #[test]
    fn prop_cmp_flags(a in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.set_a(a);
        load_instruction(&mut cpu, 0xC9, value, 0);

        cpu.step();

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.flag_c(), a >= value);
        prop_assert_eq!(cpu.flag_z(), a == value);
        prop_assert_eq!(cpu.flag_n(), a.wrapping_sub(value) & 0x80 != 0);
    }

    /// Property: N and Z follow the loaded value
    #[test]
    fn prop_lda_immediate_sets_nz(value in any::<u8>()) {
        let mut cpu = setup_cpu();
        load_instruction(&mut cpu, 0xA9, value, 0);

        cpu.step();

        prop_assert_eq!(cpu.flag_n(), value & 0x80 != 0);
        prop_assert_eq!(cpu.flag_z(), value == 0);
    }
}

// ========== Stack properties ==========

proptest! {
    /// Property: PHA followed by PLA restores A and SP from any starting SP
    #[test]
    fn prop_pha_pla_round_trip(value in any::<u8>(), sp in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.set_a(value);
        cpu.set_sp(sp);
        // PHA; LDA #$00; PLA
        cpu.memory_mut().load(0x8000, &[0x48, 0xA9, 0x00, 0x68]);

        cpu.step();
        prop_assert_eq!(cpu.memory().read(0x0100 | sp as u16), value);
        cpu.step();
        cpu.step();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.sp(), sp);
    }

    /// Property: JSR then RTS returns to the byte after the JSR
    #[test]
    fn prop_jsr_rts_round_trip(target in 0x0200u16..0x7F00, sp in 0x10u8..=0xFF) {
        let mut cpu = setup_cpu();
        cpu.set_sp(sp);
        cpu.memory_mut().load(0x8000, &[0x20, target as u8, (target >> 8) as u8]);
        cpu.memory_mut().write(target, 0x60);

        cpu.step();
        prop_assert_eq!(cpu.pc(), target);
        cpu.step();

        prop_assert_eq!(cpu.pc(), 0x8003);
        prop_assert_eq!(cpu.sp(), sp);
    }
}
