//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file and memory around 0x8000, then runs a
//! few instructions. Execution must never panic and the cycle counter must
//! track what each step reports.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::{FlatMemory, MemoryBus, CPU};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    /// Raw status byte; the unused bit is forced on when loaded
    status: u8,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Placed at 0x4000 for absolute operands
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
    irq: bool,
    nmi: bool,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x80);
    memory.write(0xFFFA, 0x00);
    memory.write(0xFFFB, 0x80);

    memory.load(0x8000, &input.memory.program);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    if input.irq {
        cpu.irq();
    }
    if input.nmi {
        cpu.nmi();
    }

    for _ in 0..input.steps % 32 {
        let before = cpu.cycles();
        let cycles = cpu.step();
        assert!((2..=7).contains(&cycles));
        assert_eq!(cpu.cycles(), before + cycles as u64);
        assert!(cpu.status() & 0x20 != 0);
    }
});
