//! # Debugger Core
//!
//! Breakpoints and run control layered on top of [`CPU::step`]. The debugger
//! holds no reference to the CPU; every operation borrows it for the duration
//! of the call, so a host can interleave debugger calls with its own stepping.
//!
//! Breakpoints take effect only between instructions: [`Debugger::run`] stops
//! after the step that lands PC on a breakpoint address.
//!
//! ```
//! use sim6502::{CPU, Debugger, FlatMemory, MemoryBus, RunOutcome};
//!
//! let mut mem = FlatMemory::new();
//! mem.write(0xFFFD, 0x80);
//! mem.load(0x8000, &[0xEA, 0xEA, 0xEA]); // NOP; NOP; NOP
//!
//! let mut cpu = CPU::new(mem);
//! let mut debugger = Debugger::new();
//! debugger.add_breakpoint(0x8002);
//!
//! assert_eq!(
//!     debugger.run(&mut cpu, 1_000),
//!     RunOutcome::Breakpoint { address: 0x8002, cycles: 4 }
//! );
//! ```

use std::collections::BTreeSet;

use log::debug;

use crate::cpu::STACK_BASE;
use crate::disassembler::{self, Instruction};
use crate::{MemoryBus, CPU};

/// Why [`Debugger::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// At least `cycles` were spent without reaching a breakpoint.
    BudgetExhausted { cycles: u64 },

    /// PC reached `address` after `cycles`.
    Breakpoint { address: u16, cycles: u64 },
}

/// Breakpoint set and stepping helpers.
#[derive(Debug, Clone, Default)]
pub struct Debugger {
    breakpoints: BTreeSet<u16>,
}

impl Debugger {
    /// A debugger with no breakpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops [`run`](Self::run) before the instruction at `address`.
    pub fn add_breakpoint(&mut self, address: u16) {
        self.breakpoints.insert(address);
    }

    /// No-op if `address` has no breakpoint.
    pub fn remove_breakpoint(&mut self, address: u16) {
        self.breakpoints.remove(&address);
    }

    /// Adds the breakpoint if absent, removes it if present. Returns whether
    /// it is now set.
    pub fn toggle_breakpoint(&mut self, address: u16) -> bool {
        if self.breakpoints.remove(&address) {
            false
        } else {
            self.breakpoints.insert(address);
            true
        }
    }

    /// Removes every breakpoint.
    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Whether `address` has a breakpoint.
    pub fn has_breakpoint(&self, address: u16) -> bool {
        self.breakpoints.contains(&address)
    }

    /// Breakpoint addresses in ascending order.
    pub fn breakpoints(&self) -> impl Iterator<Item = u16> + '_ {
        self.breakpoints.iter().copied()
    }

    /// Executes one instruction regardless of breakpoints.
    pub fn step<M: MemoryBus>(&self, cpu: &mut CPU<M>) -> u8 {
        cpu.step()
    }

    /// Steps until `budget` cycles have elapsed or PC lands on a breakpoint.
    ///
    /// A breakpoint at the current PC does not stop the first step, so
    /// calling `run` again resumes past it.
    pub fn run<M: MemoryBus>(&self, cpu: &mut CPU<M>, budget: u64) -> RunOutcome {
        let mut cycles = 0;
        while cycles < budget {
            cycles += cpu.step() as u64;
            let pc = cpu.pc();
            if self.has_breakpoint(pc) {
                debug!("breakpoint at ${:04X} after {} cycles", pc, cycles);
                return RunOutcome::Breakpoint { address: pc, cycles };
            }
        }
        RunOutcome::BudgetExhausted { cycles }
    }

    /// Bytes currently on the stack, from the bottom ($01FF) up to the top (SP+1).
    pub fn stack<M: MemoryBus>(&self, cpu: &CPU<M>) -> Vec<u8> {
        let sp = cpu.sp();
        (sp as u16 + 1..=0xFF)
            .rev()
            .map(|offset| cpu.memory().read(STACK_BASE | offset))
            .collect()
    }

    /// `length` bytes starting at `address`, wrapping at the top of memory.
    pub fn memory_dump<M: MemoryBus>(&self, cpu: &CPU<M>, address: u16, length: usize) -> Vec<u8> {
        (0..length)
            .map(|i| cpu.memory().read(address.wrapping_add(i as u16)))
            .collect()
    }

    /// Disassembles `count` instructions at `address` without touching CPU state.
    pub fn disassemble_at<M: MemoryBus>(&self, cpu: &CPU<M>, address: u16, count: usize) -> Vec<Instruction> {
        disassembler::disassemble(cpu.memory(), address, count).collect()
    }
}
