//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, SP, PC and the status register P (see [`Registers`])
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Memory bus**: every read and write goes through the [`MemoryBus`]
//!
//! ## Execution Model
//!
//! - `step()`: Execute one instruction to completion and return its cycle cost
//! - `run_for_cycles()`: Execute until a cycle budget is exhausted
//! - `irq()` / `nmi()`: Host-raised interrupts, serviced between steps
//!
//! Undefined opcodes never stop the CPU. They are logged, charged
//! [`UNKNOWN_OPCODE_CYCLES`], and execution resumes at the following byte.

use log::{debug, trace, warn};

use crate::addressing::AddressingMode;
use crate::instructions;
use crate::opcodes;
use crate::registers::{Registers, Status};
use crate::MemoryBus;

/// Address of the NMI vector.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Address of the reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer value after reset.
pub const RESET_SP: u8 = 0xFD;

/// Cycles charged for an undefined opcode.
pub const UNKNOWN_OPCODE_CYCLES: u8 = 2;

/// Cycles taken to enter an IRQ or NMI handler.
pub const INTERRUPT_CYCLES: u8 = 7;

/// Effective operand produced by addressing-mode resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// Implied: no operand at all.
    None,
    /// The accumulator itself.
    Accumulator,
    /// An effective address (for immediate mode, the address of the operand byte).
    Address(u16),
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use sim6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
///
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    pub(crate) regs: Registers,

    /// Total CPU cycles executed since the last reset
    pub(crate) cycles: u64,

    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU attached to `memory` and resets it.
    ///
    /// The program counter is loaded from the reset vector at 0xFFFC/0xFFFD, so
    /// the host should place the vector before constructing the CPU (or call
    /// [`CPU::reset`] again afterwards).
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            cycles: 0,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Puts the CPU into its power-on state.
    ///
    /// - A, X, Y zeroed
    /// - SP = 0xFD
    /// - P = unused | interrupt disable
    /// - PC loaded from the reset vector (little-endian)
    /// - cycle counter cleared
    pub fn reset(&mut self) {
        self.regs = Registers {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: self.memory.read_word(RESET_VECTOR),
            p: Status::default(),
        };
        self.cycles = 0;
        debug!("reset, PC=${:04X}", self.regs.pc);
    }

    /// Executes one instruction and returns the number of cycles it consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFD, 0x80);
    /// mem.load(0x8000, &[0xA9, 0x42]); // LDA #$42
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.step(), 2);
    /// assert_eq!(cpu.a(), 0x42);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// ```
    pub fn step(&mut self) -> u8 {
        let address = self.regs.pc;
        let opcode = self.fetch_byte();

        let cycles = match opcodes::metadata(opcode) {
            Some(meta) => {
                let cycles = instructions::execute(self, meta);
                trace!("${:04X}: {} ({} cycles)", address, meta.mnemonic, cycles);
                cycles
            }
            None => {
                warn!("unknown opcode ${:02X} at ${:04X}", opcode, address);
                UNKNOWN_OPCODE_CYCLES
            }
        };

        self.cycles += cycles as u64;
        cycles
    }

    /// Runs the CPU for at least `cycle_budget` cycles.
    ///
    /// Returns the cycles actually consumed, which may overshoot the budget by
    /// part of an instruction since instructions are never split.
    ///
    /// ```
    /// use sim6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     mem.write(addr, 0xEA); // NOP, 2 cycles
    /// }
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(9), 10);
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> u64 {
        let mut consumed = 0;
        while consumed < cycle_budget {
            consumed += self.step() as u64;
        }
        consumed
    }

    /// Raises a maskable interrupt.
    ///
    /// Ignored while the interrupt disable flag is set; returns the cycles spent
    /// entering the handler (0 when masked).
    pub fn irq(&mut self) -> u8 {
        if self.regs.flag(Status::INTERRUPT_DISABLE) {
            return 0;
        }
        debug!("IRQ at PC=${:04X}", self.regs.pc);
        self.interrupt(IRQ_VECTOR)
    }

    /// Raises a non-maskable interrupt; returns the cycles spent entering the handler.
    pub fn nmi(&mut self) -> u8 {
        debug!("NMI at PC=${:04X}", self.regs.pc);
        self.interrupt(NMI_VECTOR)
    }

    fn interrupt(&mut self, vector: u16) -> u8 {
        self.push_word(self.regs.pc);
        let pushed = (self.regs.p - Status::BREAK) | Status::UNUSED;
        self.push(pushed.bits());
        self.regs.p.insert(Status::INTERRUPT_DISABLE);
        self.regs.pc = self.memory.read_word(vector);
        self.cycles += INTERRUPT_CYCLES as u64;
        INTERRUPT_CYCLES
    }

    // ========== Bus and stack primitives ==========

    pub(crate) fn read(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Reads a pointer from the zero page.
    ///
    /// The high byte wraps within page zero, as on the NMOS part: a pointer at
    /// `$FF` takes its high byte from `$00`, never from `$0100`.
    fn read_zero_page_word(&self, addr: u8) -> u16 {
        let lo = self.read(addr as u16) as u16;
        let hi = self.read(addr.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Stores at the current stack slot, then decrements SP (wrapping within page 1).
    pub(crate) fn push(&mut self, value: u8) {
        self.write(STACK_BASE | self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    /// Increments SP (wrapping within page 1), then loads.
    pub(crate) fn pop(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.read(STACK_BASE | self.regs.sp as u16)
    }

    /// High byte first, so the low byte ends up at the lower address.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pop_word(&mut self) -> u16 {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;
        (hi << 8) | lo
    }

    // ========== Addressing ==========

    /// Resolves the operand for `mode`, advancing PC past the operand bytes.
    ///
    /// The returned flag is true when indexing crossed a page and
    /// `page_penalty` asked for that to cost a cycle. Write-class instructions
    /// pass `false`.
    pub(crate) fn resolve(&mut self, mode: AddressingMode, page_penalty: bool) -> (Operand, bool) {
        use AddressingMode::*;

        match mode {
            Implied => (Operand::None, false),
            Accumulator => (Operand::Accumulator, false),
            Immediate => {
                let addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                (Operand::Address(addr), false)
            }
            ZeroPage => (Operand::Address(self.fetch_byte() as u16), false),
            ZeroPageX => {
                let addr = self.fetch_byte().wrapping_add(self.regs.x);
                (Operand::Address(addr as u16), false)
            }
            ZeroPageY => {
                let addr = self.fetch_byte().wrapping_add(self.regs.y);
                (Operand::Address(addr as u16), false)
            }
            Absolute => (Operand::Address(self.fetch_word()), false),
            AbsoluteX => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.regs.x as u16);
                (Operand::Address(addr), page_penalty && crosses_page(base, addr))
            }
            AbsoluteY => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.regs.y as u16);
                (Operand::Address(addr), page_penalty && crosses_page(base, addr))
            }
            Indirect => {
                let ptr = self.fetch_word();
                // NMOS bug: the high byte is fetched from the same page when
                // the pointer sits on a page's last byte.
                let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let lo = self.read(ptr) as u16;
                let hi = self.read(hi_addr) as u16;
                (Operand::Address((hi << 8) | lo), false)
            }
            IndirectX => {
                let ptr = self.fetch_byte().wrapping_add(self.regs.x);
                (Operand::Address(self.read_zero_page_word(ptr)), false)
            }
            IndirectY => {
                let ptr = self.fetch_byte();
                let base = self.read_zero_page_word(ptr);
                let addr = base.wrapping_add(self.regs.y as u16);
                (Operand::Address(addr), page_penalty && crosses_page(base, addr))
            }
            Relative => {
                let offset = self.fetch_byte() as i8;
                let target = self.regs.pc.wrapping_add(offset as u16);
                (Operand::Address(target), false)
            }
        }
    }

    /// Reads the 8-bit value an operand refers to.
    pub(crate) fn operand_value(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Address(addr) => self.read(addr),
            Operand::Accumulator => self.regs.a,
            Operand::None => 0,
        }
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the status register as a packed byte (`NV-BDIZC`, bit 5 always 1).
    pub fn status(&self) -> u8 {
        self.regs.p.bits()
    }

    /// Returns a copy of all registers.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    /// Returns the total number of CPU cycles executed since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.regs.flag(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.regs.flag(Status::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.regs.flag(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.regs.flag(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.regs.flag(Status::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.regs.flag(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.regs.flag(Status::CARRY)
    }

    // ========== Register Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    /// Sets the status register; bit 5 is forced on.
    pub fn set_status(&mut self, value: u8) {
        self.regs.p = Status::from_byte(value);
    }

    /// Sets or clears individual status flags.
    pub fn set_flag(&mut self, flag: Status, value: bool) {
        self.regs.p.set(flag, value);
        self.regs.p.insert(Status::UNUSED);
    }

    // ========== Memory Access ==========

    /// Shared access to the attached bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the attached bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Detaches and returns the bus.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

/// True when `a` and `b` are on different 256-byte pages.
pub(crate) fn crosses_page(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}
