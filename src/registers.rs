//! # Register File
//!
//! The programmer-visible 6502 state as a plain `Copy` value. Instruction
//! semantics in [`crate::instructions`] are written as functions from one
//! `Registers` value to the next, which keeps flag arithmetic testable
//! without a bus.

use bitflags::bitflags;

bitflags! {
    /// Processor status register (P), bit layout `NV-BDIZC`.
    ///
    /// Bit 5 is not a real flag; it always reads back as set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry (unsigned overflow out of bit 7, or no borrow)
        const CARRY = 0b0000_0001;
        /// Zero result
        const ZERO = 0b0000_0010;
        /// IRQ disable
        const INTERRUPT_DISABLE = 0b0000_0100;
        /// Decimal mode; tracked but arithmetic stays binary
        const DECIMAL = 0b0000_1000;
        /// Break, set in the byte pushed by BRK and PHP
        const BREAK = 0b0001_0000;
        /// Unused, always 1
        const UNUSED = 0b0010_0000;
        /// Signed overflow
        const OVERFLOW = 0b0100_0000;
        /// Bit 7 of the result
        const NEGATIVE = 0b1000_0000;
    }
}

impl Status {
    /// Builds a status value from a raw byte, forcing the unused bit on.
    pub const fn from_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte | Self::UNUSED.bits())
    }

    /// Returns `self` with Z and N derived from `value`.
    pub fn with_zn(mut self, value: u8) -> Self {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
        self
    }

    /// The byte pushed by BRK/PHP: break and unused bits set.
    pub fn pushed(self) -> u8 {
        (self | Status::BREAK | Status::UNUSED).bits()
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::UNUSED | Status::INTERRUPT_DISABLE
    }
}

/// Snapshot of all CPU registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Stack pointer (offset into page 1)
    pub sp: u8,
    /// Program counter
    pub pc: u16,
    /// Processor status
    pub p: Status,
}

impl Registers {
    /// Whether `flag` is set in P.
    pub fn flag(&self, flag: Status) -> bool {
        self.p.contains(flag)
    }
}
