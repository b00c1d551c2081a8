//! # Memory Bus
//!
//! This module provides the `MemoryBus` trait that decouples the CPU and the
//! disassembler from any particular memory implementation. Every access the
//! engine makes goes through it, so a host can intercept individual addresses
//! (screen, keyboard, disk registers) without the engine knowing.
//!
//! Buses never fail: a read always yields a byte and a write may be dropped
//! (ROM, unmapped space). Reads take `&self`, which is what lets the
//! disassembler walk memory through a shared reference.

/// Byte-wide view of the 64KB address space.
///
/// ```
/// use sim6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x0200, 0x7F);
/// assert_eq!(mem.read(0x0200), 0x7F);
/// ```
///
/// A bus with 1KB of RAM mirrored across the lower half of the address space
/// and open bus (0xFF) above it:
///
/// ```
/// use sim6502::MemoryBus;
///
/// struct MirroredRam([u8; 0x400]);
///
/// impl MemoryBus for MirroredRam {
///     fn read(&self, addr: u16) -> u8 {
///         match addr {
///             0x0000..=0x7FFF => self.0[(addr & 0x3FF) as usize],
///             _ => 0xFF,
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.0[(addr & 0x3FF) as usize] = value;
///         }
///     }
/// }
///
/// let mut bus = MirroredRam([0; 0x400]);
/// bus.write(0x0401, 0xAB);
/// assert_eq!(bus.read(0x0001), 0xAB);
/// assert_eq!(bus.read(0xC000), 0xFF);
/// ```
pub trait MemoryBus {
    /// Byte at `addr`. Must not panic.
    fn read(&self, addr: u16) -> u8;

    /// Stores `value` at `addr`, or drops it. Must not panic.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word; the high byte address wraps at 0xFFFF.
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Copies `bytes` into consecutive addresses starting at `addr`, wrapping at 0xFFFF.
    ///
    /// ```
    /// use sim6502::{FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0xFFFF, &[0x01, 0x02]);
    /// assert_eq!(mem.read(0xFFFF), 0x01);
    /// assert_eq!(mem.read(0x0000), 0x02);
    /// ```
    fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut target = addr;
        for &byte in bytes {
            self.write(target, byte);
            target = target.wrapping_add(1);
        }
    }
}

impl<B: MemoryBus + ?Sized> MemoryBus for &mut B {
    fn read(&self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value)
    }
}

/// 64KB of plain RAM, zero-filled.
///
/// # Examples
///
/// ```
/// use sim6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0xFFFC, &[0x00, 0x80]); // reset vector
/// memory.write(0x8000, 0xEA); // NOP
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    bytes: Box<[u8; 0x10000]>,
}

impl FlatMemory {
    /// All 64KB zeroed.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0; 0x10000]),
        }
    }

    /// Read-only view of the whole address space.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory").finish_non_exhaustive()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }
}
