//! Memory-mapped device support.
//!
//! The engine only ever sees a [`MemoryBus`]. [`MappedMemory`] is the bus a host
//! uses when some addresses need to behave like hardware (a keyboard latch, a
//! screen register, a ROM image) while everything else stays plain RAM.
//!
//! # Architecture
//!
//! - **Device trait**: a component claiming a contiguous address range
//! - **MappedMemory**: a flat 64KB store plus a sparse registry of devices,
//!   consulted before the store on every access
//! - **Device implementations**: [`RomDevice`] and [`IoPort`]
//!
//! Reads are offered to the owning device first; a device returning `None`
//! falls through to the store. Writes are offered to the device and then
//! always land in the store as well, so a write-only register still reads
//! back its last value unless the device overrides the read.
//!
//! # Example
//!
//! ```rust
//! use sim6502::{CPU, IoPort, MappedMemory, MemoryBus, RomDevice};
//!
//! let mut memory = MappedMemory::new();
//!
//! // 4KB ROM at 0xF000 holding the reset vector
//! let mut rom = vec![0xEA; 0x1000];
//! rom[0x0FFC] = 0x00;
//! rom[0x0FFD] = 0xF0;
//! memory.add_device(0xF000, Box::new(RomDevice::new(rom))).unwrap();
//!
//! // A read-only port that always reports a key code
//! memory
//!     .add_device(0xD010, Box::new(IoPort::new().on_read(|| 0xC1)))
//!     .unwrap();
//!
//! assert_eq!(memory.read(0xD010), 0xC1);
//!
//! let cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0xF000);
//! ```

use thiserror::Error;

use crate::{FlatMemory, MemoryBus};

pub mod port;
pub mod rom;

pub use port::IoPort;
pub use rom::RomDevice;

/// Abstract interface for memory-mapped hardware devices.
///
/// The mapper calls these methods with an offset relative to the device's base
/// address (0 to size-1), so a device does not know where it is mapped.
///
/// # Examples
///
/// ```rust
/// use sim6502::Device;
///
/// /// Counts writes, reads back the count.
/// struct WriteCounter(u8);
///
/// impl Device for WriteCounter {
///     fn read(&self, _offset: u16) -> Option<u8> {
///         Some(self.0)
///     }
///
///     fn write(&mut self, _offset: u16, _value: u8) {
///         self.0 = self.0.wrapping_add(1);
///     }
///
///     fn size(&self) -> usize {
///         1
///     }
/// }
/// ```
pub trait Device {
    /// Reads a byte at `offset`, or `None` to let the backing store answer.
    fn read(&self, offset: u16) -> Option<u8>;

    /// Observes a write at `offset`. The byte is stored in the backing store
    /// regardless of what the device does with it.
    fn write(&mut self, offset: u16, value: u8);

    /// Number of consecutive addresses the device occupies.
    fn size(&self) -> usize;
}

/// Error returned when device registration fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// Address range intersects a device that is already registered.
    #[error(
        "device at ${new_base:04X}-${new_end:04X} overlaps existing device at ${existing_base:04X}-${existing_end:04X}"
    )]
    Overlap {
        new_base: u16,
        new_end: u16,
        existing_base: u16,
        existing_end: u16,
    },

    /// Device reports a size of zero.
    #[error("device at ${base:04X} occupies no addresses")]
    Empty { base: u16 },

    /// Device would extend past the top of the address space.
    #[error("device at ${base:04X} with size {size} extends past $FFFF")]
    OutOfRange { base: u16, size: usize },
}

struct DeviceMapping {
    base: u16,
    /// Last address covered, inclusive.
    end: u16,
    device: Box<dyn Device>,
}

impl DeviceMapping {
    fn offset_of(&self, addr: u16) -> Option<u16> {
        (self.base..=self.end)
            .contains(&addr)
            .then(|| addr - self.base)
    }
}

/// A 64KB bus with per-range device overrides.
///
/// # Examples
///
/// ```rust
/// use sim6502::{MappedMemory, MemoryBus, RomDevice};
///
/// let mut memory = MappedMemory::new();
/// memory.add_device(0xE000, Box::new(RomDevice::new(vec![0x42; 16]))).unwrap();
///
/// // Plain RAM everywhere else
/// memory.write(0x1234, 0x99);
/// assert_eq!(memory.read(0x1234), 0x99);
///
/// // ROM reads ignore writes
/// memory.write(0xE000, 0x00);
/// assert_eq!(memory.read(0xE000), 0x42);
///
/// // Overlapping registrations are rejected
/// assert!(memory.add_device(0xE008, Box::new(RomDevice::new(vec![0; 16]))).is_err());
/// ```
pub struct MappedMemory {
    store: FlatMemory,
    devices: Vec<DeviceMapping>,
}

impl MappedMemory {
    /// Creates a mapper over zeroed RAM with no devices.
    pub fn new() -> Self {
        Self::with_ram(FlatMemory::new())
    }

    /// Creates a mapper over a preloaded backing store.
    pub fn with_ram(store: FlatMemory) -> Self {
        Self {
            store,
            devices: Vec::new(),
        }
    }

    /// Registers `device` at `base`, covering `base..base + device.size()`.
    pub fn add_device(&mut self, base: u16, device: Box<dyn Device>) -> Result<(), DeviceError> {
        let size = device.size();
        if size == 0 {
            return Err(DeviceError::Empty { base });
        }

        let end = base as usize + size - 1;
        let end = u16::try_from(end).map_err(|_| DeviceError::OutOfRange { base, size })?;

        if let Some(existing) = self
            .devices
            .iter()
            .find(|m| base <= m.end && m.base <= end)
        {
            return Err(DeviceError::Overlap {
                new_base: base,
                new_end: end,
                existing_base: existing.base,
                existing_end: existing.end,
            });
        }

        self.devices.push(DeviceMapping { base, end, device });
        Ok(())
    }

    /// Number of registered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// The backing store, bypassing every device.
    pub fn ram(&self) -> &FlatMemory {
        &self.store
    }

    /// Mutable backing store, bypassing every device.
    pub fn ram_mut(&mut self) -> &mut FlatMemory {
        &mut self.store
    }
}

impl Default for MappedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for MappedMemory {
    fn read(&self, addr: u16) -> u8 {
        self.devices
            .iter()
            .find_map(|m| m.offset_of(addr).map(|offset| m.device.read(offset)))
            .flatten()
            .unwrap_or_else(|| self.store.read(addr))
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some((mapping, offset)) = self
            .devices
            .iter_mut()
            .find_map(|m| m.offset_of(addr).map(|offset| (m, offset)))
        {
            mapping.device.write(offset, value);
        }
        self.store.write(addr, value);
    }
}
