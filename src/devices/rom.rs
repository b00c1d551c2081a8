//! ROM device implementation.

use super::Device;

/// Read-only memory region.
///
/// Reads always come from the image. Writes still reach the backing store
/// underneath (see [`MappedMemory`](super::MappedMemory)) but are never visible
/// through the ROM.
///
/// # Examples
///
/// ```rust
/// use sim6502::{Device, RomDevice};
///
/// let mut rom = RomDevice::new(vec![0xEA, 0xEA, 0xEA]);
/// assert_eq!(rom.read(0), Some(0xEA));
///
/// rom.write(0, 0xFF);
/// assert_eq!(rom.read(0), Some(0xEA));
/// ```
pub struct RomDevice {
    data: Vec<u8>,
}

impl RomDevice {
    /// Creates a ROM holding `data`.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl Device for RomDevice {
    fn read(&self, offset: u16) -> Option<u8> {
        self.data.get(offset as usize).copied()
    }

    fn write(&mut self, _offset: u16, _value: u8) {}

    fn size(&self) -> usize {
        self.data.len()
    }
}
