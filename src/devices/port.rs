//! Single-address I/O register backed by host closures.
//!
//! This is how a host wires keyboard latches, character output and disk
//! control registers onto the bus without the engine knowing about them.

use super::Device;

type ReadHook = Box<dyn Fn() -> u8>;
type WriteHook = Box<dyn FnMut(u8)>;

/// A one-byte device whose reads and writes call into the host.
///
/// Without a read hook the port declines reads, so the bus returns the last
/// byte written to that address. Without a write hook writes are only stored.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use sim6502::{IoPort, MappedMemory, MemoryBus};
///
/// let screen = Rc::new(RefCell::new(Vec::new()));
/// let sink = screen.clone();
///
/// let mut memory = MappedMemory::new();
/// memory
///     .add_device(0xD012, Box::new(IoPort::new().on_write(move |b| sink.borrow_mut().push(b))))
///     .unwrap();
///
/// memory.write(0xD012, b'H');
/// memory.write(0xD012, b'I');
/// assert_eq!(*screen.borrow(), b"HI");
/// assert_eq!(memory.read(0xD012), b'I');
/// ```
#[derive(Default)]
pub struct IoPort {
    on_read: Option<ReadHook>,
    on_write: Option<WriteHook>,
}

impl IoPort {
    /// A port with no hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers reads with `hook()`.
    pub fn on_read(mut self, hook: impl Fn() -> u8 + 'static) -> Self {
        self.on_read = Some(Box::new(hook));
        self
    }

    /// Passes every written byte to `hook`.
    pub fn on_write(mut self, hook: impl FnMut(u8) + 'static) -> Self {
        self.on_write = Some(Box::new(hook));
        self
    }
}

impl Device for IoPort {
    fn read(&self, _offset: u16) -> Option<u8> {
        self.on_read.as_ref().map(|hook| hook())
    }

    fn write(&mut self, _offset: u16, value: u8) {
        if let Some(hook) = self.on_write.as_mut() {
            hook(value);
        }
    }

    fn size(&self) -> usize {
        1
    }
}
