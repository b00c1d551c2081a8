//! # Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED, CLV. Each sets or clears exactly one bit of
//! P and touches nothing else.

use crate::registers::Status;
use crate::{MemoryBus, CPU};

pub(crate) fn assign<M: MemoryBus>(cpu: &mut CPU<M>, flag: Status, value: bool) -> u8 {
    cpu.regs.p.set(flag, value);
    0
}
