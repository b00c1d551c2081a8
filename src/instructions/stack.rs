//! # Stack Instructions
//!
//! PHA, PHP, PLA, PLP. The stack lives in page 1 and SP wraps within it.

use crate::registers::Status;
use crate::{MemoryBus, CPU};

pub(crate) fn pha<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.push(cpu.regs.a);
    0
}

/// PHP pushes P with the break and unused bits set.
pub(crate) fn php<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.push(cpu.regs.p.pushed());
    0
}

pub(crate) fn pla<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    let value = cpu.pop();
    cpu.regs.a = value;
    cpu.regs.p = cpu.regs.p.with_zn(value);
    0
}

/// PLP restores P from the stack; the unused bit reads back as set.
pub(crate) fn plp<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.p = Status::from_byte(cpu.pop());
    0
}
