//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA, TSX set Z and N from the copied value. TXS copies X
//! into SP and leaves the flags alone.

use crate::{MemoryBus, CPU};

pub(crate) fn tax<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.x = cpu.regs.a;
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.x);
    0
}

pub(crate) fn tay<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.y = cpu.regs.a;
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.y);
    0
}

pub(crate) fn txa<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.a = cpu.regs.x;
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.a);
    0
}

pub(crate) fn tya<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.a = cpu.regs.y;
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.a);
    0
}

pub(crate) fn tsx<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.x = cpu.regs.sp;
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.x);
    0
}

pub(crate) fn txs<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.sp = cpu.regs.x;
    0
}
