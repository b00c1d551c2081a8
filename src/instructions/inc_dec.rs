//! # Increment and Decrement Instructions
//!
//! INC/DEC operate on memory; INX, INY, DEX, DEY on the index registers.
//! All wrap modulo 256 and update Z and N.

use crate::cpu::Operand;
use crate::{MemoryBus, CPU};

fn modify_memory<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand, delta: i8) -> u8 {
    if let Operand::Address(addr) = operand {
        let value = cpu.read(addr).wrapping_add_signed(delta);
        cpu.write(addr, value);
        cpu.regs.p = cpu.regs.p.with_zn(value);
    }
    0
}

pub(crate) fn inc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    modify_memory(cpu, operand, 1)
}

pub(crate) fn dec<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    modify_memory(cpu, operand, -1)
}

pub(crate) fn inx<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.x);
    0
}

pub(crate) fn iny<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.y);
    0
}

pub(crate) fn dex<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.x);
    0
}

pub(crate) fn dey<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.regs.p = cpu.regs.p.with_zn(cpu.regs.y);
    0
}
