//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA, LDX, LDY: Load a register from memory, setting Z and N
//! - STA, STX, STY: Store a register to memory, affecting no flags
//!
//! Stores never pay the indexed page-crossing penalty; that distinction is
//! carried by the opcode table rather than handled here.

use crate::cpu::Operand;
use crate::{MemoryBus, CPU};

pub(crate) fn lda<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    cpu.regs.a = value;
    cpu.regs.p = cpu.regs.p.with_zn(value);
    0
}

pub(crate) fn ldx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    cpu.regs.x = value;
    cpu.regs.p = cpu.regs.p.with_zn(value);
    0
}

pub(crate) fn ldy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    cpu.regs.y = value;
    cpu.regs.p = cpu.regs.p.with_zn(value);
    0
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand, value: u8) -> u8 {
    if let Operand::Address(addr) = operand {
        cpu.write(addr, value);
    }
    0
}

pub(crate) fn sta<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.regs.a;
    store(cpu, operand, value)
}

pub(crate) fn stx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.regs.x;
    store(cpu, operand, value)
}

pub(crate) fn sty<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.regs.y;
    store(cpu, operand, value)
}
