//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! ADC, SBC, AND, ORA, EOR, BIT, CMP, CPX, CPY.
//!
//! The arithmetic itself is expressed as pure functions over [`Registers`] and
//! [`Status`]; the `CPU`-facing wrappers only fetch the operand and store the
//! new register state.
//!
//! Arithmetic is always binary. The decimal flag is settable and preserved,
//! but ADC/SBC never apply BCD correction.

use crate::cpu::Operand;
use crate::registers::{Registers, Status};
use crate::{MemoryBus, CPU};

/// A + M + C.
///
/// Carry is set on unsigned overflow past 8 bits; overflow is set when both
/// operands share a sign that the result does not.
pub(crate) fn add(regs: Registers, value: u8) -> Registers {
    let carry_in = regs.flag(Status::CARRY) as u16;
    let sum = regs.a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    let mut p = regs.p.with_zn(result);
    p.set(Status::CARRY, sum > 0xFF);
    p.set(Status::OVERFLOW, (regs.a ^ result) & (value ^ result) & 0x80 != 0);

    Registers { a: result, p, ..regs }
}

/// A - M - !C, computed as A + !M + C.
pub(crate) fn subtract(regs: Registers, value: u8) -> Registers {
    add(regs, !value)
}

/// Flags for `register - value` without storing the difference.
pub(crate) fn compare(p: Status, register: u8, value: u8) -> Status {
    let mut p = p.with_zn(register.wrapping_sub(value));
    p.set(Status::CARRY, register >= value);
    p
}

pub(crate) fn adc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    cpu.regs = add(cpu.regs, value);
    0
}

pub(crate) fn sbc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    cpu.regs = subtract(cpu.regs, value);
    0
}

fn logical<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand, op: fn(u8, u8) -> u8) -> u8 {
    let result = op(cpu.regs.a, cpu.operand_value(operand));
    cpu.regs.a = result;
    cpu.regs.p = cpu.regs.p.with_zn(result);
    0
}

pub(crate) fn and<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    logical(cpu, operand, |a, m| a & m)
}

pub(crate) fn ora<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    logical(cpu, operand, |a, m| a | m)
}

pub(crate) fn eor<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    logical(cpu, operand, |a, m| a ^ m)
}

/// Z from A & M; N and V copied from bits 7 and 6 of M.
pub(crate) fn bit<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    let p = &mut cpu.regs.p;
    p.set(Status::ZERO, cpu.regs.a & value == 0);
    p.set(Status::OVERFLOW, value & 0x40 != 0);
    p.set(Status::NEGATIVE, value & 0x80 != 0);
    0
}

pub(crate) fn cmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    cpu.regs.p = compare(cpu.regs.p, cpu.regs.a, value);
    0
}

pub(crate) fn cpx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    cpu.regs.p = compare(cpu.regs.p, cpu.regs.x, value);
    0
}

pub(crate) fn cpy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    let value = cpu.operand_value(operand);
    cpu.regs.p = compare(cpu.regs.p, cpu.regs.y, value);
    0
}
