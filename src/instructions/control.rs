//! # Control Flow Instructions
//!
//! JMP, JSR, RTS, RTI and BRK. NOP has no semantics and is handled inline by
//! the dispatcher.

use crate::cpu::{Operand, IRQ_VECTOR};
use crate::registers::Status;
use crate::{MemoryBus, CPU};

/// JMP: load PC with the effective address.
///
/// For the indirect form, the operand resolver has already applied the
/// page-wrap quirk when the pointer sits at $xxFF.
pub(crate) fn jmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    if let Operand::Address(target) = operand {
        cpu.regs.pc = target;
    }
    0
}

/// JSR: push the address of the last byte of this instruction, then jump.
pub(crate) fn jsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) -> u8 {
    if let Operand::Address(target) = operand {
        let return_addr = cpu.regs.pc.wrapping_sub(1);
        cpu.push_word(return_addr);
        cpu.regs.pc = target;
    }
    0
}

/// RTS: pop the return address and resume at the byte after it.
pub(crate) fn rts<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.pc = cpu.pop_word().wrapping_add(1);
    0
}

/// RTI: pop P (unused forced on), then PC.
pub(crate) fn rti<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.regs.p = Status::from_byte(cpu.pop());
    cpu.regs.pc = cpu.pop_word();
    0
}

/// BRK: software interrupt through the IRQ vector.
///
/// The pushed return address skips the padding byte after the opcode, and
/// the pushed status has the break bit set.
pub(crate) fn brk<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    let return_addr = cpu.regs.pc.wrapping_add(1);
    cpu.push_word(return_addr);
    cpu.push(cpu.regs.p.pushed());
    cpu.regs.p.insert(Status::INTERRUPT_DISABLE);
    cpu.regs.pc = cpu.memory.read_word(IRQ_VECTOR);
    0
}
