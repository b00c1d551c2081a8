//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL, ROR, each on the accumulator or a memory location.
//!
//! The bit manipulation is a pure function `(P, value) -> (result, P)`;
//! [`modify`] applies one of them to whichever target the operand names.

use crate::cpu::Operand;
use crate::registers::Status;
use crate::{MemoryBus, CPU};

type ShiftOp = fn(Status, u8) -> (u8, Status);

fn finish(p: Status, result: u8, carry: bool) -> (u8, Status) {
    let mut p = p.with_zn(result);
    p.set(Status::CARRY, carry);
    (result, p)
}

/// Bit 7 into C, zero into bit 0.
pub(crate) fn asl(p: Status, value: u8) -> (u8, Status) {
    finish(p, value << 1, value & 0x80 != 0)
}

/// Bit 0 into C, zero into bit 7.
pub(crate) fn lsr(p: Status, value: u8) -> (u8, Status) {
    finish(p, value >> 1, value & 0x01 != 0)
}

/// Bit 7 into C, old C into bit 0.
pub(crate) fn rol(p: Status, value: u8) -> (u8, Status) {
    let carry_in = p.contains(Status::CARRY) as u8;
    finish(p, (value << 1) | carry_in, value & 0x80 != 0)
}

/// Bit 0 into C, old C into bit 7.
pub(crate) fn ror(p: Status, value: u8) -> (u8, Status) {
    let carry_in = (p.contains(Status::CARRY) as u8) << 7;
    finish(p, (value >> 1) | carry_in, value & 0x01 != 0)
}

pub(crate) fn modify<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand, op: ShiftOp) -> u8 {
    match operand {
        Operand::Accumulator => {
            let (result, p) = op(cpu.regs.p, cpu.regs.a);
            cpu.regs.a = result;
            cpu.regs.p = p;
        }
        Operand::Address(addr) => {
            let (result, p) = op(cpu.regs.p, cpu.read(addr));
            cpu.write(addr, result);
            cpu.regs.p = p;
        }
        Operand::None => {}
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asl_carry_out() {
        let (result, p) = asl(Status::default(), 0x81);
        assert_eq!(result, 0x02);
        assert!(p.contains(Status::CARRY));
        assert!(!p.contains(Status::ZERO));
    }

    #[test]
    fn test_lsr_to_zero() {
        let (result, p) = lsr(Status::default(), 0x01);
        assert_eq!(result, 0x00);
        assert!(p.contains(Status::CARRY | Status::ZERO));
        assert!(!p.contains(Status::NEGATIVE));
    }

    #[test]
    fn test_rol_rotates_carry_in() {
        let (result, p) = rol(Status::default() | Status::CARRY, 0x40);
        assert_eq!(result, 0x81);
        assert!(!p.contains(Status::CARRY));
        assert!(p.contains(Status::NEGATIVE));
    }

    #[test]
    fn test_ror_rotates_carry_in() {
        let (result, p) = ror(Status::default() | Status::CARRY, 0x01);
        assert_eq!(result, 0x80);
        assert!(p.contains(Status::CARRY | Status::NEGATIVE));
    }
}
