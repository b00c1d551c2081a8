//! # Branch Instructions
//!
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS.
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address of the following instruction. Cycle timing varies
//! based on whether the branch is taken and whether a page boundary is crossed:
//!
//! - 2 cycles if not taken
//! - 3 cycles if taken to the same page
//! - 4 cycles if taken to a different page
//!
//! No flags are affected.

use crate::cpu::{crosses_page, Operand};
use crate::registers::Status;
use crate::{MemoryBus, CPU};

/// Branches to the resolved target when `flag` equals `when_set`.
///
/// Returns the extra cycles beyond the base cost.
pub(crate) fn branch_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    flag: Status,
    when_set: bool,
    operand: Operand,
) -> u8 {
    let Operand::Address(target) = operand else {
        return 0;
    };

    if cpu.regs.flag(flag) != when_set {
        return 0;
    }

    // PC already points past the offset byte
    let next = cpu.regs.pc;
    cpu.regs.pc = target;
    1 + crosses_page(next, target) as u8
}
