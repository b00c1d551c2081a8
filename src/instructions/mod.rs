//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 instructions, organized by category.
//! [`execute`] resolves the operand once, then hands it to a per-mnemonic function.
//! The dispatch match is exhaustive over [`Mnemonic`], so a mnemonic added to the
//! opcode table without semantics fails to compile.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::opcodes::{ExtraCycle, Mnemonic, OpcodeMetadata};
use crate::registers::Status;
use crate::{MemoryBus, CPU};

/// Executes one decoded instruction whose opcode byte has already been fetched.
///
/// Returns the total cycle cost: base cycles, plus the page-crossing penalty
/// for read-class indexed modes, plus any branch penalty.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, meta: &OpcodeMetadata) -> u8 {
    use Mnemonic::*;

    let page_penalty = meta.extra_cycle == ExtraCycle::PageCross;
    let (operand, crossed) = cpu.resolve(meta.addressing_mode, page_penalty);

    let extra = match meta.mnemonic {
        ADC => alu::adc(cpu, operand),
        SBC => alu::sbc(cpu, operand),
        AND => alu::and(cpu, operand),
        ORA => alu::ora(cpu, operand),
        EOR => alu::eor(cpu, operand),
        BIT => alu::bit(cpu, operand),
        CMP => alu::cmp(cpu, operand),
        CPX => alu::cpx(cpu, operand),
        CPY => alu::cpy(cpu, operand),

        ASL => shifts::modify(cpu, operand, shifts::asl),
        LSR => shifts::modify(cpu, operand, shifts::lsr),
        ROL => shifts::modify(cpu, operand, shifts::rol),
        ROR => shifts::modify(cpu, operand, shifts::ror),

        INC => inc_dec::inc(cpu, operand),
        DEC => inc_dec::dec(cpu, operand),
        INX => inc_dec::inx(cpu),
        INY => inc_dec::iny(cpu),
        DEX => inc_dec::dex(cpu),
        DEY => inc_dec::dey(cpu),

        LDA => load_store::lda(cpu, operand),
        LDX => load_store::ldx(cpu, operand),
        LDY => load_store::ldy(cpu, operand),
        STA => load_store::sta(cpu, operand),
        STX => load_store::stx(cpu, operand),
        STY => load_store::sty(cpu, operand),

        TAX => transfer::tax(cpu),
        TAY => transfer::tay(cpu),
        TXA => transfer::txa(cpu),
        TYA => transfer::tya(cpu),
        TSX => transfer::tsx(cpu),
        TXS => transfer::txs(cpu),

        PHA => stack::pha(cpu),
        PHP => stack::php(cpu),
        PLA => stack::pla(cpu),
        PLP => stack::plp(cpu),

        BCC => branches::branch_if(cpu, Status::CARRY, false, operand),
        BCS => branches::branch_if(cpu, Status::CARRY, true, operand),
        BNE => branches::branch_if(cpu, Status::ZERO, false, operand),
        BEQ => branches::branch_if(cpu, Status::ZERO, true, operand),
        BPL => branches::branch_if(cpu, Status::NEGATIVE, false, operand),
        BMI => branches::branch_if(cpu, Status::NEGATIVE, true, operand),
        BVC => branches::branch_if(cpu, Status::OVERFLOW, false, operand),
        BVS => branches::branch_if(cpu, Status::OVERFLOW, true, operand),

        JMP => control::jmp(cpu, operand),
        JSR => control::jsr(cpu, operand),
        RTS => control::rts(cpu),
        RTI => control::rti(cpu),
        BRK => control::brk(cpu),
        NOP => 0,

        CLC => flags::assign(cpu, Status::CARRY, false),
        SEC => flags::assign(cpu, Status::CARRY, true),
        CLI => flags::assign(cpu, Status::INTERRUPT_DISABLE, false),
        SEI => flags::assign(cpu, Status::INTERRUPT_DISABLE, true),
        CLD => flags::assign(cpu, Status::DECIMAL, false),
        SED => flags::assign(cpu, Status::DECIMAL, true),
        CLV => flags::assign(cpu, Status::OVERFLOW, false),
    };

    meta.base_cycles + crossed as u8 + extra
}
