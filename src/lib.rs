//! # 6502 Instruction Engine and Toolchain
//!
//! An NMOS 6502 emulation core with the two tools that must agree with it
//! byte for byte: a two-pass assembler and a table-driven disassembler.
//!
//! All three are driven by one opcode table ([`OPCODE_TABLE`]): the engine
//! decodes through it, the disassembler formats through it, and the
//! assembler's mnemonic/mode → opcode lookup ([`opcode_for`]) is derived
//! from it at compile time.
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{assemble, CPU, FlatMemory, MemoryBus};
//!
//! let program = assemble(
//!     "        *= $0600
//!              LDX #3
//!      LOOP    DEX
//!              BNE LOOP
//!              STX $00",
//! )
//! .unwrap();
//!
//! let mut memory = FlatMemory::new();
//! memory.load(program.origin, &program.bytes);
//! // reset vector -> $0600
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x06);
//!
//! let mut cpu = CPU::new(memory);
//! while cpu.pc() != 0x0600 + program.bytes.len() as u16 {
//!     cpu.step();
//! }
//! assert_eq!(cpu.x(), 0);
//! assert!(cpu.flag_z());
//! ```
//!
//! ## Architecture
//!
//! - **Bus**: the engine and disassembler only see [`MemoryBus`]. Hosts attach
//!   memory-mapped hardware through [`MappedMemory`] without the engine
//!   knowing which addresses are special
//! - **Step granularity**: [`CPU::step`] runs one instruction to completion and
//!   returns its cycle cost; pacing is the host's job
//! - **Graceful degradation**: undefined opcodes are logged and skipped, and the
//!   disassembler renders them as `.BYTE`
//! - **Logging**: through the `log` facade; the library never installs a logger
//!
//! ## Modules
//!
//! - `cpu` - CPU state and execution logic
//! - `registers` - register file and status flags
//! - `memory` - MemoryBus trait and flat memory
//! - `devices` - memory-mapped device registry
//! - `opcodes` - opcode metadata and encoding tables
//! - `addressing` - addressing mode enumeration
//! - `assembler` - two-pass assembler
//! - `disassembler` - linear-sweep disassembler
//! - `debugger` - breakpoints and run control
//! - `wasm` - JavaScript bindings (feature `wasm`)

pub mod addressing;
pub mod assembler;
pub mod cpu;
pub mod debugger;
pub mod devices;
pub mod disassembler;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{assemble, AssemblerError, AssemblerOutput, ErrorKind};
pub use cpu::{
    CPU, INTERRUPT_CYCLES, IRQ_VECTOR, NMI_VECTOR, RESET_SP, RESET_VECTOR, STACK_BASE,
    UNKNOWN_OPCODE_CYCLES,
};
pub use debugger::{Debugger, RunOutcome};
pub use devices::{Device, DeviceError, IoPort, MappedMemory, RomDevice};
pub use disassembler::{disassemble, disassemble_bytes, Instruction};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{metadata, opcode_for, ExtraCycle, Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use registers::{Registers, Status};
