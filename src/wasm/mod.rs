//! WebAssembly bindings for the sim6502 core.
//!
//! This module provides JavaScript-callable interfaces to the emulator,
//! assembler and disassembler, so a browser host can drive the core and
//! render its own UI on top.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator6502;
