//! Browser-facing wrapper around a `CPU<MappedMemory>` and a `Debugger`.
//!
//! JavaScript drives run control and registers I/O ports as callbacks. The
//! assembler and disassembler are exposed on the same object.

use wasm_bindgen::prelude::*;

use crate::assembler::assemble;
use crate::disassembler::disassemble;
use crate::{Debugger, IoPort, MappedMemory, MemoryBus, RunOutcome, CPU};

/// Error surfaced to JavaScript as a thrown object with a `message`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Outcome of [`Emulator6502::assemble`]. Only the first diagnostic is carried.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    success: bool,
    machine_code: Vec<u8>,
    origin: u16,
    errors: Vec<String>,
    error_line: Option<usize>,
}

#[wasm_bindgen]
impl AssemblyResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    #[wasm_bindgen(getter)]
    pub fn machine_code(&self) -> Vec<u8> {
        self.machine_code.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn origin(&self) -> u16 {
        self.origin
    }

    /// All diagnostics, one `line N: message` per line.
    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        (!self.errors.is_empty()).then(|| self.errors.join("\n"))
    }

    /// Line of the first diagnostic.
    #[wasm_bindgen(getter)]
    pub fn error_line(&self) -> Option<usize> {
        self.error_line
    }
}

/// One disassembled instruction
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Machine handle owned by the page.
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU<MappedMemory>,
    debugger: Debugger,
}

impl Default for Emulator6502 {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Creates an emulator over 64KB of zeroed RAM.
    ///
    /// Load a program and its reset vector, then call `reset`.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator6502 {
            cpu: CPU::new(MappedMemory::new()),
            debugger: Debugger::new(),
        }
    }

    /// Execute a single instruction, returning its cycle count
    pub fn step(&mut self) -> u8 {
        self.cpu.step()
    }

    /// Execute at least `cycles` cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> u32 {
        self.cpu.run_for_cycles(cycles as u64) as u32
    }

    /// Like `run_for_cycles`, but stops early on a breakpoint.
    ///
    /// Returns true when a breakpoint was hit.
    pub fn run_until_breakpoint(&mut self, cycles: u32) -> bool {
        matches!(
            self.debugger.run(&mut self.cpu, cycles as u64),
            RunOutcome::Breakpoint { .. }
        )
    }

    /// Reset the CPU; memory and attached ports are kept
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Raise a maskable interrupt
    pub fn irq(&mut self) -> u8 {
        self.cpu.irq()
    }

    /// Raise a non-maskable interrupt
    pub fn nmi(&mut self) -> u8 {
        self.cpu.nmi()
    }

    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    /// Read a single byte through the bus, including any port
    pub fn read(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte through the bus, including any port
    pub fn write(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copy `program` into memory at `start_addr`
    pub fn load(&mut self, program: &[u8], start_addr: u16) {
        self.cpu.memory_mut().load(start_addr, program);
    }

    /// The 256 bytes of page `page`, read through the bus.
    pub fn memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as u16) << 8;
        (0..256).map(|i| self.cpu.memory().read(start + i)).collect()
    }

    // Host I/O

    /// Calls `on_write(byte)` whenever the program writes to `addr`.
    pub fn add_output_port(&mut self, addr: u16, on_write: js_sys::Function) -> Result<(), JsError> {
        let port = IoPort::new().on_write(move |byte| {
            let _ = on_write.call1(&JsValue::NULL, &JsValue::from(byte));
        });
        self.cpu
            .memory_mut()
            .add_device(addr, Box::new(port))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Answers reads of `addr` with the number returned by `on_read()`.
    pub fn add_input_port(&mut self, addr: u16, on_read: js_sys::Function) -> Result<(), JsError> {
        let port = IoPort::new().on_read(move || {
            on_read
                .call0(&JsValue::NULL)
                .ok()
                .and_then(|v| v.as_f64())
                .map_or(0, |n| n as u8)
        });
        self.cpu
            .memory_mut()
            .add_device(addr, Box::new(port))
            .map_err(|e| JsError::new(&e.to_string()))
    }

    // Breakpoints

    pub fn toggle_breakpoint(&mut self, addr: u16) -> bool {
        self.debugger.toggle_breakpoint(addr)
    }

    pub fn clear_breakpoints(&mut self) {
        self.debugger.clear_breakpoints();
    }

    pub fn breakpoints(&self) -> Vec<u16> {
        self.debugger.breakpoints().collect()
    }

    // Toolchain

    /// Assembles `source` without touching memory.
    pub fn assemble(&self, source: &str) -> AssemblyResult {
        match assemble(source) {
            Ok(output) => AssemblyResult {
                success: true,
                machine_code: output.bytes,
                origin: output.origin,
                errors: Vec::new(),
                error_line: None,
            },
            Err(errors) => AssemblyResult {
                success: false,
                machine_code: Vec::new(),
                origin: 0,
                error_line: errors.first().map(|e| e.line),
                errors: errors.iter().map(ToString::to_string).collect(),
            },
        }
    }

    /// Assemble and load the program at its origin in one step
    pub fn assemble_and_load(&mut self, source: &str) -> AssemblyResult {
        let result = self.assemble(source);
        if result.success {
            self.load(&result.machine_code, result.origin);
        }
        result
    }

    /// Disassemble `count` instructions starting at `start_addr`
    pub fn disassemble(&self, start_addr: u16, count: u32) -> js_sys::Array {
        disassemble(self.cpu.memory(), start_addr, count as usize)
            .map(|instr| {
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes: instr.bytes,
                    text: instr.text,
                })
            })
            .collect()
    }
}
