//! WASM API for the 6502 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection
//! and I/O port traffic. The browser has no threads to block on, so the
//! emulator is stepped explicitly and the I/O port output is drained into the
//! JavaScript callback after every instruction.

use std::sync::mpsc::{self, Receiver, Sender};

use wasm_bindgen::prelude::*;

use crate::{InterruptLine, IoPort, Machine, MachineConfig, MemoryBus};

/// Output bytes buffered between drains. One instruction writes at most one
/// byte, so any non-zero capacity keeps writes from blocking.
const OUTPUT_BUFFER: usize = 16;

/// JavaScript-compatible error wrapper
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

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator {
    machine: Machine,
    input: Sender<u8>,
    output: Receiver<u8>,
    interrupts: InterruptLine,
    on_output: js_sys::Function,
}

#[wasm_bindgen]
impl Emulator {
    /// Builds the reference machine around `rom`. Every byte the program
    /// writes to the I/O port is passed to `on_output` as a number.
    #[wasm_bindgen(constructor)]
    pub fn new(rom: &[u8], on_output: js_sys::Function) -> Result<Emulator, JsError> {
        let config = MachineConfig::default();
        let (input, input_rx) = mpsc::channel();
        let (output_tx, output) = mpsc::sync_channel(OUTPUT_BUFFER);

        let port = IoPort::new(config.io_address)
            .with_input(input_rx)
            .with_output(output_tx);
        let machine = Machine::build(config, rom.to_vec(), port).map_err(js_error)?;

        Ok(Emulator {
            machine,
            input,
            output,
            interrupts: InterruptLine::new(),
            on_output,
        })
    }

    /// Execute a single instruction, entering the interrupt handler first if
    /// input is pending and interrupts are enabled. Returns the cycle cost.
    pub fn step(&mut self) -> Result<u8, JsError> {
        let cpu = self.machine.cpu_mut();
        if !cpu.flag_i() && self.interrupts.take() {
            cpu.interrupt();
        }

        let result = cpu.step().map_err(js_error);
        self.drain_output();
        result
    }

    /// Execute multiple cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        let mut executed = 0u32;
        while executed < cycles {
            executed += u32::from(self.step()?);
        }
        Ok(executed)
    }

    /// Queue an input byte for the I/O port and raise the interrupt line.
    pub fn send_input(&mut self, byte: u8) {
        // The receiver lives inside the machine, so the send cannot fail
        let _ = self.input.send(byte);
        self.interrupts.raise();
    }

    /// Reset the CPU from the ROM's reset vector. RAM is preserved.
    pub fn reset(&mut self) {
        self.machine.cpu_mut().reset();
    }

    fn drain_output(&self) {
        while let Ok(byte) = self.output.try_recv() {
            let _ = self
                .on_output
                .call1(&JsValue::NULL, &JsValue::from(byte));
        }
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.machine.cpu().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.machine.cpu().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.machine.cpu().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.machine.cpu().pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.machine.cpu().sp()
    }

    /// Packed status byte (NV-BDIZC)
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.machine.cpu().flags().to_byte()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.machine.cpu().cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.machine.cpu().memory().read(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.machine.cpu_mut().memory_mut().write(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = u16::from(page) << 8;
        let memory = self.machine.cpu().memory();
        (0..=0xFF).map(|i| memory.read(start + i)).collect()
    }
}
