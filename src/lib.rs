//! # 6502 CPU Emulator Core
//!
//! An NMOS 6502 execution engine running against a memory-mapped device bus.
//!
//! The crate provides the CPU state and fetch-decode-execute loop, a table-driven
//! opcode dispatcher covering the 151 documented opcodes, the thirteen addressing
//! modes, and a bus that routes accesses to pluggable RAM, ROM and I/O devices.
//! Execution is driven either synchronously ([`Cpu::step`]) or by an external
//! tick source ([`Cpu::run`] with a [`Scheduler`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use emu6502::{Cpu, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // LDA #$10; STA $0200
//! memory.load(0x8000, &[0xA9, 0x10, 0x8D, 0x00, 0x02]);
//!
//! let mut cpu = Cpu::new(memory);
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//! assert_eq!(cpu.a(), 0x10);
//! assert_eq!(cpu.memory().read(0x0200), 0x10);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, reset, interrupt entry, stack protocol and run loop
//! - `addressing` - addressing modes and operand resolution
//! - `opcodes` - opcode dispatch table
//! - `registers` - register, flags and stack pointer value types
//! - `memory` - `MemoryBus` trait and flat test memory
//! - `devices` - device trait, bus and RAM/ROM/I/O devices
//! - `scheduler` - tick and interrupt sources for the run loop
//! - `host` - threads bridging host byte streams to the I/O port
//! - `machine` - reference machine layout and ROM loading

pub mod addressing;
pub mod cpu;
pub mod devices;
pub mod host;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod scheduler;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{Cpu, IRQ_VECTOR, RESET_VECTOR};
pub use devices::{Bus, BusError, IoPort, Memory, Ram, Rom};
pub use machine::{ConfigError, Machine, MachineConfig};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{lookup, Instruction, OpcodeMetadata, OPCODE_TABLE};
pub use registers::{Flags, Registers, StackPointer};
pub use scheduler::{ChannelClock, FreeRunning, InterruptLine, Metronome, Scheduler, StopHandle};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The byte at `address` is not a documented opcode.
    UndefinedOpcode { opcode: u8, address: u16 },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UndefinedOpcode { opcode, address } => {
                write!(
                    f,
                    "Undefined opcode 0x{:02X} at address 0x{:04X}",
                    opcode, address
                )
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
