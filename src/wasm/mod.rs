//! WebAssembly bindings for the emulator.
//!
//! This module provides JavaScript-callable interfaces to the reference
//! machine, enabling browser-based execution of 6502 ROM images.

pub mod api;

pub use api::Emulator;
