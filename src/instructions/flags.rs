//! # Status Flag Manipulation Instructions
//!
//! Direct boolean assignment, no other side effects. All use implied addressing
//! and execute in 2 cycles.

use crate::{AddressingMode, Cpu, MemoryBus};

/// CLC: Clear Carry Flag.
pub(crate) fn clc(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags.carry = false;
}

/// CLD: Clear Decimal Mode.
pub(crate) fn cld(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags.decimal = false;
}

/// CLI: Clear Interrupt Disable. Pending interrupts are taken at the next boundary.
pub(crate) fn cli(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags.interrupt_disable = false;
}

/// CLV: Clear Overflow Flag.
pub(crate) fn clv(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags.overflow = false;
}

/// SEC: Set Carry Flag.
pub(crate) fn sec(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags.carry = true;
}

/// SED: Set Decimal Mode (stored only).
pub(crate) fn sed(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags.decimal = true;
}

/// SEI: Set Interrupt Disable.
pub(crate) fn sei(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags.interrupt_disable = true;
}
