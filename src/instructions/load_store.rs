//! # Load and Store Instructions
//!
//! Loads update Z and N from the loaded value. Stores never read the effective
//! address and leave the flags untouched.

use crate::{AddressingMode, Cpu, MemoryBus};

/// LDA: Load Accumulator.
pub(crate) fn lda(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    cpu.registers.a = value;
    cpu.flags.set_zn(value);
}

/// LDX: Load X Register.
pub(crate) fn ldx(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    cpu.registers.x = value;
    cpu.flags.set_zn(value);
}

/// LDY: Load Y Register.
pub(crate) fn ldy(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    cpu.registers.y = value;
    cpu.flags.set_zn(value);
}

/// STA: Store Accumulator.
pub(crate) fn sta(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let address = cpu.resolve(mode, false).address;
    cpu.memory.write(address, cpu.registers.a);
}

/// STX: Store X Register.
pub(crate) fn stx(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let address = cpu.resolve(mode, false).address;
    cpu.memory.write(address, cpu.registers.x);
}

/// STY: Store Y Register.
pub(crate) fn sty(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let address = cpu.resolve(mode, false).address;
    cpu.memory.write(address, cpu.registers.y);
}
