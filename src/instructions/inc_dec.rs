//! # Increment and Decrement Instructions
//!
//! ±1 with 8-bit wraparound, updating Z and N. The memory forms read the operand
//! before writing the result back.

use crate::{AddressingMode, Cpu, MemoryBus};

fn modify_memory(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode, delta: fn(u8) -> u8) {
    let operand = cpu.resolve(mode, true);
    let result = delta(operand.value);
    cpu.memory.write(operand.address, result);
    cpu.flags.set_zn(result);
}

/// INC: Increment Memory.
pub(crate) fn inc(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    modify_memory(cpu, mode, |value| value.wrapping_add(1));
}

/// DEC: Decrement Memory.
pub(crate) fn dec(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    modify_memory(cpu, mode, |value| value.wrapping_sub(1));
}

pub(crate) fn inx(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.x = cpu.registers.x.wrapping_add(1);
    cpu.flags.set_zn(cpu.registers.x);
}

pub(crate) fn iny(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.y = cpu.registers.y.wrapping_add(1);
    cpu.flags.set_zn(cpu.registers.y);
}

pub(crate) fn dex(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.x = cpu.registers.x.wrapping_sub(1);
    cpu.flags.set_zn(cpu.registers.x);
}

pub(crate) fn dey(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.y = cpu.registers.y.wrapping_sub(1);
    cpu.flags.set_zn(cpu.registers.y);
}
