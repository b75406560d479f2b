//! # Register Transfer Instructions
//!
//! Register-to-register copies. All except TXS update Z and N from the copied value.

use crate::{AddressingMode, Cpu, MemoryBus, StackPointer};

pub(crate) fn tax(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.x = cpu.registers.a;
    cpu.flags.set_zn(cpu.registers.x);
}

pub(crate) fn tay(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.y = cpu.registers.a;
    cpu.flags.set_zn(cpu.registers.y);
}

pub(crate) fn txa(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.a = cpu.registers.x;
    cpu.flags.set_zn(cpu.registers.a);
}

pub(crate) fn tya(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.a = cpu.registers.y;
    cpu.flags.set_zn(cpu.registers.a);
}

pub(crate) fn tsx(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.registers.x = cpu.sp.value();
    cpu.flags.set_zn(cpu.registers.x);
}

/// TXS: Transfer X to Stack Pointer. No flags are affected.
pub(crate) fn txs(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.sp = StackPointer::new(cpu.registers.x);
}
