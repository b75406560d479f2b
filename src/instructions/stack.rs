//! # Stack Instructions
//!
//! PHA/PLA move the accumulator and PHP/PLP the packed status byte through the
//! page-one stack.

use crate::{AddressingMode, Cpu, Flags, MemoryBus};

/// PHA: Push Accumulator.
pub(crate) fn pha(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let a = cpu.registers.a;
    cpu.push_to_stack(a);
}

/// PHP: Push Processor Status.
pub(crate) fn php(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let status = cpu.flags.to_byte();
    cpu.push_to_stack(status);
}

/// PLA: Pull Accumulator. Updates Z and N.
pub(crate) fn pla(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let value = cpu.pop_from_stack();
    cpu.registers.a = value;
    cpu.flags.set_zn(value);
}

/// PLP: Pull Processor Status. Every flag is overwritten.
pub(crate) fn plp(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags = Flags::from_byte(cpu.pop_from_stack());
}
