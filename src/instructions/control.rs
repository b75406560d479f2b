//! # Control Flow Instructions
//!
//! JMP, JSR, RTS, RTI, BRK and NOP.
//!
//! JSR and RTS agree on the return address convention of the real part: JSR
//! pushes the address of its own last operand byte and RTS adds one to the
//! popped value. BRK enters the interrupt sequence and then sets the B flag.

use crate::{AddressingMode, Cpu, Flags, MemoryBus};

/// JMP: Jump (absolute or indirect). No flags are affected.
pub(crate) fn jmp(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    cpu.pc = cpu.resolve(mode, false).address;
}

/// JSR: Jump to Subroutine.
pub(crate) fn jsr(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let return_address = cpu.pc.wrapping_sub(1);
    cpu.push_stack_u16(return_address);
    cpu.pc = cpu.resolve(mode, false).address;
}

/// RTS: Return from Subroutine.
pub(crate) fn rts(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.pc = cpu.pop_stack_u16().wrapping_add(1);
}

/// RTI: Return from Interrupt. Restores the flags, then the program counter.
pub(crate) fn rti(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.flags = Flags::from_byte(cpu.pop_from_stack());
    cpu.pc = cpu.pop_stack_u16();
}

/// BRK: Force Interrupt.
///
/// Runs the interrupt sequence with the address after the opcode as the return
/// address, then sets B. The pushed status is the one live before BRK.
pub(crate) fn brk(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    cpu.interrupt();
    cpu.flags.break_command = true;
}

pub(crate) fn nop(_cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {}
