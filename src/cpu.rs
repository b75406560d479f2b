//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - [`Cpu::step`]: execute one instruction, no interrupt sampling
//! - [`Cpu::run_for_cycles`]: step until a cycle budget is exhausted
//! - [`Cpu::run`]: tick-driven loop against a [`Scheduler`], sampling interrupts
//!   at instruction boundaries
//!
//! Every instruction goes through the same sequence: fetch the opcode and advance
//! PC by one, look it up in [`OPCODE_TABLE`](crate::OPCODE_TABLE), advance PC past
//! the operand bytes, then call the handler.

use log::{debug, error, trace};

use crate::opcodes::{lookup, OpcodeMetadata};
use crate::registers::{Flags, Registers, StackPointer};
use crate::scheduler::Scheduler;
use crate::{ExecutionError, MemoryBus};

/// Address of the little-endian reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Address of the little-endian interrupt (IRQ/BRK) vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// 6502 CPU state and execution context.
///
/// The CPU struct contains all processor state including registers, flags, program counter,
/// stack pointer, and cycle counter. It is generic over the memory implementation via the
/// `MemoryBus` trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use emu6502::{Cpu, FlatMemory, MemoryBus};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - loads PC from reset vector
/// let cpu = Cpu::new(memory);
///
/// // Inspect initial state
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0x00);
/// assert_eq!(cpu.flags().to_byte(), 0x00);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct Cpu<M: MemoryBus + ?Sized> {
    pub(crate) registers: Registers,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    pub(crate) sp: StackPointer,

    pub(crate) flags: Flags,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Cycle count when the previous interrupt was entered
    last_interrupt_cycles: u64,

    /// Memory bus implementation. Kept last so `Cpu<M>` unsizes to
    /// `Cpu<dyn MemoryBus>` for the dispatch table handlers.
    pub(crate) memory: M,
}

impl<M: MemoryBus + 'static> Cpu<M> {
    /// Creates a new CPU with the given memory bus and resets it.
    ///
    /// See [`Cpu::reset`] for the resulting state.
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            registers: Registers::default(),
            pc: 0,
            sp: StackPointer::default(),
            flags: Flags::default(),
            cycles: 0,
            last_interrupt_cycles: 0,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Executes a single instruction and returns its cycle cost.
    ///
    /// The cost is added to the cycle counter. Interrupts are not sampled; use
    /// [`Cpu::run`] for scheduler-driven execution.
    ///
    /// # Errors
    ///
    /// [`ExecutionError::UndefinedOpcode`] if the byte at PC has no table entry.
    /// PC is left on the offending byte and no other state changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::{Cpu, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.load(0x8000, &[0xA9, 0x42]); // LDA #$42
    ///
    /// let mut cpu = Cpu::new(mem);
    /// assert_eq!(cpu.step(), Ok(2));
    /// assert_eq!(cpu.a(), 0x42);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// assert_eq!(cpu.cycles(), 2);
    /// ```
    pub fn step(&mut self) -> Result<u8, ExecutionError> {
        let metadata = self.execute_next()?;
        self.cycles += u64::from(metadata.cycles);
        Ok(metadata.cycles)
    }

    /// Runs instructions until at least `cycle_budget` cycles have elapsed.
    ///
    /// Returns the number of cycles actually executed, which may exceed the
    /// budget by up to one instruction.
    ///
    /// # Errors
    ///
    /// Stops at the first undefined opcode, see [`Cpu::step`].
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start = self.cycles;
        while self.cycles - start < cycle_budget {
            self.step()?;
        }
        Ok(self.cycles - start)
    }

    /// Runs the tick-driven execution loop until the scheduler's clock closes.
    ///
    /// Each iteration waits for one tick, then samples the pending interrupt
    /// (only while InterruptDisable is clear), fetches and executes one
    /// instruction and waits for the remaining `cycles - 1` ticks. Every tick
    /// increments the cycle counter. Entering the interrupt handler consumes
    /// no ticks.
    ///
    /// # Errors
    ///
    /// Stops at the first undefined opcode, see [`Cpu::step`].
    pub fn run<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Result<(), ExecutionError> {
        loop {
            if !scheduler.wait_tick() {
                break;
            }

            if !self.flags.interrupt_disable && scheduler.take_interrupt() {
                self.interrupt();
            }

            let metadata = self.execute_next()?;
            self.cycles += 1;

            for _ in 1..metadata.cycles {
                if !scheduler.wait_tick() {
                    debug!("clock closed mid-instruction at PC=0x{:04X}", self.pc);
                    return Ok(());
                }
                self.cycles += 1;
            }
        }

        debug!(
            "clock closed at PC=0x{:04X} after {} cycles",
            self.pc, self.cycles
        );
        Ok(())
    }

    /// Consumes the CPU and returns its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Fetch, decode and execute one instruction without touching the cycle counter.
    fn execute_next(&mut self) -> Result<&'static OpcodeMetadata, ExecutionError> {
        let address = self.pc;
        let opcode = self.memory.read(address);

        let Some(metadata) = lookup(opcode) else {
            error!("undefined opcode 0x{:02X} at 0x{:04X}", opcode, address);
            return Err(ExecutionError::UndefinedOpcode { opcode, address });
        };

        trace!("0x{:04X}: {}", address, metadata);

        self.pc = address
            .wrapping_add(1)
            .wrapping_add(metadata.addressing_mode.size());

        let cpu: &mut Cpu<dyn MemoryBus> = self;
        (metadata.handler)(cpu, metadata.addressing_mode);

        Ok(metadata)
    }
}

impl<M: MemoryBus + ?Sized> Cpu<M> {
    /// Resets the CPU.
    ///
    /// Loads PC from the reset vector at 0xFFFC/0xFFFD (little-endian), zeroes
    /// A/X/Y and the stack pointer and clears every flag. The cycle counter is
    /// left untouched.
    pub fn reset(&mut self) {
        self.registers = Registers::default();
        self.sp = StackPointer::new(0x00);
        self.flags = Flags::default();
        self.pc = self.read_u16(RESET_VECTOR);
        debug!("reset, PC=0x{:04X}", self.pc);
    }

    /// Enters the interrupt handler.
    ///
    /// Pushes PC, then the packed flags, sets InterruptDisable and loads PC from
    /// the interrupt vector at 0xFFFE/0xFFFF. The mask is not consulted; callers
    /// decide whether an interrupt may be taken.
    pub fn interrupt(&mut self) {
        debug!(
            "interrupt at PC=0x{:04X}, {} cycles since previous interrupt",
            self.pc,
            self.cycles - self.last_interrupt_cycles
        );
        self.last_interrupt_cycles = self.cycles;

        self.push_stack_u16(self.pc);
        self.push_to_stack(self.flags.to_byte());
        self.flags.interrupt_disable = true;
        self.pc = self.read_u16(IRQ_VECTOR);
    }

    /// Writes a byte at the stack pointer, then decrements it.
    pub fn push_to_stack(&mut self, value: u8) {
        self.memory.write(self.sp.address(), value);
        self.sp.push();
    }

    /// Increments the stack pointer, then reads the byte it designates.
    pub fn pop_from_stack(&mut self) -> u8 {
        self.sp.pop();
        self.memory.read(self.sp.address())
    }

    /// Pushes a 16-bit value, low byte first.
    pub fn push_stack_u16(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push_to_stack(low);
        self.push_to_stack(high);
    }

    /// Pops a 16-bit value pushed by [`Cpu::push_stack_u16`], high byte first.
    pub fn pop_stack_u16(&mut self) -> u16 {
        let high = self.pop_from_stack();
        let low = self.pop_from_stack();
        u16::from_le_bytes([low, high])
    }

    /// Reads a little-endian word. The high byte address wraps at 0xFFFF.
    pub(crate) fn read_u16(&self, addr: u16) -> u16 {
        let low = self.memory.read(addr);
        let high = self.memory.read(addr.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    pub fn a(&self) -> u8 {
        self.registers.a
    }

    pub fn x(&self) -> u8 {
        self.registers.x
    }

    pub fn y(&self) -> u8 {
        self.registers.y
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Stack pointer value (the stack lives at `0x0100 + sp`).
    pub fn sp(&self) -> u8 {
        self.sp.value()
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Total cycles executed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn registers(&self) -> Registers {
        self.registers
    }

    pub fn set_a(&mut self, value: u8) {
        self.registers.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.registers.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.registers.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = StackPointer::new(value);
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    pub fn flag_n(&self) -> bool {
        self.flags.negative
    }

    pub fn flag_v(&self) -> bool {
        self.flags.overflow
    }

    pub fn flag_b(&self) -> bool {
        self.flags.break_command
    }

    pub fn flag_d(&self) -> bool {
        self.flags.decimal
    }

    pub fn flag_i(&self) -> bool {
        self.flags.interrupt_disable
    }

    pub fn flag_z(&self) -> bool {
        self.flags.zero
    }

    pub fn flag_c(&self) -> bool {
        self.flags.carry
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flags.negative = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.flags.overflow = value;
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.flags.break_command = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.flags.decimal = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.flags.interrupt_disable = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flags.zero = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flags.carry = value;
    }

    /// Shared access to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the memory bus, for loading programs and test setup.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }
}
