//! Tests for BRK, RTI and scheduler-delivered interrupts.

use std::sync::mpsc;

use emu6502::{ChannelClock, Cpu, FlatMemory, Flags, InterruptLine, MemoryBus};

/// Helper function to create a CPU with reset vector at 0x8000 and the
/// interrupt vector at 0x9000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0xFFFE, 0x00);
    memory.write(0xFFFF, 0x90);
    Cpu::new(memory)
}

/// Clock with `ticks` queued ticks that closes once they are consumed.
fn clock_with_ticks(ticks: usize, interrupts: InterruptLine) -> ChannelClock {
    let (tx, rx) = mpsc::sync_channel(ticks);
    for _ in 0..ticks {
        tx.send(()).unwrap();
    }
    ChannelClock::new(rx).with_interrupts(interrupts)
}

#[test]
fn test_brk_enters_handler() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x00);
    cpu.set_sp(0xFF);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert!(cpu.flag_i());
    assert!(cpu.flag_b());
    assert_eq!(cpu.cycles(), 7);

    // Return address is the byte after BRK, low byte pushed first
    assert_eq!(cpu.memory().read(0x01FF), 0x01);
    assert_eq!(cpu.memory().read(0x01FE), 0x80);
    // Pushed status is the one live before BRK, without B
    assert_eq!(cpu.memory().read(0x01FD), Flags::CARRY);
    assert_eq!(cpu.sp(), 0xFC);
}

#[test]
fn test_brk_rti_round_trip() {
    let mut cpu = setup_cpu();

    // BRK; LDA #$01 -- handler: RTI
    cpu.memory_mut().load(0x8000, &[0x00, 0xA9, 0x01]);
    cpu.memory_mut().write(0x9000, 0x40);
    cpu.set_sp(0xFF);
    cpu.set_flag_z(true);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_i());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_pending_interrupt_taken_at_boundary() {
    let mut cpu = setup_cpu();

    // Main: NOP NOP; handler: LDA #$42
    cpu.memory_mut().load(0x8000, &[0xEA, 0xEA]);
    cpu.memory_mut().load(0x9000, &[0xA9, 0x42]);
    cpu.set_sp(0xFF);

    let line = InterruptLine::new();
    line.raise();

    // Two ticks: exactly one 2-cycle instruction
    let mut clock = clock_with_ticks(2, line.clone());
    cpu.run(&mut clock).unwrap();

    // The interrupt was entered before the first fetch
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.pc(), 0x9002);
    assert!(cpu.flag_i());
    assert_eq!(cpu.cycles(), 2);
    assert!(!line.is_pending());

    // Interrupted PC was saved
    assert_eq!(cpu.memory().read(0x01FF), 0x00);
    assert_eq!(cpu.memory().read(0x01FE), 0x80);
}

#[test]
fn test_masked_interrupt_stays_pending() {
    let mut cpu = setup_cpu();

    // SEI; NOP; CLI; NOP
    cpu.memory_mut().load(0x8000, &[0x78, 0xEA, 0x58, 0xEA]);
    cpu.memory_mut().load(0x9000, &[0xEA]);
    cpu.set_sp(0xFF);

    let line = InterruptLine::new();

    // SEI runs first, then the line is raised while masked
    let mut clock = clock_with_ticks(2, line.clone());
    cpu.run(&mut clock).unwrap();
    assert!(cpu.flag_i());

    line.raise();
    let mut clock = clock_with_ticks(4, line.clone());
    cpu.run(&mut clock).unwrap();

    // NOP and CLI ran without entering the handler
    assert_eq!(cpu.pc(), 0x8003);
    assert!(line.is_pending());

    // Next boundary with I clear takes it
    let mut clock = clock_with_ticks(2, line.clone());
    cpu.run(&mut clock).unwrap();
    assert_eq!(cpu.pc(), 0x9001);
    assert!(!line.is_pending());
}

#[test]
fn test_interrupt_entry_consumes_no_ticks() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x9000, &[0xEA]);
    cpu.set_sp(0xFF);

    let line = InterruptLine::new();
    line.raise();

    let mut clock = clock_with_ticks(2, line);
    cpu.run(&mut clock).unwrap();

    assert_eq!(cpu.cycles(), 2);
    assert_eq!(cpu.pc(), 0x9001);
}

#[test]
fn test_step_ignores_pending_interrupt() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0xEA);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8001);
    assert!(!cpu.flag_i());
}
