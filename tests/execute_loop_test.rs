//! Tests for the cycle-driven execution APIs.

use std::num::NonZeroU32;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use emu6502::{ChannelClock, Cpu, FlatMemory, FreeRunning, InterruptLine, MemoryBus, Metronome};

/// CPU running `INX; JMP $8000` forever
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, &[0xE8, 0x4C, 0x00, 0x80]);
    Cpu::new(memory)
}

#[test]
fn test_run_for_cycles_budget() {
    let mut cpu = setup_cpu();

    // INX (2) + JMP (3) per iteration
    let executed = cpu.run_for_cycles(50).unwrap();

    assert_eq!(executed, 50);
    assert_eq!(cpu.x(), 10);
    assert_eq!(cpu.cycles(), 50);
}

#[test]
fn test_run_for_cycles_may_overshoot() {
    let mut cpu = setup_cpu();

    let executed = cpu.run_for_cycles(1).unwrap();

    assert_eq!(executed, 2);
    assert_eq!(cpu.x(), 1);
}

#[test]
fn test_channel_clock_tick_accounting() {
    let mut cpu = setup_cpu();
    let (tx, rx) = mpsc::sync_channel(0);
    let mut clock = ChannelClock::new(rx);

    let driver = thread::spawn(move || {
        for _ in 0..25 {
            tx.send(()).unwrap();
        }
    });

    cpu.run(&mut clock).unwrap();
    driver.join().unwrap();

    assert_eq!(cpu.cycles(), 25);
    assert_eq!(cpu.x(), 5);
}

#[test]
fn test_free_running_until_stopped() {
    let mut cpu = setup_cpu();
    let mut clock = FreeRunning::new();
    let stop = clock.stop_handle();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        stop.stop();
    });

    cpu.run(&mut clock).unwrap();
    stopper.join().unwrap();

    assert!(cpu.cycles() > 0);
}

#[test]
fn test_metronome_drives_cpu() {
    let mut cpu = setup_cpu();
    let mut metronome = Metronome::from_hz(NonZeroU32::new(10_000).unwrap());
    let stop = metronome.stop_handle();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        stop.stop();
    });

    cpu.run(&mut metronome).unwrap();
    stopper.join().unwrap();

    // Never faster than the metronome allows
    assert!(cpu.cycles() > 0);
    assert!(cpu.cycles() <= 600);
}

#[test]
fn test_metronome_delivers_interrupt() {
    let mut cpu = setup_cpu();
    // Handler: LDY #$42; JMP $9002
    cpu.memory_mut().write(0xFFFE, 0x00);
    cpu.memory_mut().write(0xFFFF, 0x90);
    cpu.memory_mut().load(0x9000, &[0xA0, 0x42, 0x4C, 0x02, 0x90]);
    cpu.set_sp(0xFF);

    let line = InterruptLine::new();
    let mut metronome =
        Metronome::from_hz(NonZeroU32::new(10_000).unwrap()).with_interrupts(line.clone());
    let stop = metronome.stop_handle();
    line.raise();

    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        stop.stop();
    });

    cpu.run(&mut metronome).unwrap();
    stopper.join().unwrap();

    assert_eq!(cpu.y(), 0x42);
    assert_eq!(cpu.pc(), 0x9002);
    assert!(cpu.flag_i());
    assert!(!line.is_pending());
}
