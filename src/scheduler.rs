//! # Tick and Interrupt Sources
//!
//! [`Cpu::run`](crate::Cpu::run) is driven by a [`Scheduler`]: it blocks on
//! [`Scheduler::wait_tick`] once per cycle and polls
//! [`Scheduler::take_interrupt`] at each instruction boundary. The two waits are
//! independent, so an interrupt raised by another thread stays pending until the
//! CPU reaches a boundary with InterruptDisable clear.
//!
//! Three schedulers ship with the crate:
//!
//! - [`ChannelClock`]: one tick per message on a channel; dropping every sender
//!   closes the clock
//! - [`FreeRunning`]: ticks are always available until its [`StopHandle`] fires
//! - [`Metronome`]: a background thread feeding a `ChannelClock` at a fixed rate

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::debug;

/// Source of clock ticks and interrupt requests for the run loop.
pub trait Scheduler {
    /// Blocks until the next tick. Returns false once the clock is closed or
    /// cancelled, which ends the run loop.
    fn wait_tick(&mut self) -> bool;

    /// Takes the pending interrupt request, if any. Never blocks.
    fn take_interrupt(&mut self) -> bool;
}

/// Shared interrupt request line.
///
/// Any number of raisers may hold a clone; the scheduler consumes requests one
/// at a time. Requests are counted, so every `raise` is delivered exactly once
/// even when several arrive before the CPU reaches a boundary.
///
/// ```
/// use emu6502::InterruptLine;
///
/// let line = InterruptLine::new();
/// let raiser = line.clone();
///
/// raiser.raise();
/// assert!(line.is_pending());
/// assert!(line.take());
/// assert!(!line.take());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterruptLine(Arc<AtomicUsize>);

impl InterruptLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_pending(&self) -> bool {
        self.pending() > 0
    }

    /// Number of requests not yet taken.
    pub fn pending(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }

    /// Consumes one request, returning whether one was pending.
    pub fn take(&self) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Ticks delivered as messages on a channel.
///
/// # Examples
///
/// ```
/// use emu6502::{ChannelClock, Scheduler};
/// use std::sync::mpsc;
///
/// let (tx, rx) = mpsc::sync_channel(2);
/// let mut clock = ChannelClock::new(rx);
///
/// tx.send(()).unwrap();
/// drop(tx);
///
/// assert!(clock.wait_tick());
/// assert!(!clock.wait_tick()); // closed
/// ```
pub struct ChannelClock {
    ticks: Receiver<()>,
    interrupts: InterruptLine,
}

impl ChannelClock {
    pub fn new(ticks: Receiver<()>) -> Self {
        Self {
            ticks,
            interrupts: InterruptLine::new(),
        }
    }

    /// Uses an existing interrupt line instead of a private one.
    pub fn with_interrupts(mut self, interrupts: InterruptLine) -> Self {
        self.interrupts = interrupts;
        self
    }

    /// Handle for raising interrupts on this clock.
    pub fn interrupt_line(&self) -> InterruptLine {
        self.interrupts.clone()
    }
}

impl Scheduler for ChannelClock {
    fn wait_tick(&mut self) -> bool {
        self.ticks.recv().is_ok()
    }

    fn take_interrupt(&mut self) -> bool {
        self.interrupts.take()
    }
}

/// Cancels a [`FreeRunning`] or [`Metronome`] scheduler from any thread.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Unthrottled clock: every tick wait returns immediately until stopped.
///
/// Nothing blocks, so `run` spins a core at full speed. Use a [`Metronome`]
/// to pace execution instead.
///
/// ```
/// use emu6502::{FreeRunning, Scheduler};
///
/// let mut clock = FreeRunning::new();
/// let stop = clock.stop_handle();
///
/// assert!(clock.wait_tick());
/// stop.stop();
/// assert!(!clock.wait_tick());
/// ```
#[derive(Debug, Default)]
pub struct FreeRunning {
    stop: StopHandle,
    interrupts: InterruptLine,
}

impl FreeRunning {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interrupts(mut self, interrupts: InterruptLine) -> Self {
        self.interrupts = interrupts;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn interrupt_line(&self) -> InterruptLine {
        self.interrupts.clone()
    }
}

impl Scheduler for FreeRunning {
    fn wait_tick(&mut self) -> bool {
        !self.stop.is_stopped()
    }

    fn take_interrupt(&mut self) -> bool {
        self.interrupts.take()
    }
}

/// Clock thread emitting ticks at a fixed period.
///
/// Ticks are handed over through a one-slot channel, so the thread never runs
/// more than one tick ahead of the CPU. Stopping (or dropping the metronome)
/// ends the thread and closes the clock.
pub struct Metronome {
    clock: ChannelClock,
    stop: StopHandle,
}

impl Metronome {
    /// Starts a clock thread ticking every `period`.
    pub fn new(period: Duration) -> Self {
        let (tx, rx) = mpsc::sync_channel(1);
        let stop = StopHandle::default();
        let thread_stop = stop.clone();

        thread::spawn(move || {
            while !thread_stop.is_stopped() {
                thread::sleep(period);
                if tx.send(()).is_err() {
                    break;
                }
            }
            debug!("metronome stopped");
        });

        Self {
            clock: ChannelClock::new(rx),
            stop,
        }
    }

    /// Starts a clock thread ticking `frequency` times per second.
    pub fn from_hz(frequency: NonZeroU32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / f64::from(frequency.get())))
    }

    pub fn with_interrupts(mut self, interrupts: InterruptLine) -> Self {
        self.clock.interrupts = interrupts;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn interrupt_line(&self) -> InterruptLine {
        self.clock.interrupt_line()
    }
}

impl Scheduler for Metronome {
    fn wait_tick(&mut self) -> bool {
        self.clock.wait_tick()
    }

    fn take_interrupt(&mut self) -> bool {
        self.clock.take_interrupt()
    }
}

impl Drop for Metronome {
    fn drop(&mut self) {
        self.stop.stop();
    }
}
