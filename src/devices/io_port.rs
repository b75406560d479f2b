//! Single-byte I/O port device.
//!
//! The port occupies one address. Reads take the next queued input byte (or 0
//! when nothing is queued), writes hand a byte to the output consumer and block
//! until it is taken.

use std::cell::Cell;
use std::ops::RangeInclusive;
use std::sync::mpsc::{Receiver, SyncSender, TryRecvError};

use log::warn;

use super::Memory;

/// Memory-mapped byte stream port.
///
/// Either direction is optional: a port without input reads 0, and a port
/// without output discards writes.
///
/// # Examples
///
/// ```rust
/// use emu6502::{IoPort, Memory};
/// use std::sync::mpsc;
///
/// let (input_tx, input_rx) = mpsc::channel();
/// let (output_tx, output_rx) = mpsc::sync_channel(1);
/// let mut port = IoPort::new(0x8000)
///     .with_input(input_rx)
///     .with_output(output_tx);
///
/// input_tx.send(b'A').unwrap();
/// assert_eq!(port.read(0x8000), b'A');
///
/// // Nothing queued: underrun
/// assert_eq!(port.read(0x8000), 0);
/// assert_eq!(port.underruns(), 1);
///
/// port.write(0x8000, b'Z');
/// assert_eq!(output_rx.recv().unwrap(), b'Z');
/// ```
pub struct IoPort {
    address: u16,
    input: Option<Receiver<u8>>,
    output: Option<SyncSender<u8>>,
    underruns: Cell<u64>,
}

impl IoPort {
    pub fn new(address: u16) -> Self {
        Self {
            address,
            input: None,
            output: None,
            underruns: Cell::new(0),
        }
    }

    /// Attaches the queue the port reads input bytes from.
    pub fn with_input(mut self, input: Receiver<u8>) -> Self {
        self.input = Some(input);
        self
    }

    /// Attaches the consumer written bytes are handed to. A rendezvous channel
    /// (`sync_channel(0)`) makes every write wait for the consumer.
    pub fn with_output(mut self, output: SyncSender<u8>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    /// Number of reads that found no queued input.
    pub fn underruns(&self) -> u64 {
        self.underruns.get()
    }
}

impl Memory for IoPort {
    fn range(&self) -> RangeInclusive<u16> {
        self.address..=self.address
    }

    fn read(&self, _addr: u16) -> u8 {
        let Some(input) = &self.input else {
            return 0;
        };

        match input.try_recv() {
            Ok(byte) => byte,
            Err(TryRecvError::Empty) => {
                self.underruns.set(self.underruns.get() + 1);
                warn!("I/O read underrun at 0x{:04X}", self.address);
                0
            }
            Err(TryRecvError::Disconnected) => 0,
        }
    }

    fn write(&mut self, _addr: u16, value: u8) {
        if let Some(output) = &self.output {
            if output.send(value).is_err() {
                warn!(
                    "I/O output consumer at 0x{:04X} is gone, discarding output",
                    self.address
                );
                self.output = None;
            }
        }
    }
}
