//! Mock register bus for testing

use super::RegisterBus;
use crate::devices::mpu6050::registers::{ACCEL_XOUT_H, ACCEL_YOUT_H, ACCEL_ZOUT_H};
use crate::error::{Error, Result};
use crate::types::RawSample;
use parking_lot::{Mutex, MutexGuard};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Mock register bus for unit testing
///
/// Behaves like a plain register file: writes are stored and read back.
/// Accelerometer samples are queued with [`MockBus::push_sample`]; each read
/// of ACCEL_XOUT_H latches the next queued sample into the data registers
/// (the last one repeats once the queue is empty). Clones share state, so a
/// test can keep a handle after moving the bus into a sensor thread.
#[derive(Clone)]
pub struct MockBus {
    inner: Arc<Mutex<MockBusInner>>,
}

struct MockBusInner {
    registers: [u8; 256],
    samples: VecDeque<RawSample>,
    readback_overrides: HashMap<u8, u8>,
    writes: Vec<(u8, u8)>,
    pending_read_failures: usize,
    sample_reads: usize,
}

impl MockBus {
    /// Create a new mock bus with all registers zeroed
    pub fn new() -> Self {
        MockBus {
            inner: Arc::new(Mutex::new(MockBusInner {
                registers: [0; 256],
                samples: VecDeque::new(),
                readback_overrides: HashMap::new(),
                writes: Vec::new(),
                pending_read_failures: 0,
                sample_reads: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockBusInner> {
        self.inner.lock()
    }

    /// Queue a sample for a later poll
    pub fn push_sample(&self, sample: RawSample) {
        self.lock().samples.push_back(sample);
    }

    /// Queue the same sample `count` times
    pub fn push_samples(&self, sample: RawSample, count: usize) {
        let mut inner = self.lock();
        inner.samples.extend(std::iter::repeat(sample).take(count));
    }

    /// Make `register` always read back `value`, whatever was written
    pub fn override_readback(&self, register: u8, value: u8) {
        self.lock().readback_overrides.insert(register, value);
    }

    /// Fail the next `count` burst reads with a bus error
    pub fn fail_next_reads(&self, count: usize) {
        self.lock().pending_read_failures = count;
    }

    /// All register writes so far, in order
    pub fn get_written(&self) -> Vec<(u8, u8)> {
        self.lock().writes.clone()
    }

    /// Number of times ACCEL_XOUT_H was burst-read successfully
    pub fn sample_reads(&self) -> usize {
        self.lock().sample_reads
    }

    /// Current content of a register, ignoring read-back overrides
    pub fn peek(&self, register: u8) -> u8 {
        self.lock().registers[register as usize]
    }
}

impl MockBusInner {
    fn latch(&mut self, sample: RawSample) {
        for (reg, value) in [
            (ACCEL_XOUT_H, sample.x),
            (ACCEL_YOUT_H, sample.y),
            (ACCEL_ZOUT_H, sample.z),
        ] {
            let [hi, lo] = value.to_be_bytes();
            self.registers[reg as usize] = hi;
            self.registers[reg as usize + 1] = lo;
        }
    }
}

impl RegisterBus for MockBus {
    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        let mut inner = self.lock();
        inner.writes.push((register, value));
        inner.registers[register as usize] = value;
        Ok(())
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        let inner = self.lock();
        Ok(inner
            .readback_overrides
            .get(&register)
            .copied()
            .unwrap_or(inner.registers[register as usize]))
    }

    fn read_registers(&mut self, register: u8, buffer: &mut [u8]) -> Result<()> {
        let mut inner = self.lock();
        if inner.pending_read_failures > 0 {
            inner.pending_read_failures -= 1;
            return Err(Error::Bus(format!("injected read failure at {:#04x}", register)));
        }

        if register == ACCEL_XOUT_H {
            if let Some(sample) = inner.samples.pop_front() {
                inner.latch(sample);
            }
            inner.sample_reads += 1;
        }

        let start = register as usize;
        let end = start + buffer.len();
        if end > inner.registers.len() {
            return Err(Error::Bus(format!(
                "read of {} bytes at {:#04x} runs past the register file",
                buffer.len(),
                register
            )));
        }
        buffer.copy_from_slice(&inner.registers[start..end]);
        Ok(())
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}
