//! MPU6050 accelerometer driver
//!
//! Only the accelerometer half of the part is used. The gyroscope is still
//! configured during bring-up so the device ends up in a fully known state,
//! but its output registers are never read.
//!
//! # Bring-up
//!
//! Seven registers are written in a fixed order and each is read back before
//! moving on (see [`registers::bringup_sequence`]). The first mismatch aborts
//! with [`Error::Configuration`](crate::Error::Configuration).
//!
//! # Sampling
//!
//! Each axis is a big-endian signed 16-bit pair starting at 0x3B/0x3D/0x3F.
//! The three pairs are read with three separate 2-byte bursts.

pub mod bringup;
pub mod calibration;
pub mod registers;

pub use bringup::initialize;
pub use calibration::CalibrationEngine;
pub use registers::{AccelRange, DEFAULT_ADDRESS};

use crate::bus::RegisterBus;
use crate::error::Result;
use crate::types::{CalibrationOffset, RawSample};
use registers::{ACCEL_XOUT_H, ACCEL_YOUT_H, ACCEL_ZOUT_H};

/// Read one raw accelerometer sample
pub fn read_sample<B: RegisterBus + ?Sized>(bus: &mut B) -> Result<RawSample> {
    Ok(RawSample::new(
        read_axis(bus, ACCEL_XOUT_H)?,
        read_axis(bus, ACCEL_YOUT_H)?,
        read_axis(bus, ACCEL_ZOUT_H)?,
    ))
}

fn read_axis<B: RegisterBus + ?Sized>(bus: &mut B, high_register: u8) -> Result<i16> {
    let mut buf = [0u8; 2];
    bus.read_registers(high_register, &mut buf)?;
    Ok(RawSample::axis_from_be(buf))
}

/// MPU6050 on a register bus
pub struct Mpu6050<B> {
    bus: B,
    range: AccelRange,
}

impl<B: RegisterBus> Mpu6050<B> {
    pub fn new(bus: B, range: AccelRange) -> Self {
        Self { bus, range }
    }

    /// Run the bring-up sequence
    pub fn initialize(&mut self) -> Result<()> {
        initialize(&mut self.bus, self.range)
    }

    /// Read one raw sample
    pub fn read_sample(&mut self) -> Result<RawSample> {
        read_sample(&mut self.bus)
    }

    /// Run a blocking calibration pass
    pub fn calibrate(&mut self, engine: &CalibrationEngine) -> Result<CalibrationOffset> {
        engine.run(&mut self.bus)
    }

    /// Configured accelerometer range
    pub fn range(&self) -> AccelRange {
        self.range
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }
}
