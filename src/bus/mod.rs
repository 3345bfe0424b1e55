//! Register bus abstraction for device communication
//!
//! The accelerometer is driven entirely through byte-wide registers. The
//! transport underneath (Linux i2c-dev, an MCU peripheral, a simulator) is an
//! external collaborator; everything in this crate talks to it through
//! [`RegisterBus`].

use crate::error::Result;

mod i2c;
mod mock;

pub use i2c::I2cBus;
pub use mock::MockBus;

/// Byte-addressable register bus bound to a single device address
///
/// "Opening" a device is the constructor of each implementation, so a
/// `RegisterBus` value always refers to one device.
pub trait RegisterBus: Send {
    /// Write one byte to a register
    fn write_register(&mut self, register: u8, value: u8) -> Result<()>;

    /// Read one byte from a register
    fn read_register(&mut self, register: u8) -> Result<u8>;

    /// Burst-read `buffer.len()` bytes starting at `register`
    fn read_registers(&mut self, register: u8, buffer: &mut [u8]) -> Result<()>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for Box<B> {
    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        (**self).write_register(register, value)
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        (**self).read_register(register)
    }

    fn read_registers(&mut self, register: u8, buffer: &mut [u8]) -> Result<()> {
        (**self).read_registers(register, buffer)
    }
}
