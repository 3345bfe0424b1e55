//! I2C register bus on top of embedded-hal

use super::RegisterBus;
use crate::error::{Error, Result};
use embedded_hal::i2c::{Error as _, I2c};

/// Register bus over any blocking embedded-hal I2C implementation
///
/// Works with `linux-embedded-hal`'s `I2cdev` on a Raspberry Pi as well as
/// with MCU HALs.
pub struct I2cBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cBus<I> {
    /// Bind to the device at a 7-bit `address` (0x68 for an MPU6050 with AD0 low)
    pub fn open(i2c: I, address: u8) -> Self {
        log::info!("Opened I2C device at address {:#04x}", address);
        Self { i2c, address }
    }

    /// Device address this bus is bound to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the underlying I2C peripheral back
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I> RegisterBus for I2cBus<I>
where
    I: I2c + Send,
{
    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|e| Error::Bus(format!("write {:#04x}: {:?}", register, e.kind())))
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(|e| Error::Bus(format!("read {:#04x}: {:?}", register, e.kind())))?;
        Ok(buf[0])
    }

    fn read_registers(&mut self, register: u8, buffer: &mut [u8]) -> Result<()> {
        let len = buffer.len();
        self.i2c
            .write_read(self.address, &[register], buffer)
            .map_err(|e| {
                Error::Bus(format!(
                    "read {} bytes at {:#04x}: {:?}",
                    len,
                    register,
                    e.kind()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// Fake I2C peripheral with a 256-byte register file
    struct FakeI2c {
        registers: [u8; 256],
        pointer: u8,
        nack: bool,
    }

    impl FakeI2c {
        fn new() -> Self {
            Self {
                registers: [0; 256],
                pointer: 0,
                nack: false,
            }
        }
    }

    impl ErrorType for FakeI2c {
        type Error = ErrorKind;
    }

    impl I2c for FakeI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> std::result::Result<(), Self::Error> {
            if self.nack || address != 0x68 {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((&reg, data)) = bytes.split_first() {
                            self.pointer = reg;
                            for &b in data {
                                self.registers[self.pointer as usize] = b;
                                self.pointer = self.pointer.wrapping_add(1);
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for b in buf.iter_mut() {
                            *b = self.registers[self.pointer as usize];
                            self.pointer = self.pointer.wrapping_add(1);
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_then_read_back() {
        let mut bus = I2cBus::open(FakeI2c::new(), 0x68);
        bus.write_register(0x1A, 0x01).unwrap();
        assert_eq!(bus.read_register(0x1A).unwrap(), 0x01);
    }

    #[test]
    fn test_burst_read_is_sequential() {
        let mut fake = FakeI2c::new();
        fake.registers[0x3B] = 0x40;
        fake.registers[0x3C] = 0x00;
        let mut bus = I2cBus::open(fake, 0x68);

        let mut buf = [0u8; 2];
        bus.read_registers(0x3B, &mut buf).unwrap();
        assert_eq!(buf, [0x40, 0x00]);
    }

    #[test]
    fn test_nack_maps_to_bus_error() {
        let mut bus = I2cBus::open(FakeI2c::new(), 0x69);
        let err = bus.read_register(0x6B).unwrap_err();
        assert!(matches!(err, Error::Bus(_)));
        assert_eq!(bus.address(), 0x69);
    }
}
