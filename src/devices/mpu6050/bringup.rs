//! One-time register bring-up with read-back verification

use super::registers::{bringup_sequence, AccelRange, RegisterWrite};
use crate::bus::RegisterBus;
use crate::error::{Error, Result};

/// Write the bring-up sequence, verifying every register by reading it back
///
/// Stops at the first mismatch and returns [`Error::Configuration`]; no
/// further register is written after a failed step. A mismatch means a
/// hardware or wiring fault, so it is never retried. Bus errors are
/// propagated the same way.
pub fn initialize<B: RegisterBus + ?Sized>(bus: &mut B, range: AccelRange) -> Result<()> {
    log::info!("Initializing MPU6050 (accelerometer range {:?})...", range);

    for step in bringup_sequence(range) {
        write_and_verify(bus, &step)?;
    }

    log::info!("MPU6050 configuration complete");
    Ok(())
}

fn write_and_verify<B: RegisterBus + ?Sized>(bus: &mut B, step: &RegisterWrite) -> Result<()> {
    let register = step.register.addr();
    log::info!("{}", step.description);

    bus.write_register(register, step.value)?;
    let actual = bus.read_register(register)?;

    if actual != step.value {
        log::error!(
            "{:?} ({:#04x}): wrote {:08b}, read back {:08b}",
            step.register,
            register,
            step.value,
            actual
        );
        return Err(Error::Configuration {
            register,
            expected: step.value,
            actual,
        });
    }

    log::debug!(
        "{:?} ({:#04x}) verified: {:08b}",
        step.register,
        register,
        actual
    );
    Ok(())
}
