//! Simulated MPU6050 for hardware-free runs
//!
//! [`SimulatedMpu6050`] is a [`RegisterBus`] that behaves like the real part
//! as far as this crate can tell: configuration registers read back what was
//! written, ACCEL_CONFIG selects the output scale, and the accelerometer data
//! registers hold a gravity vector for a configurable tilt.
//!
//! Each burst read of ACCEL_XOUT_H latches a fresh sample, built as
//!
//! ```text
//! raw = gravity(tilt + sway(t)) * lsb_per_g + bias + N(0, noise_stddev)
//! ```
//!
//! and clamped to i16. Tilt is expressed as how far gravity leans toward +X
//! and +Y, so a zero tilt reads `(0, 0, +1g)`.
//!
//! Enable with the `mock` feature (on by default):
//!
//! ```toml
//! [simulation]
//! tilt_x_deg = 0.0
//! tilt_y_deg = 0.0
//! sway_amplitude_deg = 15.0
//! sway_period_secs = 8.0
//! bias = [120, -80, 200]
//! noise_stddev = 40.0
//! seed = 0
//! # stuck_register = 0x1B
//! ```

mod noise;

pub use noise::NoiseGenerator;

use crate::bus::RegisterBus;
use crate::devices::mpu6050::registers::{AccelRange, Register, ACCEL_XOUT_H};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// WHO_AM_I register and its fixed content
pub const WHO_AM_I: u8 = 0x75;
const WHO_AM_I_VALUE: u8 = 0x68;

/// PWR_MGMT_1 after reset (SLEEP set)
const PWR_MGMT_1_RESET: u8 = 0x40;

/// Simulated device parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Static lean of gravity toward +X in degrees (default: 0)
    #[serde(default)]
    pub tilt_x_deg: f64,

    /// Static lean of gravity toward +Y in degrees (default: 0)
    #[serde(default)]
    pub tilt_y_deg: f64,

    /// Peak sway added to both tilts in degrees, 0 disables (default: 0)
    #[serde(default)]
    pub sway_amplitude_deg: f64,

    /// Sway period in seconds (default: 8)
    #[serde(default = "default_sway_period")]
    pub sway_period_secs: f64,

    /// Per-axis mounting bias in raw units (default: [120, -80, 200])
    #[serde(default = "default_bias")]
    pub bias: [i16; 3],

    /// Gaussian noise standard deviation in raw units (default: 40)
    #[serde(default = "default_noise_stddev")]
    pub noise_stddev: f64,

    /// RNG seed, 0 for entropy (default: 0)
    #[serde(default)]
    pub seed: u64,

    /// Register that ignores writes, for exercising bring-up failure
    #[serde(default)]
    pub stuck_register: Option<u8>,
}

fn default_sway_period() -> f64 {
    8.0
}
fn default_bias() -> [i16; 3] {
    [120, -80, 200]
}
fn default_noise_stddev() -> f64 {
    40.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tilt_x_deg: 0.0,
            tilt_y_deg: 0.0,
            sway_amplitude_deg: 0.0,
            sway_period_secs: default_sway_period(),
            bias: default_bias(),
            noise_stddev: default_noise_stddev(),
            seed: 0,
            stuck_register: None,
        }
    }
}

/// Register-level MPU6050 simulator
pub struct SimulatedMpu6050 {
    config: SimulationConfig,
    address: u8,
    registers: [u8; 256],
    noise: NoiseGenerator,
    start: Instant,
    samples_generated: u64,
}

impl SimulatedMpu6050 {
    /// Power-on state: asleep, ±2g, WHO_AM_I populated
    pub fn new(config: &SimulationConfig, address: u8) -> Self {
        let mut registers = [0u8; 256];
        registers[Register::PwrMgmt1.addr() as usize] = PWR_MGMT_1_RESET;
        registers[WHO_AM_I as usize] = WHO_AM_I_VALUE;

        if let Some(reg) = config.stuck_register {
            log::warn!("Simulated register {:#04x} will ignore writes", reg);
        }

        Self {
            config: config.clone(),
            address,
            registers,
            noise: NoiseGenerator::new(config.seed),
            start: Instant::now(),
            samples_generated: 0,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Range currently selected through ACCEL_CONFIG
    pub fn range(&self) -> AccelRange {
        AccelRange::from_config_value(self.registers[Register::AccelConfig.addr() as usize])
    }

    pub fn samples_generated(&self) -> u64 {
        self.samples_generated
    }

    fn is_asleep(&self) -> bool {
        self.registers[Register::PwrMgmt1.addr() as usize] & PWR_MGMT_1_RESET != 0
    }

    /// Unit gravity vector for the configured tilt plus sway at `t` seconds
    fn gravity(&self, t: f64) -> [f64; 3] {
        let sway = if self.config.sway_amplitude_deg != 0.0 && self.config.sway_period_secs > 0.0
        {
            let phase = std::f64::consts::TAU * t / self.config.sway_period_secs;
            self.config.sway_amplitude_deg * phase.sin()
        } else {
            0.0
        };

        let tx = (self.config.tilt_x_deg + sway).to_radians();
        let ty = (self.config.tilt_y_deg + sway).to_radians();
        [tx.sin(), tx.cos() * ty.sin(), tx.cos() * ty.cos()]
    }

    /// Synthesize a sample into the data registers
    fn latch_sample(&mut self) {
        // A sleeping part keeps its output registers frozen
        if self.is_asleep() {
            return;
        }

        let scale = f64::from(self.range().lsb_per_g());
        let g = self.gravity(self.start.elapsed().as_secs_f64());

        for axis in 0..3 {
            let value = g[axis] * scale
                + f64::from(self.config.bias[axis])
                + self.noise.gaussian(self.config.noise_stddev);
            let [hi, lo] = clamp_i16(value).to_be_bytes();
            let reg = ACCEL_XOUT_H as usize + axis * 2;
            self.registers[reg] = hi;
            self.registers[reg + 1] = lo;
        }
        self.samples_generated += 1;
    }
}

impl RegisterBus for SimulatedMpu6050 {
    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        if self.config.stuck_register == Some(register) || register == WHO_AM_I {
            log::trace!("Write to {:#04x} ignored", register);
            return Ok(());
        }
        self.registers[register as usize] = value;
        Ok(())
    }

    fn read_register(&mut self, register: u8) -> Result<u8> {
        Ok(self.registers[register as usize])
    }

    fn read_registers(&mut self, register: u8, buffer: &mut [u8]) -> Result<()> {
        let start = register as usize;
        let end = start + buffer.len();
        if end > self.registers.len() {
            return Err(Error::Bus(format!(
                "read of {} bytes at {:#04x} runs past the register file",
                buffer.len(),
                register
            )));
        }

        if register == ACCEL_XOUT_H {
            self.latch_sample();
        }
        buffer.copy_from_slice(&self.registers[start..end]);
        Ok(())
    }
}

/// Clamp f64 to i16 range
#[inline]
fn clamp_i16(value: f64) -> i16 {
    value.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}
