//! MPU6050 register map and bring-up table
//!
//! Only the registers this driver touches are listed. Values follow the
//! MPU-6000/6050 Register Map rev 4.2.

use serde::{Deserialize, Serialize};

/// Default I2C address (AD0 pulled low)
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// Configuration registers written during bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Sample-rate divider
    SmplrtDiv = 0x19,
    /// Digital low-pass filter / external sync
    Config = 0x1A,
    /// Gyroscope full-scale select
    GyroConfig = 0x1B,
    /// Accelerometer full-scale select
    AccelConfig = 0x1C,
    /// Interrupt enable
    IntEnable = 0x38,
    /// Power management 1 (sleep, clock source)
    PwrMgmt1 = 0x6B,
    /// Power management 2 (per-axis standby)
    PwrMgmt2 = 0x6C,
}

impl Register {
    /// Register address on the bus
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// High byte of the X-axis accelerometer output (big-endian pair)
pub const ACCEL_XOUT_H: u8 = 0x3B;
/// High byte of the Y-axis accelerometer output
pub const ACCEL_YOUT_H: u8 = 0x3D;
/// High byte of the Z-axis accelerometer output
pub const ACCEL_ZOUT_H: u8 = 0x3F;

/// Clear SLEEP, internal 8 MHz oscillator
pub const PWR_MGMT_1_WAKE: u8 = 0b0000_0000;
/// Divider 0: accel 1 kHz, gyro 8 kHz
pub const SMPLRT_DIV_NONE: u8 = 0b0000_0000;
/// DLPF_CFG 1: accel 184 Hz / 2.0 ms, gyro 188 Hz / 1.9 ms
pub const CONFIG_DLPF_184HZ: u8 = 0b0000_0001;
/// FS_SEL 3: ±2000 °/s
pub const GYRO_FS_2000DPS: u8 = 0b0001_1000;
/// All interrupts disabled
pub const INT_ENABLE_NONE: u8 = 0b0000_0000;
/// No axis in standby
pub const PWR_MGMT_2_NO_STANDBY: u8 = 0b0000_0000;

/// Accelerometer full-scale range (AFS_SEL)
///
/// The range decides both the ACCEL_CONFIG value written during bring-up and
/// the raw-units-per-g divisor used everywhere else, so the two never drift
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccelRange {
    /// ±2g, 16384 LSB/g
    #[default]
    #[serde(alias = "2g")]
    G2,
    /// ±4g, 8192 LSB/g
    #[serde(alias = "4g")]
    G4,
    /// ±8g, 4096 LSB/g
    #[serde(alias = "8g")]
    G8,
    /// ±16g, 2048 LSB/g
    #[serde(alias = "16g")]
    G16,
}

impl AccelRange {
    /// ACCEL_CONFIG register value (AFS_SEL in bits 4:3)
    pub const fn config_value(self) -> u8 {
        match self {
            AccelRange::G2 => 0b0000_0000,
            AccelRange::G4 => 0b0000_1000,
            AccelRange::G8 => 0b0001_0000,
            AccelRange::G16 => 0b0001_1000,
        }
    }

    /// Decode AFS_SEL from an ACCEL_CONFIG value
    pub const fn from_config_value(value: u8) -> Self {
        match (value >> 3) & 0b11 {
            0 => AccelRange::G2,
            1 => AccelRange::G4,
            2 => AccelRange::G8,
            _ => AccelRange::G16,
        }
    }

    /// Raw accelerometer units per g
    pub const fn lsb_per_g(self) -> i16 {
        match self {
            AccelRange::G2 => 16384,
            AccelRange::G4 => 8192,
            AccelRange::G8 => 4096,
            AccelRange::G16 => 2048,
        }
    }
}

/// One step of the bring-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    /// Target register
    pub register: Register,
    /// Value to write and expect on read-back
    pub value: u8,
    /// Log line for this step
    pub description: &'static str,
}

/// Ordered bring-up writes for the given accelerometer range
///
/// With [`AccelRange::G2`] this is exactly:
///
/// | Register | Value |
/// |----------|-------|
/// | 0x6B | 0x00 |
/// | 0x19 | 0x00 |
/// | 0x1A | 0x01 |
/// | 0x1B | 0x18 |
/// | 0x1C | 0x00 |
/// | 0x38 | 0x00 |
/// | 0x6C | 0x00 |
pub fn bringup_sequence(range: AccelRange) -> [RegisterWrite; 7] {
    [
        RegisterWrite {
            register: Register::PwrMgmt1,
            value: PWR_MGMT_1_WAKE,
            description: "Waking up device",
        },
        RegisterWrite {
            register: Register::SmplrtDiv,
            value: SMPLRT_DIV_NONE,
            description: "Configuring sample rate",
        },
        RegisterWrite {
            register: Register::Config,
            value: CONFIG_DLPF_184HZ,
            description: "Setting digital low pass filter",
        },
        RegisterWrite {
            register: Register::GyroConfig,
            value: GYRO_FS_2000DPS,
            description: "Configuring gyroscope",
        },
        RegisterWrite {
            register: Register::AccelConfig,
            value: range.config_value(),
            description: "Configuring accelerometer",
        },
        RegisterWrite {
            register: Register::IntEnable,
            value: INT_ENABLE_NONE,
            description: "Configuring interrupts",
        },
        RegisterWrite {
            register: Register::PwrMgmt2,
            value: PWR_MGMT_2_NO_STANDBY,
            description: "Configuring low power operations",
        },
    ]
}
