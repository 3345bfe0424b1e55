//! Device drivers

pub mod mpu6050;

#[cfg(feature = "mock")]
pub mod sim;
