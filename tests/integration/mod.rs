//! Integration tests for kona-pointer
//!
//! Drive the public API end to end against [`MockBus`](kona_pointer::MockBus)
//! and, with the `mock` feature, the simulated MPU6050.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration -- --nocapture
//! ```

mod bringup;
mod control_loop;
mod harness;
#[cfg(feature = "mock")]
mod simulation;
