//! Common data types

pub mod orientation;
pub mod pointer;
pub mod sample;

pub use orientation::*;
pub use pointer::*;
pub use sample::*;
