//! ADT7410 temperature monitor
//!
//! Driver for up to three ADT7410 sensors on one I2C bus and the line format the firmware prints
//! their readings in. The firmware itself lives in `main.rs` and needs the `firmware` feature.
#![cfg_attr(not(test), no_std)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::wildcard_imports)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod adt7410;
pub mod config;
pub mod report;
pub mod thermometer;

pub use adt7410::{Adt7410, Reading, SensorId};
pub use report::Frame;
pub use thermometer::{adt7410::Adt7410Array, Temperature};
