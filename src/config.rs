//! Compile-time settings of the monitor

use fugit::MillisDurationU32;

pub use crate::adt7410::BASE_ADDRESS;

/// Number of sensors polled each cycle. Matches the three addresses the driver accepts.
pub const SENSOR_COUNT: usize = 3;

/// Delay between two polling cycles
pub const SAMPLE_PERIOD: MillisDurationU32 = MillisDurationU32::millis(1000);

/// Written on its own line before every frame so a reader can synchronise
pub const FRAME_MARKER: &str = "tx";

pub const BAUD_RATE: u32 = 9600;

pub const I2C_SPEED_KHZ: u32 = 100;
