// src/lib.rs

#![cfg_attr(not(test), no_std)] // std only for unit tests

pub mod bus;
pub mod common;
pub mod measure;
pub mod thermometer;

// Re-export key types for convenience
pub use bus::OneWireBus;
pub use common::{OneWireError, OneWirePin, OneWireTimer, Resolution, RomCode, Temperature};
pub use measure::{measure, measure_with, MeasurementText, OUTPUT_LEN};
pub use thermometer::{ConversionWait, DeviceSelect, MeasureConfig, MeasurementReader, Reading};

#[cfg(feature = "impl-bitbang")]
pub use common::{HalDelay, HalPin};
