// src/thermometer/mod.rs

//! Temperature measurement on top of the bus layer: family decoding,
//! scratchpad handling and the convert/read transaction.

pub mod config;
pub mod family;
pub mod reader;
pub mod scratchpad;

pub use config::{ConversionWait, DeviceSelect, MeasureConfig};
pub use family::Family;
pub use reader::{MeasurementReader, Reading};
pub use scratchpad::Scratchpad;
