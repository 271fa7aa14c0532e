// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod crc;
pub mod error;
pub mod hal_traits;
pub mod log;
pub mod rom;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{FunctionCommand, RomCommand};

// From crc.rs
pub use crc::{calculate_crc8, verify_crc8};

// From error.rs
pub use error::OneWireError;

// From hal_traits.rs
pub use hal_traits::{OneWirePin, OneWireTimer}; // Core sync traits

// From rom.rs
pub use rom::RomCode;

// From types.rs
pub use types::{Resolution, Temperature};

// timing.rs constants stay under common::timing::*

// --- Feature-gated re-exports ---

// embedded-hal adapters (from hal_traits.rs)
#[cfg(feature = "impl-bitbang")]
pub use hal_traits::{HalDelay, HalPin};
