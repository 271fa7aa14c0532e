// src/thermometer/config.rs

use crate::common::{Resolution, RomCode};

/// How the reader waits for a temperature conversion to finish.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ConversionWait {
    /// Issue read slots until the device reports completion.
    #[default]
    Poll,
    /// Sleep for the worst-case conversion time. Parasite-powered devices
    /// cannot answer read slots while converting.
    Fixed,
    /// Ask the device with READ POWER SUPPLY, then poll or sleep accordingly.
    Auto,
}

/// Which device on the line is measured.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DeviceSelect {
    /// The line carries exactly one device; its ROM is read with READ ROM.
    #[default]
    Single,
    /// Address a known device with MATCH ROM.
    Rom(RomCode),
}

/// Runtime settings for a measurement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct MeasureConfig {
    /// Resolution to program before converting. `None` leaves the device as is.
    pub resolution: Option<Resolution>,
    pub conversion: ConversionWait,
    pub device: DeviceSelect,
}

impl MeasureConfig {
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_conversion(mut self, conversion: ConversionWait) -> Self {
        self.conversion = conversion;
        self
    }

    pub fn with_device(mut self, device: DeviceSelect) -> Self {
        self.device = device;
        self
    }
}
