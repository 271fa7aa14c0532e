// src/thermometer/reader.rs

use core::fmt;

use super::{
    config::{ConversionWait, DeviceSelect, MeasureConfig},
    family::Family,
    scratchpad::Scratchpad,
};
use crate::bus::OneWireBus;
use crate::common::{
    error::OneWireError,
    hal_traits::{OneWirePin, OneWireTimer},
    log::{debug, warn},
    timing, FunctionCommand, Resolution, RomCode, RomCommand, Temperature,
};

/// One decoded measurement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Reading {
    pub rom: RomCode,
    pub family: Family,
    pub resolution: Resolution,
    pub temperature: Temperature,
}

/// Formats as the measurement line, e.g. `T;25.06`.
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T;{}", self.temperature)
    }
}

/// Runs the full measurement transaction against one thermometer.
#[derive(Debug)]
pub struct MeasurementReader<P, D>
where
    P: OneWirePin,
    D: OneWireTimer,
{
    bus: OneWireBus<P, D>,
    config: MeasureConfig,
}

impl<P, D> MeasurementReader<P, D>
where
    P: OneWirePin,
    D: OneWireTimer,
{
    pub fn new(bus: OneWireBus<P, D>, config: MeasureConfig) -> Self {
        MeasurementReader { bus, config }
    }

    pub fn free(self) -> OneWireBus<P, D> {
        self.bus
    }

    /// Identify, optionally reconfigure, convert, read back and decode.
    pub fn measure(&mut self) -> Result<Reading, OneWireError<P::Error>> {
        let (rom, target) = self.identify()?;
        let family = Family::from_code(rom.family_code())
            .ok_or(OneWireError::UnsupportedFamily(rom.family_code()))?;
        debug!("measuring {=str} {}", family.name(), rom);

        let mut expected_resolution = None;
        if let Some(resolution) = self.config.resolution {
            if family.has_config_register() {
                self.apply_resolution(target, resolution)?;
                expected_resolution = Some(resolution);
            }
        }

        let wait = self.resolve_wait(target)?;
        self.bus.send_command(target, FunctionCommand::ConvertT)?;
        self.wait_for_conversion(wait, family.conversion_time(expected_resolution))?;

        let scratchpad = self.read_scratchpad(target)?;
        Ok(Reading {
            rom,
            family,
            resolution: family.resolution(&scratchpad),
            temperature: family.decode(&scratchpad),
        })
    }

    /// Reads the scratchpad of the selected device and checks its CRC.
    pub fn read_scratchpad(&mut self, target: RomCommand) -> Result<Scratchpad, OneWireError<P::Error>> {
        self.bus.send_command(target, FunctionCommand::ReadScratchpad)?;
        let mut bytes = [0u8; Scratchpad::LEN];
        self.bus.read_bytes(&mut bytes)?;
        Scratchpad::parse(bytes)
    }

    /// Whether the selected device runs from parasite power.
    pub fn is_parasite_powered(&mut self, target: RomCommand) -> Result<bool, OneWireError<P::Error>> {
        self.bus.send_command(target, FunctionCommand::ReadPowerSupply)?;
        Ok(!self.bus.read_bit()?)
    }

    // --- Transaction Steps (Private) ---

    fn identify(&mut self) -> Result<(RomCode, RomCommand), OneWireError<P::Error>> {
        match self.config.device {
            DeviceSelect::Single => {
                let rom = self.bus.read_rom()?;
                Ok((rom, RomCommand::SkipRom))
            }
            DeviceSelect::Rom(rom) => Ok((rom, RomCommand::MatchRom(rom))),
        }
    }

    fn apply_resolution(
        &mut self,
        target: RomCommand,
        resolution: Resolution,
    ) -> Result<(), OneWireError<P::Error>> {
        let scratchpad = self.read_scratchpad(target)?;
        if Resolution::from_config_register(scratchpad.config_register()) == resolution {
            return Ok(());
        }
        debug!("setting resolution to {=u8} bits", resolution.bits());
        self.bus.send_command(target, FunctionCommand::WriteScratchpad)?;
        self.bus.write_bytes(&scratchpad.with_resolution(resolution))
    }

    fn resolve_wait(&mut self, target: RomCommand) -> Result<ConversionWait, OneWireError<P::Error>> {
        match self.config.conversion {
            ConversionWait::Auto => {
                if self.is_parasite_powered(target)? {
                    warn!("parasite-powered device, waiting the full conversion time");
                    Ok(ConversionWait::Fixed)
                } else {
                    Ok(ConversionWait::Poll)
                }
            }
            wait => Ok(wait),
        }
    }

    fn wait_for_conversion(
        &mut self,
        wait: ConversionWait,
        conversion_time: core::time::Duration,
    ) -> Result<(), OneWireError<P::Error>> {
        match wait {
            ConversionWait::Fixed => {
                self.bus.delay().delay_us(conversion_time.as_micros() as u32);
                Ok(())
            }
            _ => self.bus.execute_blocking_io_with_timeout(
                conversion_time + timing::CONVERSION_MARGIN,
                timing::CONVERSION_POLL,
                |bus| match bus.read_bit() {
                    Ok(true) => Ok(()),
                    Ok(false) => Err(nb::Error::WouldBlock),
                    Err(e) => Err(nb::Error::Other(e)),
                },
            ),
        }
    }
}
