// src/bus/mod.rs

mod io_helpers;

#[cfg(test)]
pub(crate) mod sim;

use crate::common::{
    error::OneWireError,
    hal_traits::{OneWirePin, OneWireTimer},
    log::trace,
    rom::RomCode,
    FunctionCommand, RomCommand,
};

/// A bit-banged 1-Wire master on a single open-drain line.
///
/// Holds no protocol state between transactions; every transaction starts
/// with a reset pulse.
#[derive(Debug)]
pub struct OneWireBus<P, D>
where
    P: OneWirePin,
    D: OneWireTimer,
{
    pin: P,
    delay: D,
}

impl<P, D> OneWireBus<P, D>
where
    P: OneWirePin,
    D: OneWireTimer,
{
    pub fn new(pin: P, delay: D) -> Self {
        OneWireBus { pin, delay }
    }

    /// Gives back the pin and delay provider.
    pub fn free(self) -> (P, D) {
        (self.pin, self.delay)
    }

    pub(crate) fn delay(&mut self) -> &mut D {
        &mut self.delay
    }

    // --- Public Blocking Methods ---

    /// Issues a reset pulse and reports whether any device answered with a presence pulse.
    ///
    /// Fails with `BusStuckLow` if the line does not come up before the reset.
    pub fn reset(&mut self) -> Result<bool, OneWireError<P::Error>> {
        self.wait_for_release()?;
        let present = self.reset_pulse()?;
        trace!("1-Wire reset, presence: {=bool}", present);
        Ok(present)
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), OneWireError<P::Error>> {
        for i in 0..8 {
            self.write_bit((byte >> i) & 0x01 == 0x01)?;
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, OneWireError<P::Error>> {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), OneWireError<P::Error>> {
        for byte in bytes {
            self.write_byte(*byte)?;
        }
        Ok(())
    }

    pub fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<(), OneWireError<P::Error>> {
        for byte in buffer.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(())
    }

    /// Resets the bus, requires a presence pulse and sends the ROM command.
    pub fn select(&mut self, target: RomCommand) -> Result<(), OneWireError<P::Error>> {
        if !self.reset()? {
            return Err(OneWireError::NoPresence);
        }
        self.write_byte(target.opcode())?;
        if let RomCommand::MatchRom(rom) = target {
            self.write_bytes(rom.as_bytes())?;
        }
        Ok(())
    }

    /// `select` followed by a function command.
    pub fn send_command(
        &mut self,
        target: RomCommand,
        command: FunctionCommand,
    ) -> Result<(), OneWireError<P::Error>> {
        self.select(target)?;
        self.write_byte(command.opcode())
    }

    /// Reads the ROM code of the only device on the bus.
    ///
    /// With more than one device the replies collide and the CRC check fails.
    pub fn read_rom(&mut self) -> Result<RomCode, OneWireError<P::Error>> {
        self.select(RomCommand::ReadRom)?;
        let mut bytes = [0u8; 8];
        self.read_bytes(&mut bytes)?;
        RomCode::checked(bytes)
    }
}
