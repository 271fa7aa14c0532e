// src/common/rom.rs

use super::crc::verify_crc8;
use super::error::OneWireError;
use core::convert::TryFrom;
use core::fmt;

/// 64-bit 1-Wire ROM code, stored in bus order (family code first, CRC last).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct RomCode([u8; 8]);

impl RomCode {
    /// Creates a new `RomCode` if the trailing byte is the CRC of the other seven.
    pub fn new(bytes: [u8; 8]) -> Result<Self, OneWireError<()>> {
        Self::checked(bytes)
    }

    /// Same validation as `new`, with the error typed for a bus transaction.
    pub(crate) fn checked<E: core::fmt::Debug>(bytes: [u8; 8]) -> Result<Self, OneWireError<E>> {
        if bytes == [0u8; 8] {
            // Every bit read as zero: the line was held low.
            return Err(OneWireError::InvalidResponse);
        }
        verify_crc8(&bytes)?;
        Ok(RomCode(bytes))
    }

    #[inline]
    pub const fn family_code(&self) -> u8 {
        self.0[0]
    }

    /// 48-bit serial number.
    #[inline]
    pub fn serial_number(&self) -> u64 {
        let mut serial = [0u8; 8];
        serial[..6].copy_from_slice(&self.0[1..7]);
        u64::from_le_bytes(serial)
    }

    #[inline]
    pub const fn crc(&self) -> u8 {
        self.0[7]
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl TryFrom<[u8; 8]> for RomCode {
    type Error = OneWireError<()>;

    fn try_from(value: [u8; 8]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RomCode> for [u8; 8] {
    fn from(value: RomCode) -> Self {
        value.0
    }
}

/// Formats as the Linux w1 device name, e.g. `28-04165330ff4c`.
impl fmt::Display for RomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}-", self.family_code())?;
        for byte in self.0[1..7].iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RomCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8:x}-{=u64:x}", self.family_code(), self.serial_number())
    }
}
