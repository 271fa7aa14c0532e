//! 1-Wire command bytes.
//!
//! ROM commands follow every reset pulse and pick the device that answers the
//! function command sent after them.

use super::rom::RomCode;

/// ROM-level commands issued right after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomCommand {
    /// Read ROM (`0x33`) - the single device on the bus transmits its ROM code.
    ReadRom,
    /// Match ROM (`0x55`) - followed by 64 bits, addresses exactly one device.
    MatchRom(RomCode),
    /// Skip ROM (`0xCC`) - addresses every device on the bus.
    SkipRom,
}

impl RomCommand {
    pub const READ_ROM: u8 = 0x33;
    pub const MATCH_ROM: u8 = 0x55;
    pub const SKIP_ROM: u8 = 0xCC;

    #[inline]
    pub const fn opcode(&self) -> u8 {
        match self {
            RomCommand::ReadRom => Self::READ_ROM,
            RomCommand::MatchRom(_) => Self::MATCH_ROM,
            RomCommand::SkipRom => Self::SKIP_ROM,
        }
    }
}

/// Thermometer function commands, sent after a ROM command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FunctionCommand {
    /// Start a temperature conversion.
    ConvertT = 0x44,
    /// Write TH, TL and (if present) the configuration register.
    WriteScratchpad = 0x4E,
    /// Read the 9-byte scratchpad; the last byte is its CRC.
    ReadScratchpad = 0xBE,
    /// Parasite-powered devices pull the bus low during the following read slot.
    ReadPowerSupply = 0xB4,
}

impl FunctionCommand {
    #[inline]
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x44 => Some(FunctionCommand::ConvertT),
            0x4E => Some(FunctionCommand::WriteScratchpad),
            0xBE => Some(FunctionCommand::ReadScratchpad),
            0xB4 => Some(FunctionCommand::ReadPowerSupply),
            _ => None,
        }
    }
}
