// src/thermometer/family.rs

use core::time::Duration;

use super::scratchpad::Scratchpad;
use crate::common::{timing, Resolution, Temperature};

/// Supported 1-Wire thermometer families, keyed by ROM family code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Family {
    /// DS18S20 / DS1820: fixed 9-bit reading refined with the count registers.
    Ds18s20 = 0x10,
    Ds1822 = 0x22,
    /// DS18B20 and compatibles (MAX31820).
    Ds18b20 = 0x28,
    Ds1825 = 0x3B,
}

impl Family {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x10 => Some(Family::Ds18s20),
            0x22 => Some(Family::Ds1822),
            0x28 => Some(Family::Ds18b20),
            0x3B => Some(Family::Ds1825),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Family::Ds18s20 => "DS18S20",
            Family::Ds1822 => "DS1822",
            Family::Ds18b20 => "DS18B20",
            Family::Ds1825 => "DS1825",
        }
    }

    /// Whether the scratchpad has a writable resolution register.
    pub fn has_config_register(self) -> bool {
        !matches!(self, Family::Ds18s20)
    }

    /// Worst-case conversion time. Without a known resolution the 12-bit time applies.
    pub fn conversion_time(self, resolution: Option<Resolution>) -> Duration {
        match (self, resolution) {
            (Family::Ds18s20, _) | (_, None) => timing::CONVERSION_12_BIT,
            (_, Some(resolution)) => resolution.conversion_time(),
        }
    }

    /// Resolution the scratchpad was converted at.
    pub fn resolution(self, scratchpad: &Scratchpad) -> Resolution {
        if self.has_config_register() {
            Resolution::from_config_register(scratchpad.config_register())
        } else {
            Resolution::Bits9
        }
    }

    pub fn decode(self, scratchpad: &Scratchpad) -> Temperature {
        let raw = scratchpad.raw_temperature();
        match self {
            Family::Ds18s20 => decode_extended(raw, scratchpad.count_remain(), scratchpad.count_per_c()),
            _ => Temperature::from_sixteenths(raw & self.resolution(scratchpad).raw_mask()),
        }
    }
}

/// DS18S20 extended resolution:
/// `TEMP_READ - 0.25 + (COUNT_PER_C - COUNT_REMAIN) / COUNT_PER_C`,
/// where TEMP_READ is the reading with its 0.5 °C bit truncated.
fn decode_extended(raw: i16, count_remain: u8, count_per_c: u8) -> Temperature {
    let scale = Temperature::SCALE;
    if count_per_c == 0 {
        return Temperature::from_ten_thousandths(raw as i32 * scale / 2);
    }
    let whole = (raw >> 1) as i32 * scale;
    let per_c = count_per_c as i32;
    let fraction = (per_c - count_remain as i32) * scale / per_c;
    Temperature::from_ten_thousandths(whole - scale / 4 + fraction)
}
