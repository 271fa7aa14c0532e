// src/measure.rs

//! Buffer-oriented entry point: one measurement, written as NUL-terminated
//! text into a caller-owned 20-byte buffer.

use arrayvec::ArrayString;
use core::fmt::{self, Write};

use crate::bus::OneWireBus;
use crate::common::{
    error::OneWireError,
    hal_traits::{OneWirePin, OneWireTimer},
    log::warn,
};
use crate::thermometer::{MeasureConfig, MeasurementReader, Reading};

/// Size of the caller's output buffer, terminator included.
pub const OUTPUT_LEN: usize = 20;
/// Longest text that fits before the terminator.
pub const MAX_TEXT_LEN: usize = OUTPUT_LEN - 1;

/// Measurement text, bounded so it always fits the output buffer.
pub type MeasurementText = ArrayString<MAX_TEXT_LEN>;

/// Measures the single device on `pin` with the default configuration.
///
/// On success the buffer holds the reading (e.g. `T;25.06`); on failure it
/// holds the sentinel from [`error_sentinel`]. Either way it is NUL-terminated
/// and zero-filled after the text.
pub fn measure<P, D>(
    pin: &mut P,
    delay: &mut D,
    output: &mut [u8; OUTPUT_LEN],
) -> Result<Reading, OneWireError<P::Error>>
where
    P: OneWirePin,
    D: OneWireTimer,
{
    measure_with(pin, delay, &MeasureConfig::default(), output)
}

/// As [`measure`], with explicit settings.
pub fn measure_with<P, D>(
    pin: &mut P,
    delay: &mut D,
    config: &MeasureConfig,
    output: &mut [u8; OUTPUT_LEN],
) -> Result<Reading, OneWireError<P::Error>>
where
    P: OneWirePin,
    D: OneWireTimer,
{
    let mut reader = MeasurementReader::new(OneWireBus::new(pin, delay), *config);
    let result = reader.measure().and_then(|reading| {
        let text = format_reading(&reading)?;
        write_output(&text, output);
        Ok(reading)
    });

    if let Err(e) = &result {
        let sentinel = error_sentinel(e);
        warn!("measurement failed: {=str}", sentinel);
        write_output(sentinel, output);
    }
    result
}

/// Formats a reading as measurement text.
pub fn format_reading<E: fmt::Debug>(reading: &Reading) -> Result<MeasurementText, OneWireError<E>> {
    let mut text = MeasurementText::new();
    if write!(text, "{}", reading).is_err() {
        let mut counter = LenCounter(0);
        // Counting never fails
        let _ = write!(counter, "{}", reading);
        return Err(OneWireError::BufferOverflow { needed: counter.0 + 1, got: OUTPUT_LEN });
    }
    Ok(text)
}

/// Fixed text written to the buffer when a measurement fails.
pub fn error_sentinel<E: fmt::Debug>(error: &OneWireError<E>) -> &'static str {
    match error {
        OneWireError::NoPresence => "ERR;NO_DEVICE",
        OneWireError::BusStuckLow | OneWireError::InvalidResponse => "ERR;BUS_LOW",
        OneWireError::Timeout => "ERR;TIMEOUT",
        OneWireError::CrcMismatch { .. } => "ERR;CRC",
        OneWireError::UnsupportedFamily(_) => "ERR;FAMILY",
        OneWireError::Io(_) => "ERR;IO",
        OneWireError::BufferOverflow { .. } => "ERR;OVERFLOW",
    }
}

/// Copies `text` into `output`, truncating to fit, and zero-fills the rest.
fn write_output(text: &str, output: &mut [u8; OUTPUT_LEN]) {
    let len = text.len().min(MAX_TEXT_LEN);
    output.fill(0);
    output[..len].copy_from_slice(&text.as_bytes()[..len]);
}

struct LenCounter(usize);

impl fmt::Write for LenCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}
