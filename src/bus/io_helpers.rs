// src/bus/io_helpers.rs

use super::OneWireBus;
use crate::common::{
    error::OneWireError,
    hal_traits::{OneWirePin, OneWireTimer},
    timing,
};
use core::time::Duration;
use nb::Result as NbResult;

#[inline]
fn micros(duration: Duration) -> u32 {
    duration.as_micros() as u32
}

// Slot-level helpers. Each slot runs inside a critical section; the line is
// always released before the section ends.
impl<P, D> OneWireBus<P, D>
where
    P: OneWirePin,
    D: OneWireTimer,
{
    /// Executes a non-blocking poll (`f`) repeatedly until it stops returning
    /// `WouldBlock`, returning the final result or a timeout error.
    ///
    /// Elapsed time is counted from the poll interval, so the wait is bounded
    /// even without a clock.
    pub(crate) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        poll_interval: Duration,
        mut f: FN,
    ) -> Result<T, OneWireError<P::Error>>
    where
        FN: FnMut(&mut Self) -> NbResult<T, OneWireError<P::Error>>,
    {
        let mut elapsed = Duration::ZERO;

        loop {
            match f(self) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if elapsed >= timeout {
                        return Err(OneWireError::Timeout);
                    }
                    self.delay.delay_us(micros(poll_interval));
                    elapsed += poll_interval;
                }
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }
    }

    /// Releases the line and waits for the pull-up to bring it high.
    pub(super) fn wait_for_release(&mut self) -> Result<(), OneWireError<P::Error>> {
        self.pin.release()?;
        self.execute_blocking_io_with_timeout(
            timing::LINE_RELEASE_MAX,
            timing::LINE_RELEASE_POLL,
            |bus| match bus.pin.is_high() {
                Ok(true) => Ok(()),
                Ok(false) => Err(nb::Error::WouldBlock),
                Err(e) => Err(nb::Error::Other(OneWireError::Io(e))),
            },
        )
        .map_err(|e| match e {
            OneWireError::Timeout => OneWireError::BusStuckLow,
            e => e,
        })
    }

    /// Reset pulse and presence sample. Returns `true` if a device pulled the line low.
    pub(super) fn reset_pulse(&mut self) -> Result<bool, OneWireError<P::Error>> {
        // Stretching the reset low time is harmless, so only the presence
        // window needs the critical section.
        self.pin.drive_low()?;
        self.delay.delay_us(micros(timing::RESET_LOW));

        let presence = critical_section::with(|_| -> Result<bool, P::Error> {
            self.pin.release()?;
            self.delay.delay_us(micros(timing::PRESENCE_SAMPLE));
            Ok(!self.pin.is_high()?)
        })?;

        self.delay.delay_us(micros(timing::RESET_RECOVERY));
        Ok(presence)
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<(), OneWireError<P::Error>> {
        let (low, recovery) = if bit {
            (timing::WRITE_ONE_LOW, timing::WRITE_ONE_RECOVERY)
        } else {
            (timing::WRITE_ZERO_LOW, timing::WRITE_ZERO_RECOVERY)
        };

        critical_section::with(|_| -> Result<(), P::Error> {
            self.pin.drive_low()?;
            self.delay.delay_us(micros(low));
            self.pin.release()
        })?;

        self.delay.delay_us(micros(recovery));
        Ok(())
    }

    pub fn read_bit(&mut self) -> Result<bool, OneWireError<P::Error>> {
        let bit = critical_section::with(|_| -> Result<bool, P::Error> {
            self.pin.drive_low()?;
            self.delay.delay_us(micros(timing::READ_LOW));
            self.pin.release()?;
            self.delay.delay_us(micros(timing::READ_SAMPLE));
            self.pin.is_high()
        })?;

        self.delay.delay_us(micros(timing::READ_RECOVERY));
        Ok(bit)
    }
}
