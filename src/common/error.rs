// src/common/error.rs

#[derive(Debug, thiserror::Error)]
pub enum OneWireError<E = ()>
where
    E: core::fmt::Debug, // Still need Debug for the generic Io error
{
    /// Underlying I/O error from the pin implementation.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// No device answered the reset pulse with a presence pulse.
    #[error("No presence pulse after bus reset")]
    NoPresence,

    /// The line did not return high after being released.
    #[error("Bus held low")]
    BusStuckLow,

    /// Temperature conversion did not complete in the allowed time.
    #[error("Operation timed out")]
    Timeout,

    /// Received CRC does not match calculated CRC.
    #[error("CRC mismatch: expected {expected:#04x}, calculated {calculated:#04x}")]
    CrcMismatch { expected: u8, calculated: u8 },

    /// Data read back from the device cannot be a real response (e.g. all zeros).
    #[error("Invalid response from device")]
    InvalidResponse,

    /// Family code of the device is not a supported thermometer.
    #[error("Unsupported device family: {0:#04x}")]
    UnsupportedFamily(u8),

    /// Buffer provided was too small.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },
}

impl<E: core::fmt::Debug> From<E> for OneWireError<E> {
    fn from(e: E) -> Self {
        OneWireError::Io(e)
    }
}

