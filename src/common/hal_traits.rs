// src/common/hal_traits.rs

use core::fmt::Debug;

/// Abstraction for the delays required by 1-Wire slot timing.
///
/// Note: This could potentially be replaced by directly requiring
/// `embedded_hal::delay::DelayNs`; see `HalDelay` for that adapter.
pub trait OneWireTimer {
    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Abstraction for one open-drain GPIO line carrying the 1-Wire signal.
///
/// The line is expected to have a pull-up; `release` lets it float high and
/// gives devices the chance to pull it low.
pub trait OneWirePin {
    /// Associated error type for pin access errors.
    type Error: Debug;

    /// Actively pulls the line low.
    fn drive_low(&mut self) -> Result<(), Self::Error>;

    /// Stops driving the line so the pull-up (or a device) decides its level.
    fn release(&mut self) -> Result<(), Self::Error>;

    /// Samples the current line level.
    fn is_high(&mut self) -> Result<bool, Self::Error>;
}

impl<T: OneWireTimer + ?Sized> OneWireTimer for &mut T {
    #[inline]
    fn delay_us(&mut self, us: u32) {
        T::delay_us(self, us)
    }

    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        T::delay_ms(self, ms)
    }
}

impl<T: OneWirePin + ?Sized> OneWirePin for &mut T {
    type Error = T::Error;

    #[inline]
    fn drive_low(&mut self) -> Result<(), Self::Error> {
        T::drive_low(self)
    }

    #[inline]
    fn release(&mut self) -> Result<(), Self::Error> {
        T::release(self)
    }

    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        T::is_high(self)
    }
}

/// Adapts an embedded-hal 1.0 open-drain pin (`InputPin + OutputPin`).
///
/// `set_high` on an open-drain output releases the line, which is exactly
/// what `OneWirePin::release` needs.
#[cfg(feature = "impl-bitbang")]
#[derive(Debug)]
pub struct HalPin<P>(pub P);

#[cfg(feature = "impl-bitbang")]
impl<P> HalPin<P> {
    pub fn new(pin: P) -> Self {
        HalPin(pin)
    }

    pub fn free(self) -> P {
        self.0
    }
}

#[cfg(feature = "impl-bitbang")]
impl<P> OneWirePin for HalPin<P>
where
    P: embedded_hal::digital::InputPin + embedded_hal::digital::OutputPin,
{
    type Error = P::Error;

    fn drive_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }
}

/// Adapts an embedded-hal 1.0 `DelayNs` provider.
#[cfg(feature = "impl-bitbang")]
#[derive(Debug)]
pub struct HalDelay<D>(pub D);

#[cfg(feature = "impl-bitbang")]
impl<D: embedded_hal::delay::DelayNs> OneWireTimer for HalDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms)
    }
}
