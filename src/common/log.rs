// src/common/log.rs

// Logging facade: forwards to defmt when the `defmt` feature is enabled and
// expands to nothing otherwise. Format strings use defmt syntax.

#[cfg(feature = "defmt")]
pub use defmt;

#[cfg(feature = "defmt")]
mod backend {
    #[macro_export]
    macro_rules! __trace {
        ($($arg:tt)*) => {{
            use $crate::common::log::defmt;
            defmt::trace!($($arg)*);
        }};
    }

    #[macro_export]
    macro_rules! __debug {
        ($($arg:tt)*) => {{
            use $crate::common::log::defmt;
            defmt::debug!($($arg)*);
        }};
    }

    #[macro_export]
    macro_rules! __warn {
        ($($arg:tt)*) => {{
            use $crate::common::log::defmt;
            defmt::warn!($($arg)*);
        }};
    }
}

#[cfg(not(feature = "defmt"))]
mod backend {
    #[macro_export]
    macro_rules! __stub {
        ($($arg:tt)*) => {{
            let _ = ($($arg)*); // Do nothing
        }};
    }
}

#[cfg(feature = "defmt")]
pub use crate::{__debug as debug, __trace as trace, __warn as warn};

#[cfg(not(feature = "defmt"))]
pub use crate::{__stub as debug, __stub as trace, __stub as warn};
