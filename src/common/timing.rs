// src/common/timing.rs

use core::time::Duration;

// Standard-speed slot timing, nominal values recommended for bit-banged
// masters (Maxim application note 126, letters A-J).

// === Reset / Presence ===

/// Reset pulse the master holds the line low for (H).
pub const RESET_LOW: Duration = Duration::from_micros(480);
/// Wait after releasing the line before sampling for presence (I).
pub const PRESENCE_SAMPLE: Duration = Duration::from_micros(70);
/// Remainder of the reset window after the presence sample (J).
pub const RESET_RECOVERY: Duration = Duration::from_micros(410);

// === Write Slots ===

/// Low time for a write-1 slot (A).
pub const WRITE_ONE_LOW: Duration = Duration::from_micros(6);
/// Recovery after a write-1 slot (B).
pub const WRITE_ONE_RECOVERY: Duration = Duration::from_micros(64);
/// Low time for a write-0 slot (C).
pub const WRITE_ZERO_LOW: Duration = Duration::from_micros(60);
/// Recovery after a write-0 slot (D).
pub const WRITE_ZERO_RECOVERY: Duration = Duration::from_micros(10);

// === Read Slots ===

/// Low time that starts a read slot (A).
pub const READ_LOW: Duration = Duration::from_micros(6);
/// Wait after releasing before sampling the line (E).
pub const READ_SAMPLE: Duration = Duration::from_micros(9);
/// Remainder of the read slot after sampling (F).
pub const READ_RECOVERY: Duration = Duration::from_micros(55);

/// Full duration of one read slot.
pub const READ_SLOT: Duration = Duration::from_micros(6 + 9 + 55);

// === Line Release ===

/// Maximum time for the pull-up to bring an idle line high before a reset.
pub const LINE_RELEASE_MAX: Duration = Duration::from_micros(250);
/// Interval between samples while waiting for the line to go high.
pub const LINE_RELEASE_POLL: Duration = Duration::from_micros(5);

// === Temperature Conversion ===

/// Interval between read slots while polling for conversion completion.
pub const CONVERSION_POLL: Duration = Duration::from_millis(1);
/// Extra time allowed on top of the datasheet conversion time.
pub const CONVERSION_MARGIN: Duration = Duration::from_millis(50);

/// Maximum conversion time at 9-bit resolution (tCONV/8).
pub const CONVERSION_9_BIT: Duration = Duration::from_micros(93_750);
/// Maximum conversion time at 10-bit resolution (tCONV/4).
pub const CONVERSION_10_BIT: Duration = Duration::from_micros(187_500);
/// Maximum conversion time at 11-bit resolution (tCONV/2).
pub const CONVERSION_11_BIT: Duration = Duration::from_millis(375);
/// Maximum conversion time at 12-bit resolution, also the DS18S20 fixed time.
pub const CONVERSION_12_BIT: Duration = Duration::from_millis(750);
