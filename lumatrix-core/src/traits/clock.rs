//! Real-time clock trait

use crate::calendar::DeviceTime;

/// Errors from reading the RTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Hardware not responding
    Unavailable,
    /// Read returned garbage (battery loss, bus glitch)
    ReadFailed,
}

/// Wall-clock source
///
/// Repeated failures here are tracked as their own subsystem; a display
/// without a trustworthy clock cannot do its job and ends in a hard reset.
pub trait Clock {
    fn now(&mut self) -> Result<DeviceTime, ClockError>;
}
