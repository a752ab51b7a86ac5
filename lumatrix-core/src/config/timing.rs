//! Cycle timing configuration
//!
//! All durations in seconds unless suffixed otherwise.

use super::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Full display cycle length
    pub cycle_s: u16,
    /// Forecast page share of the cycle
    pub forecast_s: u16,
    /// Event page share of the cycle
    pub event_s: u16,
    /// Shortest event page worth showing
    pub min_event_s: u16,
    /// Hold time for the degraded clock-only page
    pub clock_display_s: u16,
    /// Drop a weather snapshot older than this
    pub weather_max_age_s: u16,
    /// How often the forecast is refetched
    pub forecast_refresh_s: u16,
    /// Network retry interval while in extended failure mode
    pub recovery_retry_s: u16,
    /// Average cycle time below this means a crash loop
    pub fast_cycle_threshold_s: u16,
    /// Hour of day for the routine restart window
    pub daily_reset_hour: u8,
    /// Minutes past the hour the restart window stays open
    pub restart_grace_min: u8,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            cycle_s: 300,
            forecast_s: 60,
            event_s: 30,
            min_event_s: 10,
            clock_display_s: 300,
            weather_max_age_s: 900,
            forecast_refresh_s: 900,
            recovery_retry_s: 1800,
            fast_cycle_threshold_s: 10,
            daily_reset_hour: 3,
            restart_grace_min: 5,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_s < self.forecast_s + self.event_s {
            return Err(ConfigError::CycleTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(TimingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_cycle_must_cover_segments() {
        let cfg = TimingConfig {
            cycle_s: 60,
            forecast_s: 60,
            event_s: 30,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::CycleTooShort));
    }
}
