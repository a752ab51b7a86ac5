//! Weather data passed from the network collaborator to the core
//!
//! Temperatures are fixed-point with 0.1 degree resolution (value x10),
//! matching what the weather API delivers without dragging floats onto the
//! device.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hours of forecast the API delivers
pub const MAX_FORECAST_HOURS: usize = 12;

/// Maximum length of the provider's condition text
pub const MAX_CONDITION_LEN: usize = 24;

/// Above this temperature the in-sun apparent temperature is shown,
/// below it the shade value reads truer
pub const FEELS_LIKE_THRESHOLD_C: i16 = 15;

/// One reading of current conditions
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherSnapshot {
    /// Provider icon code
    pub icon: u8,
    pub temperature_x10: i16,
    pub feels_like_x10: i16,
    pub feels_shade_x10: i16,
    pub humidity_pct: u8,
    pub uv_index: u8,
    pub is_daytime: bool,
    pub has_precipitation: bool,
    /// Provider condition text, for diagnostics only
    pub condition: String<MAX_CONDITION_LEN>,
}

impl WeatherSnapshot {
    pub fn temperature_c(&self) -> i16 {
        self.temperature_x10 / 10
    }

    /// Apparent temperature in whole degrees: in-sun value when warm,
    /// shade value when cold
    pub fn apparent_c(&self) -> i16 {
        if self.temperature_c() >= FEELS_LIKE_THRESHOLD_C {
            self.feels_like_x10 / 10
        } else {
            self.feels_shade_x10 / 10
        }
    }
}

/// One forecast hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForecastHour {
    /// Hour of day this entry covers (0-23)
    pub hour: u8,
    pub temperature_x10: i16,
    pub icon: u8,
    pub has_precipitation: bool,
}

impl ForecastHour {
    pub fn temperature_c(&self) -> i16 {
        self.temperature_x10 / 10
    }
}

/// Hourly forecast, soonest first
pub type Forecast = Vec<ForecastHour, MAX_FORECAST_HOURS>;

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temp_x10: i16) -> WeatherSnapshot {
        WeatherSnapshot {
            icon: 1,
            temperature_x10: temp_x10,
            feels_like_x10: temp_x10 - 16,
            feels_shade_x10: temp_x10 - 26,
            humidity_pct: 90,
            uv_index: 7,
            is_daytime: true,
            has_precipitation: false,
            condition: crate::clip_str("Sunny"),
        }
    }

    #[test]
    fn test_whole_degree_truncation() {
        assert_eq!(snapshot(-136).temperature_c(), -13);
        assert_eq!(snapshot(247).temperature_c(), 24);
    }

    #[test]
    fn test_apparent_uses_shade_when_cold() {
        // -12.0 C is below the threshold, shade value applies
        let cold = snapshot(-120);
        assert_eq!(cold.apparent_c(), cold.feels_shade_x10 / 10);

        // 24.7 C is above, the in-sun value applies
        let warm = snapshot(247);
        assert_eq!(warm.apparent_c(), warm.feels_like_x10 / 10);
    }
}
