//! Display feature toggles
//!
//! Controls what content is displayed and whether data comes from the
//! live API. Changes take effect on the next cycle.

use super::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayOptions {
    pub show_weather: bool,
    pub show_forecast: bool,
    pub show_events: bool,
    pub show_scheduled: bool,
    pub show_weekday_indicator: bool,
    /// When false the outer loop substitutes canned data and no API call
    /// is planned
    pub use_live_weather: bool,
    pub use_live_forecast: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_weather: true,
            show_forecast: true,
            show_events: true,
            show_scheduled: true,
            show_weekday_indicator: true,
            use_live_weather: true,
            use_live_forecast: true,
        }
    }
}

impl DisplayOptions {
    /// Should the cycle plan a current-conditions fetch?
    pub fn should_fetch_weather(&self) -> bool {
        self.show_weather && self.use_live_weather
    }

    /// Should the cycle plan a forecast fetch?
    pub fn should_fetch_forecast(&self) -> bool {
        self.show_forecast && self.use_live_forecast
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.show_forecast && !self.show_weather {
            return Err(ConfigError::ForecastWithoutWeather);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(DisplayOptions::default().validate(), Ok(()));
    }

    #[test]
    fn test_forecast_requires_weather() {
        let opts = DisplayOptions {
            show_weather: false,
            ..Default::default()
        };
        assert_eq!(opts.validate(), Err(ConfigError::ForecastWithoutWeather));
    }

    #[test]
    fn test_fetch_gating() {
        let mut opts = DisplayOptions::default();
        assert!(opts.should_fetch_weather());

        opts.use_live_weather = false;
        assert!(!opts.should_fetch_weather());
        assert!(opts.should_fetch_forecast());

        opts.show_forecast = false;
        assert!(!opts.should_fetch_forecast());
    }
}
