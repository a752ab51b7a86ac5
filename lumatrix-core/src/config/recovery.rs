//! Recovery thresholds
//!
//! Named thresholds for the escalating recovery ladder. The state tracker
//! only classifies against these; acting on the classification is the
//! scheduler's job.

use super::ConfigError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Recovery threshold configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecoveryConfig {
    /// Consecutive failures on one subsystem before a soft reset is due
    pub soft_reset_threshold: u16,
    /// Consecutive failures on one subsystem before a hard reset is due
    pub hard_reset_threshold: u16,
    /// Network and weather consecutive failures must both exceed this
    /// to enter extended failure mode
    pub extended_failure_threshold: u16,
    /// Uptime after which a preventive restart is due (seconds)
    pub preventive_restart_after_s: u32,
    /// Cumulative API calls before a preventive restart is due
    pub max_api_calls: u32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            soft_reset_threshold: 3,
            hard_reset_threshold: 10,
            extended_failure_threshold: 5,
            preventive_restart_after_s: 24 * 60 * 60,
            max_api_calls: 350,
        }
    }
}

impl RecoveryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.soft_reset_threshold >= self.hard_reset_threshold {
            return Err(ConfigError::ThresholdOrder);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert_eq!(RecoveryConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_soft_must_stay_below_hard() {
        let cfg = RecoveryConfig {
            soft_reset_threshold: 10,
            hard_reset_threshold: 10,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ThresholdOrder));
    }
}
