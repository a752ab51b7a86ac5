//! Persisted display settings
//!
//! Boards keep a small settings block in flash so option toggles and tuned
//! thresholds survive a restart. The block is postcard-serialized binary
//! data with a magic/version header and a CRC32 trailer for validation.

use super::{DisplayOptions, RecoveryConfig, TimingConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Magic number identifying a valid settings block ("LMTX")
pub const SETTINGS_MAGIC: u32 = 0x4C4D5458;

/// Current settings format version
pub const SETTINGS_VERSION: u8 = 1;

/// Errors from reading or writing a settings block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Serialization buffer too small
    Encode,
    /// Bytes did not deserialize
    Decode,
    /// Magic or version mismatch
    BadHeader,
    /// Stored CRC does not match the contents
    BadCrc,
}

/// Complete settings block stored in flash
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SettingsData {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    pub options: DisplayOptions,
    pub recovery: RecoveryConfig,
    pub timing: TimingConfig,
    /// CRC32 checksum over the fields above
    pub crc: u32,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsData {
    pub fn new() -> Self {
        let mut data = Self {
            magic: SETTINGS_MAGIC,
            version: SETTINGS_VERSION,
            options: DisplayOptions::default(),
            recovery: RecoveryConfig::default(),
            timing: TimingConfig::default(),
            crc: 0,
        };
        data.update_crc();
        data
    }

    /// Check if the header is valid (magic and version match)
    pub fn is_valid(&self) -> bool {
        self.magic == SETTINGS_MAGIC && self.version == SETTINGS_VERSION
    }

    /// Calculate CRC32 over everything except the crc field itself
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFFFFFF;

        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);

        let o = &self.options;
        crc = crc32_update(
            crc,
            &[
                o.show_weather as u8,
                o.show_forecast as u8,
                o.show_events as u8,
                o.show_scheduled as u8,
                o.show_weekday_indicator as u8,
                o.use_live_weather as u8,
                o.use_live_forecast as u8,
            ],
        );

        let r = &self.recovery;
        crc = crc32_update(crc, &r.soft_reset_threshold.to_le_bytes());
        crc = crc32_update(crc, &r.hard_reset_threshold.to_le_bytes());
        crc = crc32_update(crc, &r.extended_failure_threshold.to_le_bytes());
        crc = crc32_update(crc, &r.preventive_restart_after_s.to_le_bytes());
        crc = crc32_update(crc, &r.max_api_calls.to_le_bytes());

        let t = &self.timing;
        crc = crc32_update(crc, &t.cycle_s.to_le_bytes());
        crc = crc32_update(crc, &t.forecast_s.to_le_bytes());
        crc = crc32_update(crc, &t.event_s.to_le_bytes());
        crc = crc32_update(crc, &t.min_event_s.to_le_bytes());
        crc = crc32_update(crc, &t.clock_display_s.to_le_bytes());
        crc = crc32_update(crc, &t.weather_max_age_s.to_le_bytes());
        crc = crc32_update(crc, &t.forecast_refresh_s.to_le_bytes());
        crc = crc32_update(crc, &t.recovery_retry_s.to_le_bytes());
        crc = crc32_update(crc, &t.fast_cycle_threshold_s.to_le_bytes());
        crc = crc32_update(crc, &[t.daily_reset_hour, t.restart_grace_min]);

        !crc
    }

    pub fn update_crc(&mut self) {
        self.crc = self.calculate_crc();
    }

    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }
}

#[cfg(feature = "serde")]
impl SettingsData {
    /// Serialize into `buf`, returning the used portion
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], SettingsError> {
        postcard::to_slice(self, buf).map_err(|_| SettingsError::Encode)
    }

    /// Deserialize and validate a stored block
    pub fn decode(bytes: &[u8]) -> Result<Self, SettingsError> {
        let data: SettingsData = postcard::from_bytes(bytes).map_err(|_| SettingsError::Decode)?;
        if !data.is_valid() {
            return Err(SettingsError::BadHeader);
        }
        if !data.verify_crc() {
            return Err(SettingsError::BadCrc);
        }
        Ok(data)
    }
}

/// CRC32 update (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let data = SettingsData::new();
        assert!(data.is_valid());
        assert!(data.verify_crc());
        assert_eq!(data.magic, SETTINGS_MAGIC);
        assert_eq!(data.version, SETTINGS_VERSION);
    }

    #[test]
    fn test_crc_detects_mutation() {
        let mut data = SettingsData::new();
        data.options.show_forecast = false;
        assert!(!data.verify_crc());

        data.update_crc();
        assert!(data.verify_crc());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_decode_roundtrip() {
        let mut data = SettingsData::new();
        data.recovery.soft_reset_threshold = 5;
        data.update_crc();

        let mut buf = [0u8; 256];
        let bytes = data.encode(&mut buf).unwrap();
        let decoded = SettingsData::decode(bytes).unwrap();
        assert_eq!(decoded, data);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_decode_rejects_bad_crc() {
        let mut data = SettingsData::new();
        data.crc ^= 1;

        let mut buf = [0u8; 256];
        let bytes = data.encode(&mut buf).unwrap();
        assert_eq!(SettingsData::decode(bytes), Err(SettingsError::BadCrc));
    }
}
