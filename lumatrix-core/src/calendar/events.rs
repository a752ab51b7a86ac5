//! Recurring date events
//!
//! Events are keyed by month and day and recur annually. Bundled
//! (permanent) records and network-fetched (ephemeral) records merge into
//! one lookup space holding at most one record per date.

use core::fmt::Write;

use heapless::{String, Vec};
use lumatrix_protocol::{clip_str, MAX_ASSET_LEN, MAX_COLOR_LEN, DEFAULT_TEXT_COLOR};

use super::MAX_LABEL_LEN;
use crate::config::ConfigError;
use crate::traits::logger::Logger;

/// Maximum records across both sources
pub const MAX_EVENTS: usize = 64;

/// Hour marking the start of an all-day window
pub const ALL_DAY_START: u8 = 0;

/// Hour marking the end of an all-day window
pub const ALL_DAY_END: u8 = 24;

/// Where a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventSource {
    /// Bundled with the device, always available
    Permanent,
    /// Fetched from the network, replaced on the daily refresh
    Ephemeral,
}

/// One recurring calendar event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventRecord {
    pub month: u8,
    pub day: u8,
    /// Top display line
    pub primary: String<MAX_LABEL_LEN>,
    /// Bottom display line
    pub secondary: String<MAX_LABEL_LEN>,
    /// Image file name under the event image directory
    pub image: String<MAX_ASSET_LEN>,
    /// Color token resolved against the renderer's palette
    pub color: String<MAX_COLOR_LEN>,
    pub start_hour: u8,
    pub end_hour: u8,
    pub source: EventSource,
}

impl EventRecord {
    /// All-day permanent record in the default color
    pub fn new(month: u8, day: u8, primary: &str, secondary: &str, image: &str) -> Self {
        Self {
            month,
            day,
            primary: clip_str(primary),
            secondary: clip_str(secondary),
            image: clip_str(image),
            color: clip_str(DEFAULT_TEXT_COLOR),
            start_hour: ALL_DAY_START,
            end_hour: ALL_DAY_END,
            source: EventSource::Permanent,
        }
    }

    pub fn with_window(mut self, start_hour: u8, end_hour: u8) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = clip_str(color);
        self
    }

    pub fn ephemeral(mut self) -> Self {
        self.source = EventSource::Ephemeral;
        self
    }

    /// True while the event should be on screen
    pub fn is_active(&self, hour: u8) -> bool {
        if self.start_hour == ALL_DAY_START && self.end_hour == ALL_DAY_END {
            return true;
        }
        self.start_hour <= hour && hour < self.end_hour
    }

    /// A record with neither labels nor an image must not blank out a
    /// bundled one
    pub fn has_content(&self) -> bool {
        !self.primary.is_empty() || !self.secondary.is_empty() || !self.image.is_empty()
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.month == 0 || self.month > 12 || self.day == 0 || self.day > 31 {
            return Err(ConfigError::BadDate);
        }
        Ok(())
    }
}

/// All known events, at most one per calendar date
#[derive(Debug, Default)]
pub struct EventCalendar {
    records: Vec<EventRecord, MAX_EVENTS>,
}

impl EventCalendar {
    pub const fn new() -> Self {
        Self { records: Vec::new() }
    }

    fn position(&self, month: u8, day: u8) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.month == month && r.day == day)
    }

    /// Load bundled records. A duplicate date overwrites the earlier
    /// record with a warning; malformed records are skipped. Returns the
    /// number of records stored.
    pub fn load_permanent(&mut self, records: &[EventRecord], log: &mut impl Logger) -> usize {
        let mut stored = 0;
        for record in records {
            if record.check().is_err() {
                let mut msg: String<48> = String::new();
                let _ = write!(msg, "bad event date {:02}-{:02}, skipped", record.month, record.day);
                log.warning(msg.as_str());
                continue;
            }

            let mut record = record.clone();
            record.source = EventSource::Permanent;

            if let Some(pos) = self.position(record.month, record.day) {
                let mut msg: String<48> = String::new();
                let _ = write!(
                    msg,
                    "duplicate event date {:02}-{:02}, replacing",
                    record.month, record.day
                );
                log.warning(msg.as_str());
                self.records[pos] = record;
                stored += 1;
            } else if self.records.push(record).is_err() {
                log.warning("event calendar full, record dropped");
            } else {
                stored += 1;
            }
        }
        stored
    }

    /// Merge network-fetched records.
    ///
    /// A record without content is dropped outright, so a partially failed
    /// fetch cannot blank out a known-good bundled record. A record with
    /// content replaces whatever holds its date.
    pub fn merge_ephemeral(&mut self, records: &[EventRecord], log: &mut impl Logger) -> usize {
        let mut stored = 0;
        for record in records {
            if record.check().is_err() {
                continue;
            }
            if !record.has_content() {
                log.debug("empty ephemeral event dropped");
                continue;
            }

            let mut record = record.clone();
            record.source = EventSource::Ephemeral;

            if let Some(pos) = self.position(record.month, record.day) {
                self.records[pos] = record;
                stored += 1;
            } else if self.records.push(record).is_err() {
                log.warning("event calendar full, record dropped");
            } else {
                stored += 1;
            }
        }
        stored
    }

    /// Drop ephemeral records ahead of a daily refresh
    pub fn clear_ephemeral(&mut self) {
        let mut i = 0;
        while i < self.records.len() {
            if self.records[i].source == EventSource::Ephemeral {
                self.records.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Exact-match lookup; no fuzzy or range matching
    pub fn lookup_date_event(&self, month: u8, day: u8) -> Option<&EventRecord> {
        self.position(month, day).map(|pos| &self.records[pos])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn permanent_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.source == EventSource::Permanent)
            .count()
    }

    pub fn ephemeral_count(&self) -> usize {
        self.records.len() - self.permanent_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::logger::{LogLevel, NullLogger};

    struct CountingLogger {
        warnings: usize,
    }

    impl Logger for CountingLogger {
        fn log(&mut self, level: LogLevel, _message: &str) {
            if level == LogLevel::Warning {
                self.warnings += 1;
            }
        }
    }

    #[test]
    fn test_lookup_exact_match_only() {
        let mut cal = EventCalendar::new();
        cal.load_permanent(
            &[EventRecord::new(10, 31, "Halloween", "Happy", "halloween.bmp")],
            &mut NullLogger,
        );

        let hit = cal.lookup_date_event(10, 31).unwrap();
        assert_eq!(hit.primary.as_str(), "Halloween");
        assert_eq!(hit.secondary.as_str(), "Happy");

        assert!(cal.lookup_date_event(10, 30).is_none());
        assert!(cal.lookup_date_event(11, 31).is_none());
    }

    #[test]
    fn test_duplicate_date_overwrites_with_warning() {
        let mut log = CountingLogger { warnings: 0 };
        let mut cal = EventCalendar::new();
        cal.load_permanent(
            &[
                EventRecord::new(12, 25, "Xmas", "", "tree.bmp"),
                EventRecord::new(12, 25, "Christmas", "Merry", "tree.bmp"),
            ],
            &mut log,
        );

        assert_eq!(cal.len(), 1);
        assert_eq!(log.warnings, 1);
        assert_eq!(
            cal.lookup_date_event(12, 25).unwrap().primary.as_str(),
            "Christmas"
        );
    }

    #[test]
    fn test_bad_date_skipped() {
        let mut log = CountingLogger { warnings: 0 };
        let mut cal = EventCalendar::new();
        cal.load_permanent(
            &[
                EventRecord::new(13, 1, "Nope", "", ""),
                EventRecord::new(2, 0, "Nope", "", ""),
                EventRecord::new(2, 14, "Valentine", "", "heart.bmp"),
            ],
            &mut log,
        );

        assert_eq!(cal.len(), 1);
        assert_eq!(log.warnings, 2);
    }

    #[test]
    fn test_empty_ephemeral_cannot_blank_permanent() {
        let mut cal = EventCalendar::new();
        cal.load_permanent(
            &[EventRecord::new(7, 4, "Fourth", "July", "flag.bmp")],
            &mut NullLogger,
        );

        let blank = EventRecord::new(7, 4, "", "", "").ephemeral();
        cal.merge_ephemeral(&[blank], &mut NullLogger);

        let kept = cal.lookup_date_event(7, 4).unwrap();
        assert_eq!(kept.primary.as_str(), "Fourth");
        assert_eq!(kept.source, EventSource::Permanent);
    }

    #[test]
    fn test_ephemeral_with_content_replaces() {
        let mut cal = EventCalendar::new();
        cal.load_permanent(
            &[EventRecord::new(7, 4, "Fourth", "July", "flag.bmp")],
            &mut NullLogger,
        );

        let update = EventRecord::new(7, 4, "Independence", "Day", "flag.bmp").ephemeral();
        cal.merge_ephemeral(&[update], &mut NullLogger);

        assert_eq!(cal.len(), 1);
        let got = cal.lookup_date_event(7, 4).unwrap();
        assert_eq!(got.primary.as_str(), "Independence");
        assert_eq!(got.source, EventSource::Ephemeral);
    }

    #[test]
    fn test_clear_ephemeral_keeps_permanent() {
        let mut cal = EventCalendar::new();
        cal.load_permanent(
            &[EventRecord::new(1, 1, "New Year", "", "party.bmp")],
            &mut NullLogger,
        );
        cal.merge_ephemeral(
            &[
                EventRecord::new(3, 9, "Dentist", "9am", "").ephemeral(),
                EventRecord::new(3, 10, "Trip", "", "plane.bmp").ephemeral(),
            ],
            &mut NullLogger,
        );
        assert_eq!(cal.len(), 3);
        assert_eq!(cal.ephemeral_count(), 2);

        cal.clear_ephemeral();
        assert_eq!(cal.len(), 1);
        assert_eq!(cal.permanent_count(), 1);
        assert!(cal.lookup_date_event(1, 1).is_some());
    }

    #[test]
    fn test_time_window_activity() {
        let all_day = EventRecord::new(10, 31, "Halloween", "", "");
        assert!(all_day.is_active(0));
        assert!(all_day.is_active(23));

        let evening = EventRecord::new(10, 31, "Party", "", "").with_window(18, 23);
        assert!(!evening.is_active(17));
        assert!(evening.is_active(18));
        assert!(evening.is_active(22));
        assert!(!evening.is_active(23));
    }
}
