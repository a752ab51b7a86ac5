//! Scheduled display windows
//!
//! A scheduled display owns the panel for a time-of-day window on selected
//! weekdays. Windows may wrap past midnight; a wrapped window belongs to
//! the weekday it started on.

use heapless::{String, Vec};
use lumatrix_protocol::{clip_str, MAX_ASSET_LEN};

use super::date::TimeOfDay;
use super::MAX_LABEL_LEN;
use crate::config::ConfigError;
use crate::traits::logger::Logger;

/// Maximum schedule entries
pub const MAX_SCHEDULES: usize = 16;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Weekday bitmask, bit 0 = Monday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayMask(pub u8);

impl DayMask {
    pub const ALL: DayMask = DayMask(0x7F);
    pub const WEEKDAYS: DayMask = DayMask(0x1F);

    pub const fn contains(&self, weekday: u8) -> bool {
        weekday < 7 && self.0 & (1 << weekday) != 0
    }

    /// Build from a list of weekday numbers, 0 = Monday
    pub fn from_days(days: &[u8]) -> Self {
        let mut mask = 0;
        for &d in days {
            if d < 7 {
                mask |= 1 << d;
            }
        }
        DayMask(mask)
    }
}

/// One scheduled display window
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledDisplay {
    /// Content identifier; also the key in the shown-today set
    pub name: String<MAX_LABEL_LEN>,
    pub enabled: bool,
    pub days: DayMask,
    pub start: TimeOfDay,
    /// Exclusive end; `end < start` wraps past midnight
    pub end: TimeOfDay,
    /// Image file name under the schedule image directory
    pub image: String<MAX_ASSET_LEN>,
    /// Smaller value wins when windows overlap
    pub priority: u8,
    pub progress_bar: bool,
}

impl ScheduledDisplay {
    pub fn new(name: &str, start: TimeOfDay, end: TimeOfDay, image: &str, priority: u8) -> Self {
        Self {
            name: clip_str(name),
            enabled: true,
            days: DayMask::ALL,
            start,
            end,
            image: clip_str(image),
            priority,
            progress_bar: true,
        }
    }

    pub fn with_days(mut self, days: DayMask) -> Self {
        self.days = days;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn wraps_midnight(&self) -> bool {
        self.start.minutes() > self.end.minutes()
    }

    /// Whether `t` falls inside the [start, end) window, wrap aware
    pub fn contains(&self, t: TimeOfDay) -> bool {
        let (t, s, e) = (t.minutes(), self.start.minutes(), self.end.minutes());
        if s > e {
            t >= s || t < e
        } else {
            s <= t && t < e
        }
    }

    /// Whether the window is active at `weekday`/`t`. The early-morning
    /// tail of a wrapped window matches the mask of the previous day.
    pub fn matches(&self, weekday: u8, t: TimeOfDay) -> bool {
        if !self.enabled || !self.contains(t) {
            return false;
        }
        if self.wraps_midnight() && t.minutes() < self.end.minutes() {
            self.days.contains(previous_weekday(weekday))
        } else {
            self.days.contains(weekday)
        }
    }

    /// Minutes until the window closes, never less than one
    pub fn remaining_minutes(&self, t: TimeOfDay) -> u16 {
        let (t, e) = (t.minutes(), self.end.minutes());
        let remaining = if self.wraps_midnight() && t >= self.start.minutes() {
            MINUTES_PER_DAY - t + e
        } else {
            e.saturating_sub(t)
        };
        remaining.max(1)
    }

    /// Progress through the window in whole percent
    pub fn progress_pct(&self, t: TimeOfDay) -> u8 {
        let total = (self.end.minutes() + MINUTES_PER_DAY - self.start.minutes()) % MINUTES_PER_DAY;
        if total == 0 {
            return 100;
        }
        let elapsed = (t.minutes() + MINUTES_PER_DAY - self.start.minutes()) % MINUTES_PER_DAY;
        ((elapsed as u32 * 100 / total as u32).min(100)) as u8
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.start == self.end {
            return Err(ConfigError::EmptyWindow);
        }
        Ok(())
    }
}

/// All configured schedule entries
#[derive(Debug, Default)]
pub struct ScheduleTable {
    entries: Vec<ScheduledDisplay, MAX_SCHEDULES>,
}

impl ScheduleTable {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Replace the table. Malformed entries are logged and skipped;
    /// returns the number of entries stored.
    pub fn load(&mut self, entries: &[ScheduledDisplay], log: &mut impl Logger) -> usize {
        self.entries.clear();
        let mut stored = 0;
        for entry in entries {
            if entry.check().is_err() {
                log.warning("schedule entry with empty window skipped");
                continue;
            }
            if self.entries.push(entry.clone()).is_err() {
                log.warning("schedule table full, entry dropped");
            } else {
                stored += 1;
            }
        }
        stored
    }

    /// The active entry at `weekday`/`t`, if any.
    ///
    /// Overlapping windows are a configuration error, but resolution stays
    /// deterministic: the lowest priority value wins and ties break on the
    /// earliest start time. Entries named in `already_shown` are skipped.
    pub fn lookup_active(
        &self,
        weekday: u8,
        t: TimeOfDay,
        already_shown: &[String<MAX_LABEL_LEN>],
    ) -> Option<&ScheduledDisplay> {
        self.entries
            .iter()
            .filter(|s| s.matches(weekday, t))
            .filter(|s| !already_shown.iter().any(|n| n.as_str() == s.name.as_str()))
            .min_by_key(|s| (s.priority, s.start.minutes()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledDisplay> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn previous_weekday(weekday: u8) -> u8 {
    (weekday + 6) % 7
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::logger::NullLogger;

    fn window(name: &str, start: (u8, u8), end: (u8, u8), priority: u8) -> ScheduledDisplay {
        ScheduledDisplay::new(
            name,
            TimeOfDay::new(start.0, start.1),
            TimeOfDay::new(end.0, end.1),
            "study.bmp",
            priority,
        )
    }

    #[test]
    fn test_plain_window_containment() {
        let w = window("school", (8, 30), (15, 0), 1);
        assert!(!w.contains(TimeOfDay::new(8, 29)));
        assert!(w.contains(TimeOfDay::new(8, 30)));
        assert!(w.contains(TimeOfDay::new(14, 59)));
        // End is exclusive
        assert!(!w.contains(TimeOfDay::new(15, 0)));
    }

    #[test]
    fn test_wrapped_window_spans_midnight() {
        let w = window("night", (22, 0), (6, 0), 1);
        assert!(w.wraps_midnight());
        assert!(w.contains(TimeOfDay::new(23, 30)));
        assert!(w.contains(TimeOfDay::new(0, 0)));
        assert!(w.contains(TimeOfDay::new(5, 59)));
        assert!(!w.contains(TimeOfDay::new(6, 0)));
        assert!(!w.contains(TimeOfDay::new(12, 0)));
    }

    #[test]
    fn test_wrapped_window_weekday_belongs_to_start_day() {
        // Friday-only window 23:00 to 01:00
        let w = window("late", (23, 0), (1, 0), 1).with_days(DayMask::from_days(&[4]));

        // Friday 23:30: active
        assert!(w.matches(4, TimeOfDay::new(23, 30)));
        // Saturday 00:30: still the Friday window
        assert!(w.matches(5, TimeOfDay::new(0, 30)));
        // Saturday 23:30: not a Friday start
        assert!(!w.matches(5, TimeOfDay::new(23, 30)));
    }

    #[test]
    fn test_disabled_and_day_mask() {
        let weekdays_only = window("school", (8, 0), (15, 0), 1).with_days(DayMask::WEEKDAYS);
        assert!(weekdays_only.matches(0, TimeOfDay::new(9, 0)));
        assert!(!weekdays_only.matches(5, TimeOfDay::new(9, 0)));

        let off = window("school", (8, 0), (15, 0), 1).disabled();
        assert!(!off.matches(0, TimeOfDay::new(9, 0)));
    }

    #[test]
    fn test_overlap_resolves_by_priority_then_start() {
        let mut table = ScheduleTable::new();
        table.load(
            &[
                window("b", (9, 0), (12, 0), 2),
                window("a", (8, 0), (12, 0), 1),
                window("c", (7, 0), (12, 0), 1),
            ],
            &mut NullLogger,
        );

        // Priority 1 beats 2; between the two priority-1 windows the
        // earlier start wins, regardless of load order
        let at = TimeOfDay::new(10, 0);
        let hit = table.lookup_active(0, at, &[]).unwrap();
        assert_eq!(hit.name.as_str(), "c");
    }

    #[test]
    fn test_already_shown_is_skipped() {
        let mut table = ScheduleTable::new();
        table.load(&[window("study", (9, 0), (12, 0), 1)], &mut NullLogger);

        let at = TimeOfDay::new(10, 0);
        assert!(table.lookup_active(0, at, &[]).is_some());

        let shown = [clip_str::<{ super::MAX_LABEL_LEN }>("study")];
        assert!(table.lookup_active(0, at, &shown).is_none());
    }

    #[test]
    fn test_empty_window_skipped_on_load() {
        let mut table = ScheduleTable::new();
        let stored = table.load(
            &[
                window("broken", (9, 0), (9, 0), 1),
                window("fine", (10, 0), (11, 0), 1),
            ],
            &mut NullLogger,
        );
        assert_eq!(stored, 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remaining_and_progress() {
        let w = window("school", (8, 0), (16, 0), 1);
        assert_eq!(w.remaining_minutes(TimeOfDay::new(15, 0)), 60);
        // Never reports zero even at the boundary
        assert_eq!(w.remaining_minutes(TimeOfDay::new(16, 0)), 1);
        assert_eq!(w.progress_pct(TimeOfDay::new(12, 0)), 50);

        let night = window("night", (22, 0), (6, 0), 1);
        assert_eq!(night.remaining_minutes(TimeOfDay::new(23, 0)), 7 * 60);
        assert_eq!(night.progress_pct(TimeOfDay::new(2, 0)), 50);
    }
}
