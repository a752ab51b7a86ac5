//! Calendar data and resolution
//!
//! Date events recur annually and are keyed by month and day; scheduled
//! displays are time-of-day windows with a weekday mask. Resolution is
//! deterministic: the same date/time input always picks the same record,
//! which keeps the control loop reproducible under test.

pub mod date;
pub mod events;
pub mod schedule;

pub use date::{month_abbrev, weekday_for, DeviceTime, TimeOfDay, MONTH_ABBREV};
pub use events::{EventCalendar, EventRecord, EventSource, ALL_DAY_END, ALL_DAY_START, MAX_EVENTS};
pub use schedule::{DayMask, ScheduleTable, ScheduledDisplay, MAX_SCHEDULES};

/// Maximum length of a display label line
pub const MAX_LABEL_LEN: usize = 24;
