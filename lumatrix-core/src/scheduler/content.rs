//! Content selection rules
//!
//! Precedence is a fixed rule list evaluated top-down, not scattered
//! branching: extended failure forces the clock page; an active date
//! event pre-empts any scheduled display; an active scheduled display
//! pre-empts the standard weather rotation. Same inputs, same choice.

use heapless::String;

use crate::calendar::{DeviceTime, EventCalendar, EventRecord, ScheduleTable, ScheduledDisplay, MAX_LABEL_LEN};
use crate::config::DisplayOptions;
use crate::state::StateTracker;

/// What the current cycle puts on the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleContent {
    /// Degraded operation: clock only, no network content
    ClockOnly,
    /// A scheduled display owns the whole cycle
    Scheduled(ScheduledDisplay),
    /// The standard rotation, with the date event appended when active
    Standard { event: Option<EventRecord> },
}

/// Pick this cycle's content. Pure function of its inputs.
pub fn select_content(
    now: &DeviceTime,
    calendar: &EventCalendar,
    schedules: &ScheduleTable,
    already_shown: &[String<MAX_LABEL_LEN>],
    tracker: &StateTracker,
    options: &DisplayOptions,
) -> CycleContent {
    if tracker.should_enter_extended_failure_mode() {
        return CycleContent::ClockOnly;
    }

    if options.show_events {
        if let Some(event) = calendar.lookup_date_event(now.month, now.day) {
            if event.is_active(now.hour) {
                return CycleContent::Standard {
                    event: Some(event.clone()),
                };
            }
        }
    }

    if options.show_scheduled {
        if let Some(schedule) = schedules.lookup_active(now.weekday, now.time_of_day(), already_shown)
        {
            return CycleContent::Scheduled(schedule.clone());
        }
    }

    CycleContent::Standard { event: None }
}
