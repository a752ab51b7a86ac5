//! Network fetch trait

use heapless::Vec;
use lumatrix_protocol::{Forecast, WeatherSnapshot};

use crate::calendar::{EventRecord, ScheduledDisplay, MAX_EVENTS, MAX_SCHEDULES};

/// Errors from a network fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// No link; nothing was sent
    NotConnected,
    /// Request timed out
    Timeout,
    /// Response did not parse
    Protocol,
    /// HTTP error status
    Http(u16),
}

impl FetchError {
    /// Connectivity failures count against the network subsystem rather
    /// than the API that was being called
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FetchError::NotConnected | FetchError::Timeout)
    }

    /// Client errors no retry will fix: bad key, bad location, gone
    /// endpoint. These latch the permanent-error flag.
    pub fn is_permanent(&self) -> bool {
        matches!(self, FetchError::Http(400 | 401 | 403 | 404))
    }
}

/// Network collaborator: weather API and the hosted calendar data
pub trait NetworkFetch {
    fn fetch_weather(&mut self) -> Result<WeatherSnapshot, FetchError>;

    fn fetch_forecast(&mut self) -> Result<Forecast, FetchError>;

    /// Ephemeral event records for the current day set
    fn fetch_events(&mut self) -> Result<Vec<EventRecord, MAX_EVENTS>, FetchError>;

    /// Scheduled display windows, refreshed daily
    fn fetch_schedules(&mut self) -> Result<Vec<ScheduledDisplay, MAX_SCHEDULES>, FetchError>;

    fn is_connected(&self) -> bool;
}
