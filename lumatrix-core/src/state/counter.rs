//! Per-subsystem failure counters

use crate::config::RecoveryConfig;

/// Independently tracked failure domains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Subsystem {
    /// Link-level connectivity
    Network,
    /// Weather API calls (current and forecast)
    Weather,
    /// Panel refresh
    Render,
    /// Wifi reconnection attempts
    WifiReconnect,
    /// RTC reads
    Clock,
}

pub const SUBSYSTEM_COUNT: usize = 5;

impl Subsystem {
    pub const ALL: [Subsystem; SUBSYSTEM_COUNT] = [
        Subsystem::Network,
        Subsystem::Weather,
        Subsystem::Render,
        Subsystem::WifiReconnect,
        Subsystem::Clock,
    ];

    pub const fn index(self) -> usize {
        match self {
            Subsystem::Network => 0,
            Subsystem::Weather => 1,
            Subsystem::Render => 2,
            Subsystem::WifiReconnect => 3,
            Subsystem::Clock => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Subsystem::Network => "network",
            Subsystem::Weather => "weather",
            Subsystem::Render => "render",
            Subsystem::WifiReconnect => "wifi",
            Subsystem::Clock => "clock",
        }
    }
}

/// Where a subsystem sits on the recovery ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryStage {
    Healthy,
    /// Failing, but below any action threshold
    Degraded(u16),
    /// Enough consecutive failures for an in-memory cleanup
    SoftResetDue,
    /// Enough consecutive failures for a process restart
    HardResetDue,
}

/// Failure history for one subsystem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FailureCounter {
    /// Failures since the last success; resets on any success
    pub consecutive: u16,
    /// Lifetime failures; survives soft resets
    pub cumulative: u32,
    /// Uptime stamp of the last recorded failure (seconds)
    pub last_event_s: u32,
}

impl FailureCounter {
    pub fn record_failure(&mut self, now_s: u32) {
        self.consecutive = self.consecutive.saturating_add(1);
        self.cumulative = self.cumulative.saturating_add(1);
        self.last_event_s = now_s;
    }

    pub fn record_success(&mut self) {
        self.consecutive = 0;
    }

    /// Classification is a pure function of the counter and thresholds
    pub fn stage(&self, cfg: &RecoveryConfig) -> RecoveryStage {
        if self.consecutive >= cfg.hard_reset_threshold {
            RecoveryStage::HardResetDue
        } else if self.consecutive >= cfg.soft_reset_threshold {
            RecoveryStage::SoftResetDue
        } else if self.consecutive > 0 {
            RecoveryStage::Degraded(self.consecutive)
        } else {
            RecoveryStage::Healthy
        }
    }
}
