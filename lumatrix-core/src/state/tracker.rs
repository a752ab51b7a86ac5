//! The resilience core
//!
//! Records success/failure per subsystem and answers the scheduler's
//! `should_*` queries. Recording happens only at cycle boundaries, so the
//! queries made while deciding one cycle all observe the same snapshot.

use super::counter::{FailureCounter, RecoveryStage, Subsystem, SUBSYSTEM_COUNT};
use crate::config::RecoveryConfig;

/// Which external API call is being counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApiCallKind {
    Current,
    Forecast,
}

/// Read-only diagnostics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApiStats {
    pub uptime_s: u32,
    pub api_calls_total: u32,
    pub api_calls_current: u32,
    pub api_calls_forecast: u32,
    /// Lifetime failure totals indexed by [`Subsystem::index`]
    pub cumulative_failures: [u32; SUBSYSTEM_COUNT],
    pub permanent_error: bool,
}

/// Aggregated failure state for the whole process
pub struct StateTracker {
    cfg: RecoveryConfig,
    counters: [FailureCounter; SUBSYSTEM_COUNT],
    permanent_error: bool,
    uptime_s: u32,
    api_calls_current: u32,
    api_calls_forecast: u32,
}

impl StateTracker {
    pub fn new(cfg: RecoveryConfig) -> Self {
        Self {
            cfg,
            counters: [FailureCounter::default(); SUBSYSTEM_COUNT],
            permanent_error: false,
            uptime_s: 0,
            api_calls_current: 0,
            api_calls_forecast: 0,
        }
    }

    pub fn config(&self) -> &RecoveryConfig {
        &self.cfg
    }

    /// Advance the internal uptime clock; called once per cycle
    pub fn tick(&mut self, delta_s: u32) {
        self.uptime_s = self.uptime_s.saturating_add(delta_s);
    }

    pub fn uptime_s(&self) -> u32 {
        self.uptime_s
    }

    // --- recording ---

    pub fn record_success(&mut self, subsystem: Subsystem) {
        self.counters[subsystem.index()].record_success();
    }

    pub fn record_failure(&mut self, subsystem: Subsystem) {
        let now = self.uptime_s;
        self.counters[subsystem.index()].record_failure(now);
    }

    pub fn record_api_call(&mut self, kind: ApiCallKind) {
        match kind {
            ApiCallKind::Current => {
                self.api_calls_current = self.api_calls_current.saturating_add(1)
            }
            ApiCallKind::Forecast => {
                self.api_calls_forecast = self.api_calls_forecast.saturating_add(1)
            }
        }
    }

    /// Latch an unrecoverable condition. Survives successes and soft
    /// resets; only [`factory_reset`](Self::factory_reset) clears it.
    pub fn latch_permanent_error(&mut self) {
        self.permanent_error = true;
    }

    pub fn has_permanent_error(&self) -> bool {
        self.permanent_error
    }

    /// In-memory cleanup: consecutive counts clear, lifetime history, API
    /// accounting and the permanent latch survive
    pub fn soft_reset(&mut self) {
        for counter in &mut self.counters {
            counter.record_success();
        }
    }

    /// Full reset including the permanent latch. Uptime keeps running;
    /// it belongs to the process, not the failure history.
    pub fn factory_reset(&mut self) {
        self.counters = [FailureCounter::default(); SUBSYSTEM_COUNT];
        self.permanent_error = false;
        self.api_calls_current = 0;
        self.api_calls_forecast = 0;
    }

    // --- queries, all pure against the current counters ---

    pub fn counter(&self, subsystem: Subsystem) -> &FailureCounter {
        &self.counters[subsystem.index()]
    }

    pub fn stage(&self, subsystem: Subsystem) -> RecoveryStage {
        self.counters[subsystem.index()].stage(&self.cfg)
    }

    /// Some subsystem has failed often enough to warrant clearing caches
    /// and dropping connections
    pub fn should_soft_reset(&self) -> bool {
        self.counters
            .iter()
            .any(|c| c.consecutive >= self.cfg.soft_reset_threshold)
    }

    /// Only recovery left is a process restart
    pub fn should_hard_reset(&self) -> bool {
        self.permanent_error
            || self
                .counters
                .iter()
                .any(|c| c.consecutive >= self.cfg.hard_reset_threshold)
    }

    /// Routine hygiene restart, independent of failures: the heap
    /// fragments slowly over long uptimes, and the API budget resets
    /// with the process
    pub fn should_preventive_restart(&self) -> bool {
        self.uptime_s >= self.cfg.preventive_restart_after_s
            || self.api_calls_total() >= self.cfg.max_api_calls
    }

    /// Network and weather both failing past the threshold: stop trying
    /// the network every cycle, show clock-only content, retry on the
    /// long interval
    pub fn should_enter_extended_failure_mode(&self) -> bool {
        self.counters[Subsystem::Network.index()].consecutive > self.cfg.extended_failure_threshold
            && self.counters[Subsystem::Weather.index()].consecutive
                > self.cfg.extended_failure_threshold
    }

    pub fn api_calls_total(&self) -> u32 {
        self.api_calls_current.saturating_add(self.api_calls_forecast)
    }

    pub fn get_api_stats(&self) -> ApiStats {
        let mut cumulative_failures = [0u32; SUBSYSTEM_COUNT];
        for (slot, counter) in cumulative_failures.iter_mut().zip(self.counters.iter()) {
            *slot = counter.cumulative;
        }
        ApiStats {
            uptime_s: self.uptime_s,
            api_calls_total: self.api_calls_total(),
            api_calls_current: self.api_calls_current,
            api_calls_forecast: self.api_calls_forecast,
            cumulative_failures,
            permanent_error: self.permanent_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> StateTracker {
        StateTracker::new(RecoveryConfig::default())
    }

    #[test]
    fn test_three_failures_make_soft_reset_due() {
        let mut t = tracker();
        for _ in 0..3 {
            t.record_failure(Subsystem::Network);
        }
        assert!(t.should_soft_reset());
        assert!(!t.should_hard_reset());
    }

    #[test]
    fn test_interleaved_success_resets_the_run() {
        let mut t = tracker();
        t.record_failure(Subsystem::Network);
        t.record_failure(Subsystem::Network);
        t.record_success(Subsystem::Network);
        t.record_failure(Subsystem::Network);

        assert!(!t.should_soft_reset());
        assert_eq!(t.counter(Subsystem::Network).consecutive, 1);
        assert_eq!(t.counter(Subsystem::Network).cumulative, 3);
    }

    #[test]
    fn test_hard_reset_at_high_threshold() {
        let mut t = tracker();
        for _ in 0..10 {
            t.record_failure(Subsystem::Render);
        }
        assert!(t.should_hard_reset());
    }

    #[test]
    fn test_permanent_latch_survives_everything_but_factory_reset() {
        let mut t = tracker();
        t.latch_permanent_error();
        assert!(t.should_hard_reset());

        for sub in Subsystem::ALL {
            t.record_success(sub);
        }
        t.soft_reset();
        assert!(t.has_permanent_error());
        assert!(t.should_hard_reset());

        t.factory_reset();
        assert!(!t.has_permanent_error());
        assert!(!t.should_hard_reset());
    }

    #[test]
    fn test_soft_reset_preserves_cumulative_history() {
        let mut t = tracker();
        for _ in 0..4 {
            t.record_failure(Subsystem::Weather);
        }
        t.record_api_call(ApiCallKind::Current);
        t.soft_reset();

        assert_eq!(t.counter(Subsystem::Weather).consecutive, 0);
        assert_eq!(t.counter(Subsystem::Weather).cumulative, 4);
        assert_eq!(t.api_calls_total(), 1);
        assert!(!t.should_soft_reset());
    }

    #[test]
    fn test_extended_failure_needs_both_subsystems() {
        let mut t = tracker();
        for _ in 0..6 {
            t.record_failure(Subsystem::Network);
        }
        assert!(!t.should_enter_extended_failure_mode());

        for _ in 0..6 {
            t.record_failure(Subsystem::Weather);
        }
        assert!(t.should_enter_extended_failure_mode());
    }

    #[test]
    fn test_extended_failure_threshold_is_exclusive() {
        let mut t = tracker();
        for _ in 0..5 {
            t.record_failure(Subsystem::Network);
            t.record_failure(Subsystem::Weather);
        }
        // Exactly at the threshold does not qualify; it must be exceeded
        assert!(!t.should_enter_extended_failure_mode());

        t.record_failure(Subsystem::Network);
        t.record_failure(Subsystem::Weather);
        assert!(t.should_enter_extended_failure_mode());
    }

    #[test]
    fn test_preventive_restart_on_uptime_and_api_budget() {
        let mut t = tracker();
        assert!(!t.should_preventive_restart());

        t.tick(24 * 60 * 60);
        assert!(t.should_preventive_restart());

        let mut t = tracker();
        for _ in 0..350 {
            t.record_api_call(ApiCallKind::Current);
        }
        assert!(t.should_preventive_restart());
    }

    #[test]
    fn test_api_stats_snapshot() {
        let mut t = tracker();
        t.tick(120);
        t.record_api_call(ApiCallKind::Current);
        t.record_api_call(ApiCallKind::Forecast);
        t.record_failure(Subsystem::Clock);
        t.record_failure(Subsystem::Clock);

        let stats = t.get_api_stats();
        assert_eq!(stats.uptime_s, 120);
        assert_eq!(stats.api_calls_total, 2);
        assert_eq!(stats.api_calls_current, 1);
        assert_eq!(stats.api_calls_forecast, 1);
        assert_eq!(stats.cumulative_failures[Subsystem::Clock.index()], 2);
        assert!(!stats.permanent_error);
    }

    #[test]
    fn test_failure_stamps_uptime() {
        let mut t = tracker();
        t.tick(300);
        t.record_failure(Subsystem::Network);
        assert_eq!(t.counter(Subsystem::Network).last_event_s, 300);
    }
}
