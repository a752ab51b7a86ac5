//! Cycle execution
//!
//! Each cycle: walk the recovery ladder, pick content, resolve assets
//! through the caches, and assemble the directive playlist. Outcomes come
//! back through the `record_*` methods before the next cycle runs, so
//! every decision inside one cycle sees a single consistent tracker
//! snapshot.

use core::fmt::Write;

use heapless::{String, Vec};
use lumatrix_protocol::{
    clip_str, ContentKind, DrawOp, FontId, Forecast, RenderDirective, WeatherSnapshot,
    MAX_ASSET_LEN,
};

use crate::cache::{ImageCache, TextKey, TextWidthCache};
use crate::calendar::{
    DeviceTime, EventCalendar, EventRecord, ScheduleTable, ScheduledDisplay, MAX_EVENTS,
    MAX_LABEL_LEN, MAX_SCHEDULES,
};
use crate::config::{centered_x, paths, right_aligned_x, DisplayOptions, Layout, TimingConfig};
use crate::scheduler::content::{select_content, CycleContent};
use crate::state::{ApiCallKind, ApiStats, StateTracker, Subsystem};
use crate::traits::assets::{AssetSource, ImagePayload};
use crate::traits::logger::Logger;
use crate::traits::network::FetchError;
use crate::traits::renderer::RenderError;

/// Directives per cycle
pub const MAX_PLAYLIST: usize = 4;

/// Log cache statistics every this many cycles
const CYCLES_FOR_CACHE_STATS: u32 = 50;

/// Minimum uptime before the daily reset window applies
const DAILY_RESET_MIN_UPTIME_S: u32 = 3600;

/// Cycles to observe before rapid-cycle detection arms
const RAPID_CYCLE_ARM_COUNT: u32 = 10;

/// Why a restart directive was emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RestartKind {
    /// Latched or repeated failures; nothing short of a restart recovers
    Fault,
    /// Routine hygiene restart: uptime, API budget or the reset window
    Preventive,
    /// Cycles finishing implausibly fast, which means a crash loop
    RapidCycling,
}

/// In-memory cleanup the collaborators should mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Maintenance {
    /// Caches were cleared; drop connections and re-establish the link
    ClearCachesAndReconnect,
}

/// Network work the outer loop should perform after rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FetchPlan {
    pub weather: bool,
    pub forecast: bool,
    pub events: bool,
    pub schedules: bool,
}

/// One cycle's output
#[derive(Debug)]
pub struct CyclePlan {
    pub maintenance: Option<Maintenance>,
    pub fetch: FetchPlan,
    /// Pages in display order
    pub playlist: Vec<RenderDirective, MAX_PLAYLIST>,
}

/// The scheduler's verdict for a cycle
#[derive(Debug)]
pub enum CycleDecision {
    /// Abort everything and restart the process
    Restart(RestartKind),
    Run(CyclePlan),
}

/// The per-cycle decision loop.
///
/// Owns the tracker, the calendar data and both caches exclusively for
/// the process lifetime; collaborators only ever see read-only snapshots.
pub struct DisplayScheduler {
    tracker: StateTracker,
    calendar: EventCalendar,
    schedules: ScheduleTable,
    images: ImageCache,
    text_widths: TextWidthCache,
    options: DisplayOptions,
    layout: Layout,
    timing: TimingConfig,

    weather: Option<WeatherSnapshot>,
    weather_age_s: u32,
    forecast: Option<Forecast>,
    forecast_age_s: u32,
    last_weather_attempt_s: u32,

    shown_today: Vec<String<MAX_LABEL_LEN>, MAX_SCHEDULES>,
    active_schedule: Option<String<MAX_LABEL_LEN>>,
    last_date: Option<(u8, u8)>,
    refresh_calendar: bool,
    was_extended: bool,
    cycle_count: u32,
}

impl DisplayScheduler {
    pub fn new(
        tracker: StateTracker,
        calendar: EventCalendar,
        schedules: ScheduleTable,
        options: DisplayOptions,
        layout: Layout,
        timing: TimingConfig,
    ) -> Self {
        Self {
            tracker,
            calendar,
            schedules,
            images: ImageCache::new(),
            text_widths: TextWidthCache::new(),
            options,
            layout,
            timing,
            weather: None,
            weather_age_s: 0,
            forecast: None,
            forecast_age_s: 0,
            last_weather_attempt_s: 0,
            shown_today: Vec::new(),
            active_schedule: None,
            last_date: None,
            refresh_calendar: false,
            was_extended: false,
            cycle_count: 0,
        }
    }

    /// Run one decision cycle.
    ///
    /// `elapsed_s` is the wall time since the previous call; feeding
    /// synthetic values makes the whole loop testable without a clock.
    pub fn run_cycle(
        &mut self,
        now: DeviceTime,
        elapsed_s: u32,
        assets: &mut impl AssetSource,
        log: &mut impl Logger,
    ) -> CycleDecision {
        self.cycle_count = self.cycle_count.saturating_add(1);
        self.tracker.tick(elapsed_s);
        self.age_snapshots(elapsed_s);

        // Recovery ladder first; a restart aborts the rest of the cycle
        if self.tracker.should_hard_reset() {
            log.error("hard reset condition reached");
            return CycleDecision::Restart(RestartKind::Fault);
        }
        if self.rapid_cycling() {
            log.error("rapid cycling detected, restarting");
            return CycleDecision::Restart(RestartKind::RapidCycling);
        }
        if self.tracker.should_preventive_restart() || self.in_daily_reset_window(&now) {
            log.info("preventive restart due");
            return CycleDecision::Restart(RestartKind::Preventive);
        }

        self.roll_day_over(&now);
        self.track_schedule_exit(&now);

        // Everything below decides against the entry snapshot; the
        // counter mutation for a soft reset waits until the content
        // choice is made
        let soft = self.tracker.should_soft_reset();
        let extended = self.tracker.should_enter_extended_failure_mode();
        if extended && !self.was_extended {
            log.warning("entering extended failure mode, clock-only content");
        }
        if !extended && self.was_extended {
            log.info("leaving extended failure mode");
        }
        self.was_extended = extended;

        let mut maintenance = None;
        if soft {
            log.warning("soft reset: clearing caches and reconnecting");
            self.images.clear();
            self.text_widths.clear();
            maintenance = Some(Maintenance::ClearCachesAndReconnect);
        }

        let content = select_content(
            &now,
            &self.calendar,
            &self.schedules,
            &self.shown_today,
            &self.tracker,
            &self.options,
        );
        if let CycleContent::Scheduled(ref schedule) = content {
            self.active_schedule = Some(schedule.name.clone());
        }

        if soft {
            self.tracker.soft_reset();
        }

        let playlist = self.build_playlist(&now, &content, assets, log);
        let fetch = self.plan_fetches(extended);

        if self.cycle_count % CYCLES_FOR_CACHE_STATS == 0 {
            let stats = self.images.stats();
            let mut msg: String<64> = String::new();
            let _ = write!(
                msg,
                "image cache: {} items, {}% hit rate",
                stats.len,
                stats.hit_rate_pct()
            );
            log.debug(msg.as_str());
        }

        CycleDecision::Run(CyclePlan {
            maintenance,
            fetch,
            playlist,
        })
    }

    // --- outcome feedback, called between cycles ---

    /// Renderer outcome for the cycle's playlist
    pub fn record_render_outcome(&mut self, outcome: Result<(), RenderError>) {
        match outcome {
            Ok(()) => self.tracker.record_success(Subsystem::Render),
            Err(_) => self.tracker.record_failure(Subsystem::Render),
        }
    }

    /// Current-conditions fetch outcome
    pub fn record_weather_outcome(
        &mut self,
        outcome: Result<WeatherSnapshot, FetchError>,
        log: &mut impl Logger,
    ) {
        self.tracker.record_api_call(ApiCallKind::Current);
        match outcome {
            Ok(snapshot) => {
                self.weather = Some(snapshot);
                self.weather_age_s = 0;
                self.tracker.record_success(Subsystem::Weather);
                self.tracker.record_success(Subsystem::Network);
            }
            Err(err) => self.classify_fetch_error(err, Subsystem::Weather, log),
        }
    }

    /// Forecast fetch outcome
    pub fn record_forecast_outcome(
        &mut self,
        outcome: Result<Forecast, FetchError>,
        log: &mut impl Logger,
    ) {
        self.tracker.record_api_call(ApiCallKind::Forecast);
        match outcome {
            Ok(forecast) => {
                self.forecast = Some(forecast);
                self.forecast_age_s = 0;
                self.tracker.record_success(Subsystem::Weather);
                self.tracker.record_success(Subsystem::Network);
            }
            Err(err) => self.classify_fetch_error(err, Subsystem::Weather, log),
        }
    }

    /// Daily ephemeral event refresh outcome
    pub fn record_events_outcome(
        &mut self,
        outcome: Result<Vec<EventRecord, MAX_EVENTS>, FetchError>,
        log: &mut impl Logger,
    ) {
        match outcome {
            Ok(records) => {
                self.calendar.clear_ephemeral();
                self.calendar.merge_ephemeral(&records, log);
                self.tracker.record_success(Subsystem::Network);
            }
            Err(err) => self.classify_fetch_error(err, Subsystem::Network, log),
        }
    }

    /// Daily schedule refresh outcome. An empty fetch keeps the current
    /// table so the bundled fallback survives.
    pub fn record_schedules_outcome(
        &mut self,
        outcome: Result<Vec<ScheduledDisplay, MAX_SCHEDULES>, FetchError>,
        log: &mut impl Logger,
    ) {
        match outcome {
            Ok(entries) => {
                if entries.is_empty() {
                    log.debug("schedule refresh empty, keeping current table");
                } else {
                    self.schedules.load(&entries, log);
                }
                self.tracker.record_success(Subsystem::Network);
            }
            Err(err) => self.classify_fetch_error(err, Subsystem::Network, log),
        }
    }

    /// Link state observed this cycle
    pub fn record_connectivity(&mut self, connected: bool) {
        if connected {
            self.tracker.record_success(Subsystem::Network);
        } else {
            self.tracker.record_failure(Subsystem::Network);
        }
    }

    /// Wifi reconnect attempt outcome
    pub fn record_wifi_outcome(&mut self, success: bool) {
        if success {
            self.tracker.record_success(Subsystem::WifiReconnect);
        } else {
            self.tracker.record_failure(Subsystem::WifiReconnect);
        }
    }

    /// RTC read outcome
    pub fn record_clock_outcome(&mut self, success: bool) {
        if success {
            self.tracker.record_success(Subsystem::Clock);
        } else {
            self.tracker.record_failure(Subsystem::Clock);
        }
    }

    fn classify_fetch_error(
        &mut self,
        err: FetchError,
        api_subsystem: Subsystem,
        log: &mut impl Logger,
    ) {
        if err.is_permanent() {
            log.error("permanent API error, latching");
            self.tracker.latch_permanent_error();
        }
        if err.is_connectivity() {
            self.tracker.record_failure(Subsystem::Network);
        } else {
            self.tracker.record_failure(api_subsystem);
        }
    }

    // --- read-only diagnostics ---

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn api_stats(&self) -> ApiStats {
        self.tracker.get_api_stats()
    }

    pub fn image_cache_stats(&self) -> crate::cache::CacheStats {
        self.images.stats()
    }

    pub fn text_cache_stats(&self) -> crate::cache::CacheStats {
        self.text_widths.stats()
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Clears everything including the permanent-error latch. Only an
    /// explicit operator action reaches this.
    pub fn factory_reset(&mut self) {
        self.tracker.factory_reset();
    }

    // --- cycle internals ---

    fn age_snapshots(&mut self, elapsed_s: u32) {
        if self.weather.is_some() {
            self.weather_age_s = self.weather_age_s.saturating_add(elapsed_s);
            if self.weather_age_s > self.timing.weather_max_age_s as u32 {
                self.weather = None;
            }
        }
        if self.forecast.is_some() {
            self.forecast_age_s = self.forecast_age_s.saturating_add(elapsed_s);
        }
    }

    fn rapid_cycling(&self) -> bool {
        self.cycle_count > RAPID_CYCLE_ARM_COUNT
            && self.tracker.uptime_s()
                < self
                    .cycle_count
                    .saturating_mul(self.timing.fast_cycle_threshold_s as u32)
    }

    fn in_daily_reset_window(&self, now: &DeviceTime) -> bool {
        self.tracker.uptime_s() > DAILY_RESET_MIN_UPTIME_S
            && now.hour == self.timing.daily_reset_hour
            && now.minute < self.timing.restart_grace_min
    }

    fn roll_day_over(&mut self, now: &DeviceTime) {
        let today = (now.month, now.day);
        match self.last_date {
            Some(date) if date != today => {
                self.shown_today.clear();
                self.active_schedule = None;
                self.refresh_calendar = true;
                self.last_date = Some(today);
            }
            None => self.last_date = Some(today),
            _ => {}
        }
    }

    /// Once an active schedule's window closes, remember it so a
    /// duplicate window cannot replay it the same day
    fn track_schedule_exit(&mut self, now: &DeviceTime) {
        let finished = match self.active_schedule.as_ref() {
            Some(name) => {
                let still_active = self
                    .schedules
                    .iter()
                    .any(|s| s.name.as_str() == name.as_str() && s.matches(now.weekday, now.time_of_day()));
                if still_active {
                    None
                } else {
                    Some(name.clone())
                }
            }
            None => None,
        };

        if let Some(name) = finished {
            if !self.shown_today.iter().any(|n| n.as_str() == name.as_str()) {
                let _ = self.shown_today.push(name);
            }
            self.active_schedule = None;
        }
    }

    fn plan_fetches(&mut self, extended: bool) -> FetchPlan {
        let mut plan = FetchPlan::default();
        if extended {
            // Long recovery interval only
            let since = self
                .tracker
                .uptime_s()
                .saturating_sub(self.last_weather_attempt_s);
            if since >= self.timing.recovery_retry_s as u32 {
                plan.weather = self.options.should_fetch_weather();
            }
        } else {
            plan.weather = self.options.should_fetch_weather();
            plan.forecast = self.options.should_fetch_forecast()
                && (self.forecast.is_none()
                    || self.forecast_age_s >= self.timing.forecast_refresh_s as u32);
            if self.refresh_calendar {
                plan.events = true;
                plan.schedules = true;
                self.refresh_calendar = false;
            }
        }
        if plan.weather {
            self.last_weather_attempt_s = self.tracker.uptime_s();
        }
        plan
    }

    fn segment_durations(&self, has_event: bool, has_forecast: bool) -> (u16, u16, u16) {
        let forecast_s = if has_forecast { self.timing.forecast_s } else { 0 };
        let event_s = if has_event {
            self.timing.event_s.max(self.timing.min_event_s)
        } else {
            0
        };
        let weather_s = self
            .timing
            .cycle_s
            .saturating_sub(forecast_s)
            .saturating_sub(event_s);
        (weather_s, forecast_s, event_s)
    }

    fn build_playlist(
        &mut self,
        now: &DeviceTime,
        content: &CycleContent,
        assets: &mut impl AssetSource,
        log: &mut impl Logger,
    ) -> Vec<RenderDirective, MAX_PLAYLIST> {
        let mut playlist = Vec::new();
        match content {
            CycleContent::ClockOnly => {
                let page = self.clock_page(now, self.timing.clock_display_s);
                let _ = playlist.push(page);
            }
            CycleContent::Scheduled(schedule) => {
                let page = self.schedule_page(now, schedule, assets, log);
                let _ = playlist.push(page);
            }
            CycleContent::Standard { event } => {
                let weather = self.weather.clone();
                let forecast = self.forecast.clone();
                let has_forecast =
                    self.options.show_forecast && weather.is_some() && forecast.is_some();
                let (weather_s, forecast_s, event_s) =
                    self.segment_durations(event.is_some(), has_forecast);

                if has_forecast {
                    if let Some(forecast) = forecast.as_ref() {
                        let page = self.forecast_page(forecast, assets, log, forecast_s);
                        let _ = playlist.push(page);
                    }
                }

                match (self.options.show_weather, weather.as_ref()) {
                    (true, Some(snapshot)) => {
                        let page = self.weather_page(now, snapshot, assets, log, weather_s);
                        let _ = playlist.push(page);
                    }
                    _ => {
                        let page = self.clock_page(now, weather_s);
                        let _ = playlist.push(page);
                    }
                }

                if let Some(event) = event {
                    let page = self.event_page(now, event, assets, log, event_s);
                    let _ = playlist.push(page);
                }
            }
        }
        playlist
    }

    fn clock_page(&self, now: &DeviceTime, hold_s: u16) -> RenderDirective {
        let mut page = RenderDirective::new(ContentKind::Clock, hold_s);
        let date = format_date(now);
        let time = format_clock(now.hour, now.minute);
        let _ = page.push(DrawOp::text(
            self.layout.clock_date_x,
            self.layout.clock_date_y,
            date.as_str(),
            FontId::Small,
        ));
        let _ = page.push(DrawOp::text(
            self.layout.clock_time_x,
            self.layout.clock_time_y,
            time.as_str(),
            FontId::Big,
        ));
        self.push_day_marker(&mut page, now);
        page
    }

    fn weather_page(
        &mut self,
        now: &DeviceTime,
        snapshot: &WeatherSnapshot,
        assets: &mut impl AssetSource,
        log: &mut impl Logger,
        hold_s: u16,
    ) -> RenderDirective {
        let mut page = RenderDirective::new(ContentKind::Weather, hold_s);

        let (icon_path, icon) = self.resolve_image(weather_icon_path(snapshot.icon), assets, log);
        let icon_x = right_aligned_x(self.layout.right_edge, icon.width as u16);
        let _ = page.push(DrawOp::image(
            icon_x,
            self.layout.weather_icon_y,
            icon_path.as_str(),
        ));

        let temp = format_temp(snapshot.apparent_c());
        let _ = page.push(DrawOp::text(
            self.layout.weather_temp_x,
            self.layout.weather_temp_y,
            temp.as_str(),
            FontId::Big,
        ));

        let time = format_clock(now.hour, now.minute);
        let width = self.text_width(time.as_str(), FontId::Small, assets);
        let _ = page.push(DrawOp::text(
            right_aligned_x(self.layout.right_edge, width),
            self.layout.weather_time_y,
            time.as_str(),
            FontId::Small,
        ));

        // One pixel per UV index point, one per 10% humidity
        let _ = page.push(DrawOp::bar(
            self.layout.weather_temp_x,
            self.layout.uv_bar_y,
            snapshot.uv_index.min(12),
            1,
        ));
        let _ = page.push(DrawOp::bar(
            self.layout.weather_temp_x,
            self.layout.humidity_bar_y,
            snapshot.humidity_pct / 10,
            1,
        ));

        self.push_day_marker(&mut page, now);
        page
    }

    fn forecast_page(
        &mut self,
        forecast: &Forecast,
        assets: &mut impl AssetSource,
        log: &mut impl Logger,
        hold_s: u16,
    ) -> RenderDirective {
        let mut page = RenderDirective::new(ContentKind::Forecast, hold_s);

        // Three columns spanning the fetched range
        let picks = [0usize, 4, 8];
        for (col, &idx) in picks.iter().enumerate() {
            if let Some(hour) = forecast.get(idx) {
                let x = self.layout.forecast_col_x[col];
                let label = format_hour_label(hour.hour);
                let _ = page.push(DrawOp::text(
                    x,
                    self.layout.forecast_time_y,
                    label.as_str(),
                    FontId::Small,
                ));

                let (path, _) = self.resolve_image(forecast_icon_path(hour.icon), assets, log);
                let _ = page.push(DrawOp::image(x, self.layout.forecast_icon_y, path.as_str()));

                let temp = format_temp(hour.temperature_c());
                let _ = page.push(DrawOp::text(
                    x,
                    self.layout.forecast_temp_y,
                    temp.as_str(),
                    FontId::Small,
                ));
            }
        }
        page
    }

    fn event_page(
        &mut self,
        now: &DeviceTime,
        event: &EventRecord,
        assets: &mut impl AssetSource,
        log: &mut impl Logger,
        hold_s: u16,
    ) -> RenderDirective {
        let mut page = RenderDirective::new(ContentKind::DateEvent, hold_s);

        let (path, _) = self.resolve_image(event_image_path(event.image.as_str()), assets, log);
        let _ = page.push(DrawOp::image(
            self.layout.event_image_x,
            self.layout.event_image_y,
            path.as_str(),
        ));

        // Labels centered in the column left of the image
        let area_w = self.layout.event_image_x - self.layout.event_text_x;
        if !event.primary.is_empty() {
            let width = self.text_width(event.primary.as_str(), FontId::Small, assets);
            let _ = page.push(DrawOp::text_colored(
                centered_x(self.layout.event_text_x, area_w, width),
                self.layout.event_primary_y,
                event.primary.as_str(),
                FontId::Small,
                event.color.as_str(),
            ));
        }
        if !event.secondary.is_empty() {
            let width = self.text_width(event.secondary.as_str(), FontId::Small, assets);
            let _ = page.push(DrawOp::text_colored(
                centered_x(self.layout.event_text_x, area_w, width),
                self.layout.event_secondary_y,
                event.secondary.as_str(),
                FontId::Small,
                event.color.as_str(),
            ));
        }

        self.push_day_marker(&mut page, now);
        page
    }

    fn schedule_page(
        &mut self,
        now: &DeviceTime,
        schedule: &ScheduledDisplay,
        assets: &mut impl AssetSource,
        log: &mut impl Logger,
    ) -> RenderDirective {
        let t = now.time_of_day();
        // Hold at most one cycle; the window is re-evaluated next cycle
        let hold_s = (schedule.remaining_minutes(t) as u32 * 60).min(self.timing.cycle_s as u32) as u16;
        let mut page = RenderDirective::new(ContentKind::Schedule, hold_s);

        let (path, _) = self.resolve_image(schedule_image_path(schedule.image.as_str()), assets, log);
        let _ = page.push(DrawOp::image(
            self.layout.schedule_image_x,
            self.layout.schedule_image_y,
            path.as_str(),
        ));

        if schedule.progress_bar {
            let filled = (schedule.progress_pct(t) as u16 * self.layout.progress_bar_width as u16
                / 100) as u8;
            let _ = page.push(DrawOp::bar(
                self.layout.progress_bar_x,
                self.layout.progress_bar_y,
                filled,
                self.layout.progress_bar_height,
            ));
        }

        if let Some(snapshot) = self.weather.clone() {
            let temp = format_temp(snapshot.apparent_c());
            let _ = page.push(DrawOp::text(
                self.layout.schedule_text_x,
                self.layout.schedule_temp_y,
                temp.as_str(),
                FontId::Small,
            ));
        }

        self.push_day_marker(&mut page, now);
        page
    }

    fn push_day_marker(&self, page: &mut RenderDirective, now: &DeviceTime) {
        if self.options.show_weekday_indicator {
            let _ = page.push(DrawOp::day_marker(
                self.layout.day_marker_x,
                self.layout.day_marker_y,
                now.weekday,
                self.layout.day_marker_size,
            ));
        }
    }

    /// Measure through the width cache
    fn text_width(&mut self, text: &str, font: FontId, assets: &mut impl AssetSource) -> u16 {
        *self
            .text_widths
            .get_or_insert_with(TextKey::new(text, font), |key| {
                assets.measure_text(key.text.as_str(), key.font)
            })
    }

    /// Resolve through the image cache, falling back to the placeholder
    /// when the load fails. Returns the path actually referenced.
    fn resolve_image(
        &mut self,
        path: String<MAX_ASSET_LEN>,
        assets: &mut impl AssetSource,
        log: &mut impl Logger,
    ) -> (String<MAX_ASSET_LEN>, ImagePayload) {
        match self.images.get_or_load(path.clone(), |p| assets.load_image(p.as_str())) {
            Ok(image) => (path, *image),
            Err(_) => {
                log.warning("image load failed, using placeholder");
                let fallback: String<MAX_ASSET_LEN> = clip_str(paths::FALLBACK_EVENT_IMAGE);
                match self
                    .images
                    .get_or_load(fallback.clone(), |p| assets.load_image(p.as_str()))
                {
                    Ok(image) => (fallback, *image),
                    Err(_) => (
                        fallback,
                        ImagePayload {
                            handle: 0,
                            width: 0,
                            height: 0,
                        },
                    ),
                }
            }
        }
    }
}

// --- formatting helpers ---

fn format_date(now: &DeviceTime) -> String<16> {
    let mut s = String::new();
    let _ = write!(s, "{} {}", crate::calendar::month_abbrev(now.month), now.day);
    s
}

/// 12-hour clock with a single-letter suffix, "12:00A" at midnight
fn format_clock(hour: u8, minute: u8) -> String<8> {
    let (h, suffix) = match hour {
        0 => (12, 'A'),
        12 => (12, 'P'),
        h if h > 12 => (h - 12, 'P'),
        h => (h, 'A'),
    };
    let mut s = String::new();
    let _ = write!(s, "{}:{:02}{}", h, minute, suffix);
    s
}

fn format_hour_label(hour: u8) -> String<4> {
    let (h, suffix) = match hour {
        0 => (12, 'A'),
        12 => (12, 'P'),
        h if h > 12 => (h - 12, 'P'),
        h => (h, 'A'),
    };
    let mut s = String::new();
    let _ = write!(s, "{}{}", h, suffix);
    s
}

fn format_temp(celsius: i16) -> String<8> {
    let mut s = String::new();
    let _ = write!(s, "{}°", celsius);
    s
}

fn weather_icon_path(icon: u8) -> String<MAX_ASSET_LEN> {
    let mut p = String::new();
    let _ = write!(p, "{}/{}.bmp", paths::WEATHER_ICONS, icon);
    p
}

fn forecast_icon_path(icon: u8) -> String<MAX_ASSET_LEN> {
    let mut p = String::new();
    let _ = write!(p, "{}/{}.bmp", paths::COLUMN_IMAGES, icon);
    p
}

fn event_image_path(file: &str) -> String<MAX_ASSET_LEN> {
    if file.is_empty() {
        return clip_str(paths::FALLBACK_EVENT_IMAGE);
    }
    let mut p = String::new();
    let _ = write!(p, "{}/{}", paths::EVENT_IMAGES, file);
    p
}

fn schedule_image_path(file: &str) -> String<MAX_ASSET_LEN> {
    if file.is_empty() {
        return clip_str(paths::FALLBACK_EVENT_IMAGE);
    }
    let mut p = String::new();
    let _ = write!(p, "{}/{}", paths::SCHEDULE_IMAGES, file);
    p
}
