//! Outbound application events.
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them, e.g. log to serial or keep for tests.

use crate::error::ErrorKind;
use crate::pet::{FrameIndex, MoodKind};
use crate::weather::WeatherReport;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The scheduler has started (carries the initial mood).
    Started { mood: MoodKind, weather_enabled: bool },

    /// The mood state machine moved.
    MoodChanged { from: MoodKind, to: MoodKind },

    /// The indoor sensor started failing; the stale value stays on screen.
    SensorLost(ErrorKind),

    /// The indoor sensor answered again after a failure streak.
    SensorRecovered { temp_c: f32 },

    /// A weather fetch completed successfully.
    WeatherUpdated(WeatherReport),

    /// A weather fetch attempt failed; the stale value stays on screen.
    WeatherFailed(ErrorKind),

    /// Frame transfers to the display started failing.
    DisplayLost(ErrorKind),

    /// Frame transfers succeed again.
    DisplayRecovered,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub uptime_ms: u64,
    pub ticks: u64,
    pub mood: MoodKind,
    pub frame: FrameIndex,
    pub indoor_temp_c: Option<f32>,
    pub indoor_humidity: Option<f32>,
    pub outdoor_temp_f: Option<f32>,
    pub sensor_failures: u32,
    pub weather_failures: u32,
    pub display_failures: u32,
}
