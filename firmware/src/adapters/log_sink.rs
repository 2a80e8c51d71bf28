//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each application event as one tagged
//! log line.  On the device that is the ESP-IDF logger (UART / USB-CDC);
//! on hosts it is whatever subscriber the binary installed.

use core::fmt;

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// `Option<f32>` with one decimal, `--` when absent.
struct Reading(Option<f32>);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.1}"),
            None => write!(f, "--"),
        }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | up={}s ticks={} | mood={} frame={} | \
                     in={}\u{00b0}C/{}% out={}\u{00b0}F | \
                     fail sensor={} weather={} display={}",
                    t.uptime_ms / 1_000,
                    t.ticks,
                    t.mood.name(),
                    t.frame.index(),
                    Reading(t.indoor_temp_c),
                    Reading(t.indoor_humidity),
                    Reading(t.outdoor_temp_f),
                    t.sensor_failures,
                    t.weather_failures,
                    t.display_failures,
                );
            }
            AppEvent::MoodChanged { from, to } => {
                info!("MOOD | {} -> {}", from.name(), to.name());
            }
            AppEvent::SensorLost(kind) => {
                warn!("SENSOR | lost: {}", kind);
            }
            AppEvent::SensorRecovered { temp_c } => {
                info!("SENSOR | recovered, {:.1}\u{00b0}C", temp_c);
            }
            AppEvent::WeatherUpdated(report) => {
                info!(
                    "WEATHER | {:.1}\u{00b0}F humidity={} sky={:?}",
                    report.temp_f,
                    Reading(report.humidity),
                    report.sky,
                );
            }
            AppEvent::WeatherFailed(kind) => {
                warn!("WEATHER | fetch failed: {}", kind);
            }
            AppEvent::DisplayLost(kind) => {
                warn!("DISPLAY | lost: {}", kind);
            }
            AppEvent::DisplayRecovered => {
                info!("DISPLAY | recovered");
            }
            AppEvent::Started {
                mood,
                weather_enabled,
            } => {
                info!(
                    "START | mood={} weather={}",
                    mood.name(),
                    if *weather_enabled { "on" } else { "off" }
                );
            }
        }
    }
}
