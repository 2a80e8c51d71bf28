//! Long-lived state owned by the scheduler.
//!
//! [`PetState`] is what the pet is doing; [`EnvironmentState`] is what the
//! pet knows about the world.  Both are created once at boot, mutated in
//! place every tick, and never reset short of a power cycle.

use super::{FrameIndex, MoodKind};
use crate::app::ports::Millis;
use crate::error::ErrorKind;
use crate::weather::Sky;

// ---------------------------------------------------------------------------
// Pet state (written by MoodEngine and AnimationClock only)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetState {
    pub mood: MoodKind,
    pub frame: FrameIndex,
    /// When `frame` last changed (or the mood last restarted its animation).
    pub last_frame_change_ms: Millis,
    /// When the mood was last evaluated.
    pub last_mood_change_ms: Millis,
}

impl PetState {
    /// Boot state: happy, first frame, both timers starting at `now`.
    pub fn new(now: Millis) -> Self {
        Self {
            mood: MoodKind::Happy,
            frame: FrameIndex::First,
            last_frame_change_ms: now,
            last_mood_change_ms: now,
        }
    }
}

// ---------------------------------------------------------------------------
// Environment state (written by the sensor and weather adapters)
// ---------------------------------------------------------------------------

/// Latest known readings.  Each field is independently optional: a failing
/// sensor never clears the outdoor values and vice versa, and a failed read
/// or fetch keeps the stale value instead of clearing it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentState {
    /// Indoor temperature (°C), calibrated.
    pub indoor_temp_c: Option<f32>,
    /// Indoor relative humidity (%), calibrated and clamped.
    pub indoor_humidity: Option<f32>,
    /// Outdoor temperature (°F) from the last successful fetch.
    pub outdoor_temp_f: Option<f32>,
    /// Outdoor relative humidity (%) from the last successful fetch.
    pub outdoor_humidity: Option<f32>,
    /// Outdoor sky condition from the last successful fetch.
    pub outdoor_sky: Option<Sky>,
    /// Time of the last *successful* sensor read.
    pub last_sensor_read_ms: Option<Millis>,
    /// Time of the last weather fetch *attempt*, successful or not.
    pub last_weather_fetch_ms: Option<Millis>,
    /// Outcome of the most recent completed weather attempt.
    pub last_weather_error: Option<ErrorKind>,
}

impl EnvironmentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last known sky calls for the rain overlay.
    pub fn is_raining(&self) -> bool {
        self.outdoor_sky.is_some_and(Sky::is_rainy)
    }
}
