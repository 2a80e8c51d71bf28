//! Indoor sensing: the HTU21D driver and the [`IndoorSampler`] that
//! applies cadence and calibration before readings reach
//! [`EnvironmentState`].
//!
//! A failed read never touches the stored values, so the screen keeps the
//! last good reading (or its placeholder) and never shows a half-read one.

pub mod htu21d;

use log::trace;

use crate::app::ports::{IndoorReading, Millis, SensorPort};
use crate::config::PetConfig;
use crate::error::ErrorKind;
use crate::pet::context::EnvironmentState;

pub struct IndoorSampler<S> {
    sensor: S,
    interval_ms: Millis,
    temp_offset_c: f32,
    humidity_offset: f32,
    last_attempt_ms: Option<Millis>,
}

impl<S: SensorPort> IndoorSampler<S> {
    pub fn new(config: &PetConfig, sensor: S) -> Self {
        Self {
            sensor,
            interval_ms: Millis::from(config.sensor_read_interval_ms),
            temp_offset_c: config.temp_offset_c,
            humidity_offset: config.humidity_offset,
            last_attempt_ms: None,
        }
    }

    /// An interval of 0 samples on every tick.
    pub fn is_due(&self, now: Millis) -> bool {
        self.last_attempt_ms
            .is_none_or(|last| now.saturating_sub(last) >= self.interval_ms)
    }

    /// Offsets applied, humidity clamped to 0..=100.
    pub fn calibrate(&self, raw: IndoorReading) -> IndoorReading {
        IndoorReading {
            temp_c: raw.temp_c + self.temp_offset_c,
            humidity: (raw.humidity + self.humidity_offset).clamp(0.0, 100.0),
        }
    }

    /// Read the sensor if due.  On success the calibrated reading is stored
    /// in `env` and `last_sensor_read_ms` advances; on failure `env` is left
    /// exactly as it was.
    pub fn sample(
        &mut self,
        now: Millis,
        env: &mut EnvironmentState,
    ) -> Option<Result<IndoorReading, ErrorKind>> {
        if !self.is_due(now) {
            return None;
        }
        self.last_attempt_ms = Some(now);

        let outcome = self.sensor.read_indoor().and_then(|raw| {
            if raw.temp_c.is_finite() && raw.humidity.is_finite() {
                Ok(self.calibrate(raw))
            } else {
                Err(ErrorKind::SensorUnavailable)
            }
        });

        if let Ok(reading) = outcome {
            trace!(
                "Sensor: {:.2} C, {:.1} %RH",
                reading.temp_c, reading.humidity
            );
            env.indoor_temp_c = Some(reading.temp_c);
            env.indoor_humidity = Some(reading.humidity);
            env.last_sensor_read_ms = Some(now);
        }
        Some(outcome)
    }
}
