//! Outdoor weather polling.
//!
//! [`WeatherPoller`] wraps a [`WeatherClient`] with the poll-interval and
//! deadline rules.  A fetch is started at most once per
//! `weather_poll_interval_ms`, measured from the *start* of the previous
//! attempt, so failures never cause a retry storm.  The fetch future is
//! polled once per tick and never blocked on:
//!
//! ```text
//!  tick ──▶ in flight? ──yes──▶ poll once ──▶ ready ──▶ Some(result)
//!              │                   │
//!              no                  └── pending ──▶ past deadline? ──▶ Some(Err(Timeout))
//!              ▼                                          │
//!           due? ──no──▶ None                             └── None
//!              │
//!             yes ──▶ stamp attempt, start fetch, poll once
//! ```

pub mod openweather;

use futures_lite::future;
use log::{debug, info, warn};

use crate::app::ports::{Millis, WeatherClient, WeatherFuture};
use crate::config::PetConfig;
use crate::error::ErrorKind;
use crate::pet::context::EnvironmentState;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Coarse outdoor sky condition (`weather[0].main` in the service schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sky {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Other,
}

impl Sky {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Drizzle" => Self::Drizzle,
            "Thunderstorm" => Self::Thunderstorm,
            "Snow" => Self::Snow,
            _ => Self::Other,
        }
    }

    /// Conditions that get the rain overlay.
    pub fn is_rainy(self) -> bool {
        matches!(self, Self::Rain | Self::Drizzle | Self::Thunderstorm)
    }
}

/// A successfully parsed weather observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReport {
    pub temp_f: f32,
    pub humidity: Option<f32>,
    pub sky: Option<Sky>,
}

// ---------------------------------------------------------------------------
// Poller
// ---------------------------------------------------------------------------

struct InFlight {
    started_ms: Millis,
    fetch: WeatherFuture,
}

/// Interval- and deadline-bounded driver around a [`WeatherClient`].
pub struct WeatherPoller<W> {
    client: W,
    city: heapless::String<64>,
    api_key: heapless::String<64>,
    interval_ms: Millis,
    timeout_ms: Millis,
    enabled: bool,
    in_flight: Option<InFlight>,
}

impl<W: WeatherClient> WeatherPoller<W> {
    pub fn new(config: &PetConfig, client: W) -> Self {
        let enabled = config.weather_enabled();
        if !enabled {
            info!("Weather: no API key or city configured, polling disabled");
        }
        Self {
            client,
            city: config.weather_city.clone(),
            api_key: config.weather_api_key.clone(),
            interval_ms: Millis::from(config.weather_poll_interval_ms),
            timeout_ms: Millis::from(config.weather_timeout_ms),
            enabled,
            in_flight: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a new attempt may start at `now`.
    pub fn is_due(&self, now: Millis, last_attempt_ms: Option<Millis>) -> bool {
        self.enabled
            && self.in_flight.is_none()
            && last_attempt_ms.is_none_or(|last| now.saturating_sub(last) >= self.interval_ms)
    }

    /// Advance the weather task by one tick.
    ///
    /// Returns `None` when nothing completed this tick (not due, or still
    /// waiting).  On completion the outcome is applied to `env` and also
    /// returned: success overwrites the outdoor values, failure only
    /// records the error and leaves the stale values in place.
    pub fn poll_if_due(
        &mut self,
        now: Millis,
        env: &mut EnvironmentState,
    ) -> Option<Result<WeatherReport, ErrorKind>> {
        if self.in_flight.is_none() {
            if !self.is_due(now, env.last_weather_fetch_ms) {
                return None;
            }
            debug!("Weather: starting fetch for '{}'", self.city);
            env.last_weather_fetch_ms = Some(now);
            self.in_flight = Some(InFlight {
                started_ms: now,
                fetch: self.client.fetch(&self.city, &self.api_key),
            });
        }

        let outcome = self.poll_in_flight(now)?;
        Self::apply(&outcome, env);
        Some(outcome)
    }

    fn poll_in_flight(&mut self, now: Millis) -> Option<Result<WeatherReport, ErrorKind>> {
        let flight = self.in_flight.as_mut()?;

        if let Some(result) = future::block_on(future::poll_once(flight.fetch.as_mut())) {
            self.in_flight = None;
            return Some(result);
        }

        if now.saturating_sub(flight.started_ms) >= self.timeout_ms {
            warn!(
                "Weather: fetch abandoned after {} ms",
                now.saturating_sub(flight.started_ms)
            );
            self.in_flight = None;
            return Some(Err(ErrorKind::Timeout));
        }

        None
    }

    fn apply(outcome: &Result<WeatherReport, ErrorKind>, env: &mut EnvironmentState) {
        match outcome {
            Ok(report) => {
                env.outdoor_temp_f = Some(report.temp_f);
                if report.humidity.is_some() {
                    env.outdoor_humidity = report.humidity;
                }
                if report.sky.is_some() {
                    env.outdoor_sky = report.sky;
                }
                env.last_weather_error = None;
            }
            Err(kind) => {
                env.last_weather_error = Some(*kind);
            }
        }
    }
}
