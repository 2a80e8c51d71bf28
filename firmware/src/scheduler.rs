//! Cooperative tick scheduler.
//!
//! One [`Scheduler::tick`] is one pass over every sub-task, each gated by
//! its own interval.  Nothing in a tick blocks on anything else: the
//! weather fetch is a future polled once, the sensor read is bounded by
//! its conversion time, and the frame is rendered and sent on every tick.
//!
//! ```text
//!  tick(now)
//!    │
//!    ├─ 1. sensor     IndoorSampler::sample      ─┐ bus
//!    ├─ 2. weather    WeatherPoller::poll_if_due  │
//!    ├─ 3. mood       MoodEngine::update          │
//!    ├─ 4. animation  AnimationClock::update      │
//!    ├─ 5. render     render::draw                │
//!    ├─ 6. display    DisplayPort::write         ─┘ bus
//!    └─ 7. telemetry  (every telemetry_interval_ms)
//! ```
//!
//! Steps run in that order, so each sees what the earlier ones wrote in
//! the same tick.  The sensor read and display write share the I²C bus
//! and are never in flight together because they run sequentially on
//! the one thread.
//!
//! Every failure is absorbed here: counted, reported through the
//! [`EventSink`], and the tick carries on with whatever state is known.

use log::{debug, info};
use rand::RngCore;

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::{DisplayPort, EventSink, IndoorReading, Millis, SensorPort, WeatherClient};
use crate::config::PetConfig;
use crate::error::ErrorKind;
use crate::pet::FrameIndex;
use crate::pet::animation::AnimationClock;
use crate::pet::context::{EnvironmentState, PetState};
use crate::pet::mood::{MoodChange, MoodEngine};
use crate::render::{self, Scene};
use crate::sensors::IndoorSampler;
use crate::weather::{WeatherPoller, WeatherReport};

// ═══════════════════════════════════════════════════════════════
//  Bookkeeping
// ═══════════════════════════════════════════════════════════════

/// Per-kind failure totals since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureCounters {
    counts: [u32; ErrorKind::COUNT],
}

impl FailureCounters {
    pub fn record(&mut self, kind: ErrorKind) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(1);
    }

    pub fn get(&self, kind: ErrorKind) -> u32 {
        self.counts[kind.index()]
    }

    fn weather(&self) -> u32 {
        self.get(ErrorKind::NetworkUnavailable)
            .saturating_add(self.get(ErrorKind::Timeout))
            .saturating_add(self.get(ErrorKind::MalformedResponse))
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// `None` when the sensor was not due.
    pub sensor: Option<Result<IndoorReading, ErrorKind>>,
    /// `None` when no weather attempt completed this tick.
    pub weather: Option<Result<WeatherReport, ErrorKind>>,
    pub mood_change: Option<MoodChange>,
    pub frame: FrameIndex,
    pub frame_toggled: bool,
    pub display: Result<(), ErrorKind>,
    pub telemetry_emitted: bool,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

pub struct Scheduler<S, W, D, R> {
    pet: PetState,
    env: EnvironmentState,
    sampler: IndoorSampler<S>,
    weather: WeatherPoller<W>,
    mood: MoodEngine<R>,
    animation: AnimationClock,
    display: D,

    failures: FailureCounters,
    sensor_healthy: bool,
    display_healthy: bool,

    boot_ms: Millis,
    ticks: u64,
    telemetry_interval_ms: Millis,
    last_telemetry_ms: Millis,
}

impl<S, W, D, R> Scheduler<S, W, D, R>
where
    S: SensorPort,
    W: WeatherClient,
    D: DisplayPort,
    R: RngCore,
{
    /// Build the scheduler with boot-time state at `now`.
    pub fn new(
        config: &PetConfig,
        sensor: S,
        weather: W,
        display: D,
        rng: R,
        now: Millis,
    ) -> Self {
        Self {
            pet: PetState::new(now),
            env: EnvironmentState::new(),
            sampler: IndoorSampler::new(config, sensor),
            weather: WeatherPoller::new(config, weather),
            mood: MoodEngine::new(config, rng),
            animation: AnimationClock::new(config.frame_time_ms),
            display,
            failures: FailureCounters::default(),
            sensor_healthy: true,
            display_healthy: true,
            boot_ms: now,
            ticks: 0,
            telemetry_interval_ms: Millis::from(config.telemetry_interval_ms),
            last_telemetry_ms: now,
        }
    }

    /// Announce the initial state.  Call once before the first tick.
    pub fn start(&mut self, sink: &mut dyn EventSink) {
        sink.emit(&AppEvent::Started {
            mood: self.pet.mood,
            weather_enabled: self.weather.is_enabled(),
        });
    }

    /// Run one cooperative pass.  Never fails and never blocks beyond the
    /// sensor's bounded read.
    pub fn tick(&mut self, now: Millis, sink: &mut dyn EventSink) -> TickReport {
        self.ticks = self.ticks.wrapping_add(1);

        let sensor = self.sampler.sample(now, &mut self.env);
        if let Some(outcome) = &sensor {
            self.on_sensor(outcome, sink);
        }

        let weather = self.weather.poll_if_due(now, &mut self.env);
        match &weather {
            Some(Ok(report)) => sink.emit(&AppEvent::WeatherUpdated(*report)),
            Some(Err(kind)) => {
                self.failures.record(*kind);
                sink.emit(&AppEvent::WeatherFailed(*kind));
            }
            None => {}
        }

        let mood_change = self.mood.update(now, &self.env, &mut self.pet);
        if let Some(change) = mood_change {
            sink.emit(&AppEvent::MoodChanged {
                from: change.from,
                to: change.to,
            });
        }

        let before = self.pet.frame;
        let frame = self.animation.update(&mut self.pet, now);

        let buffer = render::draw(&Scene::from_state(&self.pet, &self.env));
        let display = self.display.write(&buffer);
        self.on_display(display, sink);

        let telemetry_emitted = self.telemetry_due(now);
        if telemetry_emitted {
            self.last_telemetry_ms = now;
            sink.emit(&AppEvent::Telemetry(self.telemetry(now)));
        }

        TickReport {
            sensor,
            weather,
            mood_change,
            frame,
            frame_toggled: frame != before,
            display,
            telemetry_emitted,
        }
    }

    fn on_sensor(
        &mut self,
        outcome: &Result<IndoorReading, ErrorKind>,
        sink: &mut dyn EventSink,
    ) {
        match outcome {
            Ok(reading) => {
                if !self.sensor_healthy {
                    self.sensor_healthy = true;
                    sink.emit(&AppEvent::SensorRecovered {
                        temp_c: reading.temp_c,
                    });
                }
            }
            Err(kind) => {
                self.failures.record(*kind);
                if self.sensor_healthy {
                    self.sensor_healthy = false;
                    sink.emit(&AppEvent::SensorLost(*kind));
                } else {
                    debug!("Sensor: still unavailable ({})", kind);
                }
            }
        }
    }

    fn on_display(&mut self, outcome: Result<(), ErrorKind>, sink: &mut dyn EventSink) {
        match outcome {
            Ok(()) => {
                if !self.display_healthy {
                    self.display_healthy = true;
                    sink.emit(&AppEvent::DisplayRecovered);
                }
            }
            Err(kind) => {
                self.failures.record(kind);
                if self.display_healthy {
                    self.display_healthy = false;
                    sink.emit(&AppEvent::DisplayLost(kind));
                }
            }
        }
    }

    fn telemetry_due(&self, now: Millis) -> bool {
        self.telemetry_interval_ms > 0
            && now.saturating_sub(self.last_telemetry_ms) >= self.telemetry_interval_ms
    }

    /// Snapshot for the periodic telemetry event.
    pub fn telemetry(&self, now: Millis) -> TelemetryData {
        TelemetryData {
            uptime_ms: now.saturating_sub(self.boot_ms),
            ticks: self.ticks,
            mood: self.pet.mood,
            frame: self.pet.frame,
            indoor_temp_c: self.env.indoor_temp_c,
            indoor_humidity: self.env.indoor_humidity,
            outdoor_temp_f: self.env.outdoor_temp_f,
            sensor_failures: self.failures.get(ErrorKind::SensorUnavailable),
            weather_failures: self.failures.weather(),
            display_failures: self.failures.get(ErrorKind::DisplayWriteFailed),
        }
    }

    /// Show a splash frame (boot messages).  Failure is logged and ignored.
    pub fn show_splash(&mut self, lines: &[&str]) {
        if let Err(kind) = self.display.write(&render::splash(lines)) {
            info!("Display: splash not shown ({})", kind);
        }
    }

    pub fn pet(&self) -> &PetState {
        &self.pet
    }

    pub fn env(&self) -> &EnvironmentState {
        &self.env
    }

    pub fn failures(&self) -> &FailureCounters {
        &self.failures
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_weather_in_flight(&self) -> bool {
        self.weather.is_in_flight()
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
