//! Mock adapters for integration tests.
//!
//! Each mock keeps its state behind `Rc` handles so a test can script
//! inputs and inspect the call history while the scheduler owns the
//! adapter itself.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tamapet::app::events::AppEvent;
use tamapet::app::ports::{
    DisplayPort, EventSink, IndoorReading, SensorPort, WeatherClient, WeatherFuture,
};
use tamapet::config::PetConfig;
use tamapet::error::ErrorKind;
use tamapet::render::PixelBuffer;
use tamapet::scheduler::Scheduler;
use tamapet::weather::WeatherReport;

// ── Shared bus record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    SensorRead,
    DisplayWrite,
}

pub type BusLog = Rc<RefCell<Vec<BusOp>>>;
pub type WeatherOutcome = Result<WeatherReport, ErrorKind>;

// ── Sensor ────────────────────────────────────────────────────

pub struct MockSensor {
    script: Rc<RefCell<VecDeque<Result<IndoorReading, ErrorKind>>>>,
    fallback: Rc<Cell<Result<IndoorReading, ErrorKind>>>,
    bus: BusLog,
}

impl SensorPort for MockSensor {
    fn read_indoor(&mut self) -> Result<IndoorReading, ErrorKind> {
        self.bus.borrow_mut().push(BusOp::SensorRead);
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.get())
    }
}

// ── Weather ───────────────────────────────────────────────────

/// Pending until the test fills the shared gate.
struct GatedFetch {
    gate: Rc<RefCell<Option<WeatherOutcome>>>,
}

impl Future for GatedFetch {
    type Output = WeatherOutcome;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.gate.borrow_mut().take() {
            Some(outcome) => Poll::Ready(outcome),
            None => Poll::Pending,
        }
    }
}

pub struct MockWeather {
    gate: Rc<RefCell<Option<WeatherOutcome>>>,
    fetches: Rc<RefCell<Vec<(String, String)>>>,
}

impl WeatherClient for MockWeather {
    fn fetch(&mut self, city: &str, api_key: &str) -> WeatherFuture {
        self.fetches
            .borrow_mut()
            .push((city.to_string(), api_key.to_string()));
        Box::pin(GatedFetch {
            gate: Rc::clone(&self.gate),
        })
    }
}

// ── Display ───────────────────────────────────────────────────

pub struct MockDisplay {
    frames: Rc<RefCell<Vec<PixelBuffer>>>,
    fail: Rc<Cell<bool>>,
    bus: BusLog,
}

impl DisplayPort for MockDisplay {
    fn write(&mut self, frame: &PixelBuffer) -> Result<(), ErrorKind> {
        self.bus.borrow_mut().push(BusOp::DisplayWrite);
        if self.fail.get() {
            return Err(ErrorKind::DisplayWriteFailed);
        }
        self.frames.borrow_mut().push(frame.clone());
        Ok(())
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub type MockScheduler = Scheduler<MockSensor, MockWeather, MockDisplay, SmallRng>;

/// Test-side handles onto every mock the scheduler owns.
pub struct Rig {
    pub scheduler: MockScheduler,
    pub sink: RecordingSink,
    pub bus: BusLog,
    pub sensor_script: Rc<RefCell<VecDeque<Result<IndoorReading, ErrorKind>>>>,
    pub sensor_fallback: Rc<Cell<Result<IndoorReading, ErrorKind>>>,
    pub weather_gate: Rc<RefCell<Option<WeatherOutcome>>>,
    pub fetches: Rc<RefCell<Vec<(String, String)>>>,
    pub frames: Rc<RefCell<Vec<PixelBuffer>>>,
    pub display_fail: Rc<Cell<bool>>,
}

#[allow(dead_code)]
impl Rig {
    pub fn new(config: &PetConfig, seed: u64) -> Self {
        let bus: BusLog = Rc::new(RefCell::new(Vec::new()));
        let sensor_script = Rc::new(RefCell::new(VecDeque::new()));
        let sensor_fallback = Rc::new(Cell::new(Err(ErrorKind::SensorUnavailable)));
        let weather_gate = Rc::new(RefCell::new(None));
        let fetches = Rc::new(RefCell::new(Vec::new()));
        let frames = Rc::new(RefCell::new(Vec::new()));
        let display_fail = Rc::new(Cell::new(false));

        let scheduler = Scheduler::new(
            config,
            MockSensor {
                script: Rc::clone(&sensor_script),
                fallback: Rc::clone(&sensor_fallback),
                bus: Rc::clone(&bus),
            },
            MockWeather {
                gate: Rc::clone(&weather_gate),
                fetches: Rc::clone(&fetches),
            },
            MockDisplay {
                frames: Rc::clone(&frames),
                fail: Rc::clone(&display_fail),
                bus: Rc::clone(&bus),
            },
            SmallRng::seed_from_u64(seed),
            0,
        );

        Self {
            scheduler,
            sink: RecordingSink::default(),
            bus,
            sensor_script,
            sensor_fallback,
            weather_gate,
            fetches,
            frames,
            display_fail,
        }
    }

    pub fn tick(&mut self, now: u64) -> tamapet::scheduler::TickReport {
        self.scheduler.tick(now, &mut self.sink)
    }

    /// Every subsequent read returns this temperature.
    pub fn set_indoor(&self, temp_c: f32) {
        self.sensor_fallback.set(reading(temp_c));
    }

    pub fn fail_sensor(&self) {
        self.sensor_fallback.set(Err(ErrorKind::SensorUnavailable));
    }

    pub fn resolve_weather(&self, outcome: WeatherOutcome) {
        *self.weather_gate.borrow_mut() = Some(outcome);
    }

    pub fn last_frame(&self) -> Option<PixelBuffer> {
        self.frames.borrow().last().cloned()
    }
}

pub fn reading(temp_c: f32) -> Result<IndoorReading, ErrorKind> {
    Ok(IndoorReading {
        temp_c,
        humidity: 45.0,
    })
}

/// Short intervals so scenarios stay readable.
pub fn fast_config() -> PetConfig {
    PetConfig {
        frame_time_ms: 500,
        mood_change_interval_ms: 5_000,
        weather_poll_interval_ms: 60_000,
        weather_timeout_ms: 3_000,
        telemetry_interval_ms: 30_000,
        ..PetConfig::default()
    }
}

#[allow(dead_code)]
pub fn weather_config() -> PetConfig {
    PetConfig {
        weather_api_key: heapless::String::try_from("test-key").unwrap(),
        weather_city: heapless::String::try_from("Reykjavik").unwrap(),
        ..fast_config()
    }
}
