//! Host simulation adapters.
//!
//! Stand-ins for the board peripherals so the full cooperative loop runs
//! on a development machine:
//!
//! - [`SimSensor`]: indoor climate drifting slowly between bounds, with
//!   an optional dropout every N reads.
//! - [`SimWeather`]: cycles through scripted reports, each arriving a
//!   few polls after the fetch starts.
//! - [`TerminalDisplay`]: prints the frame as ASCII art whenever it
//!   differs from the last one shown.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::io::Write;

use crate::app::ports::{DisplayPort, IndoorReading, SensorPort, WeatherClient, WeatherFuture};
use crate::error::ErrorKind;
use crate::render::PixelBuffer;
use crate::weather::WeatherReport;

// ───────────────────────────────────────────────────────────────
// Sensor
// ───────────────────────────────────────────────────────────────

pub struct SimSensor {
    temp_c: f32,
    humidity: f32,
    step_c: f32,
    min_c: f32,
    max_c: f32,
    dropout_every: Option<u32>,
    reads: u32,
}

impl SimSensor {
    /// Drifts by `step_c` per read between `min_c` and `max_c`.
    pub fn new(start_c: f32, min_c: f32, max_c: f32, step_c: f32) -> Self {
        Self {
            temp_c: start_c.clamp(min_c, max_c),
            humidity: 45.0,
            step_c,
            min_c,
            max_c,
            dropout_every: None,
            reads: 0,
        }
    }

    /// Every `n`th read fails with [`ErrorKind::SensorUnavailable`].
    #[must_use]
    pub fn with_dropouts(mut self, n: u32) -> Self {
        self.dropout_every = (n > 0).then_some(n);
        self
    }
}

impl SensorPort for SimSensor {
    fn read_indoor(&mut self) -> Result<IndoorReading, ErrorKind> {
        self.reads = self.reads.wrapping_add(1);
        if self.dropout_every.is_some_and(|n| self.reads % n == 0) {
            return Err(ErrorKind::SensorUnavailable);
        }

        let next = self.temp_c + self.step_c;
        if next > self.max_c || next < self.min_c {
            self.step_c = -self.step_c;
        }
        self.temp_c = (self.temp_c + self.step_c).clamp(self.min_c, self.max_c);
        self.humidity = (self.humidity - self.step_c).clamp(20.0, 80.0);

        Ok(IndoorReading {
            temp_c: self.temp_c,
            humidity: self.humidity,
        })
    }
}

// ───────────────────────────────────────────────────────────────
// Weather
// ───────────────────────────────────────────────────────────────

/// Resolves after a fixed number of pending polls.
struct Delayed {
    remaining_polls: u32,
    outcome: Result<WeatherReport, ErrorKind>,
}

impl Future for Delayed {
    type Output = Result<WeatherReport, ErrorKind>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.remaining_polls == 0 {
            return Poll::Ready(self.outcome);
        }
        self.remaining_polls -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

pub struct SimWeather {
    script: Vec<Result<WeatherReport, ErrorKind>>,
    latency_polls: u32,
    next: usize,
}

impl SimWeather {
    pub fn new(script: Vec<Result<WeatherReport, ErrorKind>>, latency_polls: u32) -> Self {
        Self {
            script,
            latency_polls,
            next: 0,
        }
    }

    pub fn fetches(&self) -> usize {
        self.next
    }
}

impl WeatherClient for SimWeather {
    fn fetch(&mut self, _city: &str, _api_key: &str) -> WeatherFuture {
        let outcome = if self.script.is_empty() {
            Err(ErrorKind::NetworkUnavailable)
        } else {
            self.script[self.next % self.script.len()]
        };
        self.next = self.next.wrapping_add(1);
        Box::pin(Delayed {
            remaining_polls: self.latency_polls,
            outcome,
        })
    }
}

// ───────────────────────────────────────────────────────────────
// Display
// ───────────────────────────────────────────────────────────────

/// Writes changed frames to any [`Write`] sink (stdout by default).
pub struct TerminalDisplay<O = std::io::Stdout> {
    out: O,
    last: Option<PixelBuffer>,
    frames_shown: u32,
}

impl TerminalDisplay {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<O: Write> TerminalDisplay<O> {
    pub fn new(out: O) -> Self {
        Self {
            out,
            last: None,
            frames_shown: 0,
        }
    }

    pub fn frames_shown(&self) -> u32 {
        self.frames_shown
    }

    pub fn into_inner(self) -> O {
        self.out
    }

    fn show(&mut self, frame: &PixelBuffer) -> std::io::Result<()> {
        // Home the cursor and clear, then draw.
        write!(self.out, "\x1b[H\x1b[2J{}", frame.to_ascii())?;
        self.out.flush()
    }
}

impl<O: Write> DisplayPort for TerminalDisplay<O> {
    fn write(&mut self, frame: &PixelBuffer) -> Result<(), ErrorKind> {
        if self.last.as_ref() == Some(frame) {
            return Ok(());
        }
        self.show(frame).map_err(|e| {
            log::debug!("Display: terminal write failed: {}", e);
            ErrorKind::DisplayWriteFailed
        })?;
        self.last = Some(frame.clone());
        self.frames_shown = self.frames_shown.wrapping_add(1);
        Ok(())
    }
}
