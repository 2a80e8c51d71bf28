//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Scheduler (domain)
//! ```
//!
//! Driven adapters (sensor, weather transport, display bus, event sinks,
//! config storage) implement these traits.  The
//! [`Scheduler`](crate::scheduler::Scheduler) consumes them via generics,
//! so the domain core never touches hardware directly.
//!
//! All port errors are [`ErrorKind`]s and none of them is fatal.

use core::future::Future;
use core::pin::Pin;

use crate::config::PetConfig;
use crate::error::{ConfigError, ErrorKind};
use crate::render::PixelBuffer;
use crate::weather::WeatherReport;

/// Monotonic milliseconds since boot.
pub type Millis = u64;

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One raw indoor measurement, before calibration offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndoorReading {
    pub temp_c: f32,
    pub humidity: f32,
}

/// Fallible read of indoor temperature and humidity.
///
/// Implementations own the bus for the duration of the call and must
/// return within a bounded time (the sensor's conversion time).
pub trait SensorPort {
    fn read_indoor(&mut self) -> Result<IndoorReading, ErrorKind>;
}

// ───────────────────────────────────────────────────────────────
// Weather port (driven adapter: network → domain)
// ───────────────────────────────────────────────────────────────

/// An in-flight weather fetch.  Polled once per tick, never blocked on.
pub type WeatherFuture = Pin<Box<dyn Future<Output = Result<WeatherReport, ErrorKind>>>>;

/// Starts a fetch of the current outdoor weather.
///
/// `fetch` itself must not perform blocking I/O; the work happens as the
/// returned future is polled.  Dropping the future abandons the request.
pub trait WeatherClient {
    fn fetch(&mut self, city: &str, api_key: &str) -> WeatherFuture;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → display bus)
// ───────────────────────────────────────────────────────────────

/// Transfers a finished frame to the panel.  A failure skips this frame;
/// the next tick simply tries again.
pub trait DisplayPort {
    fn write(&mut self, frame: &PixelBuffer) -> Result<(), ErrorKind>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: storage → domain)
// ───────────────────────────────────────────────────────────────

/// Loads device configuration.
///
/// Implementations MUST validate before returning; invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<PetConfig, ConfigError>;
}
