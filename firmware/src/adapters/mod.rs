//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements     | Connects to                    |
//! |----------------|----------------|--------------------------------|
//! | `config_store` | ConfigPort     | JSON file                      |
//! | `console`      | DisplayPort    | Serial console status line     |
//! | `http`         | HttpTransport  | nothing yet (offline)          |
//! | `log_sink`     | EventSink      | Serial / terminal log output   |
//! | `sim`          | SensorPort     | Drifting simulated climate     |
//! |                | WeatherClient  | Scripted reports               |
//! |                | DisplayPort    | Terminal ASCII art             |
//! | `time`         | Clock          | ESP32 system timer / `Instant` |
//!
//! The HTU21D sensor adapter lives in [`crate::sensors::htu21d`], next to
//! the sampling logic that drives it.

pub mod config_store;
pub mod console;
pub mod http;
pub mod log_sink;
pub mod sim;
pub mod time;
