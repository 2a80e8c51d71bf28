//! Unified error types for the Tamapet firmware.
//!
//! Every per-tick failure funnels into the single [`ErrorKind`] enum.  All
//! variants are `Copy` so they can be stored in `EnvironmentState`, carried
//! in events and counted without allocation.  None of them is fatal: the
//! scheduler recovers from each one inside the tick that produced it.

use core::fmt;

// ---------------------------------------------------------------------------
// Runtime errors
// ---------------------------------------------------------------------------

/// Failure kinds reported by the sensor, weather and display ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The indoor sensor did not answer, or answered with unusable data.
    SensorUnavailable,
    /// No network route to the weather service.
    NetworkUnavailable,
    /// A weather fetch exceeded its deadline and was abandoned.
    Timeout,
    /// The weather service answered with something other than the expected schema.
    MalformedResponse,
    /// Transferring the frame to the display failed.
    DisplayWriteFailed,
}

impl ErrorKind {
    /// Number of variants; sizes the per-kind failure counters.
    pub const COUNT: usize = 5;

    /// Dense index used by [`crate::scheduler::FailureCounters`].
    pub const fn index(self) -> usize {
        match self {
            Self::SensorUnavailable => 0,
            Self::NetworkUnavailable => 1,
            Self::Timeout => 2,
            Self::MalformedResponse => 3,
            Self::DisplayWriteFailed => 4,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorUnavailable => write!(f, "sensor unavailable"),
            Self::NetworkUnavailable => write!(f, "network unavailable"),
            Self::Timeout => write!(f, "timed out"),
            Self::MalformedResponse => write!(f, "malformed response"),
            Self::DisplayWriteFailed => write!(f, "display write failed"),
        }
    }
}

impl core::error::Error for ErrorKind {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`ConfigPort`](crate::app::ports::ConfigPort) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No stored config (first boot, or no file given).
    NotFound,
    /// The backing store exists but could not be read.
    Io,
    /// Stored config failed to deserialize (bad JSON, string too long).
    Corrupted,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Io => write!(f, "config I/O error"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl core::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, ErrorKind>;
