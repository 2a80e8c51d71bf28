//! System configuration parameters
//!
//! All tunable parameters for the Tamapet device.  Immutable for the
//! process lifetime once loaded; keys are camelCase in the JSON form
//! (`frameTimeMs`, `weatherApiKey`, ...).  Missing keys take defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// API key value shipped in the sample config; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Core device configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PetConfig {
    // --- Network ---
    /// WiFi network name (empty = offline)
    pub wifi_ssid: heapless::String<32>,
    /// WiFi passphrase (empty = open network)
    pub wifi_password: heapless::String<64>,
    /// OpenWeather API key
    pub weather_api_key: heapless::String<64>,
    /// City name passed to the weather service
    pub weather_city: heapless::String<64>,

    // --- Timing ---
    /// Animation frame period (milliseconds)
    pub frame_time_ms: u32,
    /// Minimum time between mood evaluations (milliseconds)
    pub mood_change_interval_ms: u32,
    /// Minimum time between weather fetch attempts (milliseconds)
    pub weather_poll_interval_ms: u32,
    /// Deadline for one in-flight weather fetch (milliseconds)
    pub weather_timeout_ms: u32,
    /// Minimum time between sensor reads (0 = every tick)
    pub sensor_read_interval_ms: u32,
    /// Telemetry report interval (milliseconds)
    pub telemetry_interval_ms: u32,

    // --- Mood thresholds ---
    /// Indoor temperature (Celsius) above which the pet is sad
    pub hot_threshold_c: f32,
    /// Lower bound of the comfort band (Celsius, inclusive)
    pub comfort_min_c: f32,
    /// Upper bound of the comfort band (Celsius, inclusive)
    pub comfort_max_c: f32,

    // --- Sensor calibration ---
    /// Added to every raw temperature reading (Celsius)
    pub temp_offset_c: f32,
    /// Added to every raw humidity reading (%RH) before clamping
    pub humidity_offset: f32,

    /// Fixed seed for the mood fallback RNG; `None` seeds from the clock.
    pub mood_seed: Option<u64>,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            // Network
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
            weather_api_key: heapless::String::new(),
            weather_city: heapless::String::new(),

            // Timing
            frame_time_ms: 500,
            mood_change_interval_ms: 900_000,  // 15 min
            weather_poll_interval_ms: 600_000, // 10 min
            weather_timeout_ms: 10_000,
            sensor_read_interval_ms: 0,
            telemetry_interval_ms: 60_000, // 1/min

            // Mood thresholds
            hot_threshold_c: 30.0,
            comfort_min_c: 20.0,
            comfort_max_c: 25.0,

            // Calibration
            temp_offset_c: 0.0,
            humidity_offset: 0.0,

            mood_seed: None,
        }
    }
}

impl PetConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_time_ms == 0 {
            return Err(ConfigError::ValidationFailed("frameTimeMs must be > 0"));
        }
        if self.mood_change_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "moodChangeIntervalMs must be > 0",
            ));
        }
        if self.weather_poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "weatherPollIntervalMs must be > 0",
            ));
        }
        if self.weather_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("weatherTimeoutMs must be > 0"));
        }
        if self.telemetry_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "telemetryIntervalMs must be > 0",
            ));
        }

        let thresholds = [
            self.hot_threshold_c,
            self.comfort_min_c,
            self.comfort_max_c,
            self.temp_offset_c,
            self.humidity_offset,
        ];
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(ConfigError::ValidationFailed(
                "thresholds and offsets must be finite",
            ));
        }
        if self.comfort_min_c > self.comfort_max_c {
            return Err(ConfigError::ValidationFailed(
                "comfortMinC must not exceed comfortMaxC",
            ));
        }

        validate_ssid(&self.wifi_ssid)?;
        validate_password(&self.wifi_password)?;
        Ok(())
    }

    /// Whether the weather poller should perform any I/O at all.
    pub fn weather_enabled(&self) -> bool {
        !self.weather_api_key.is_empty()
            && self.weather_api_key.as_str() != PLACEHOLDER_API_KEY
            && !self.weather_city.is_empty()
    }

    /// Seed for the mood RNG: `moodSeed` when pinned, else `entropy`.
    pub fn rng_seed(&self, entropy: u64) -> u64 {
        self.mood_seed.unwrap_or(entropy)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|e| {
            log::warn!("Config parse error: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }
}

// ───────────────────────────────────────────────────────────────
// WiFi credential validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// Empty means "offline"; otherwise 1-32 printable ASCII bytes.
fn validate_ssid(ssid: &str) -> Result<(), ConfigError> {
    if !is_printable_ascii(ssid) {
        return Err(ConfigError::ValidationFailed(
            "wifiSsid must be printable ASCII",
        ));
    }
    Ok(())
}

/// Empty means "open network"; WPA2 needs 8-64 bytes.
fn validate_password(password: &str) -> Result<(), ConfigError> {
    if !password.is_empty() && password.len() < 8 {
        return Err(ConfigError::ValidationFailed(
            "wifiPassword must be empty or at least 8 bytes",
        ));
    }
    Ok(())
}
