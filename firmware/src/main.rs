//! Tamapet firmware entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Htu21d / SimSensor   OpenWeatherClient / SimWeather           │
//! │  (SensorPort)         (WeatherClient)                          │
//! │  ConsoleStatus /      LogEventSink      JsonConfigStore        │
//! │  TerminalDisplay                                               │
//! │  (DisplayPort)        (EventSink)       (ConfigPort)           │
//! │  MonotonicClock (Clock)                                        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           Scheduler (cooperative tick loop)            │    │
//! │  │  IndoorSampler · WeatherPoller · MoodEngine            │    │
//! │  │  AnimationClock · render::draw                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On ESP-IDF the sensor is the HTU21D on I2C0, each new frame is
//! summarised as one status line on the console, and the config is the
//! JSON document baked in at build time through `TAMAPET_CONFIG_JSON`
//! (defaults when unset).  On any other target the same loop runs against
//! the simulation adapters, with the config read from the JSON file named
//! on the command line.

use anyhow::Result;
use log::info;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use tamapet::adapters::log_sink::LogEventSink;
use tamapet::adapters::time::MonotonicClock;
use tamapet::app::ports::{Clock, DisplayPort, SensorPort, WeatherClient};
use tamapet::config::PetConfig;
use tamapet::scheduler::Scheduler;

const SPLASH: [&str; 2] = ["Tamapet", "Starting!"];

/// Drive the scheduler forever; `pause` yields between ticks.
fn run<S, W, D>(
    config: &PetConfig,
    clock: &MonotonicClock,
    entropy: u64,
    sensor: S,
    weather: W,
    display: D,
    mut pause: impl FnMut(),
) -> !
where
    S: SensorPort,
    W: WeatherClient,
    D: DisplayPort,
{
    let seed = config.rng_seed(entropy);
    info!("Mood RNG seed: {}", seed);

    let mut sink = LogEventSink::new();
    let mut scheduler = Scheduler::new(
        config,
        sensor,
        weather,
        display,
        SmallRng::seed_from_u64(seed),
        clock.now_ms(),
    );
    scheduler.show_splash(&SPLASH);
    scheduler.start(&mut sink);

    loop {
        scheduler.tick(clock.now_ms(), &mut sink);
        pause();
    }
}

// ── Device ────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn main() -> Result<()> {
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::Hertz;
    use log::warn;

    use tamapet::adapters::http::OfflineTransport;
    use tamapet::adapters::console::ConsoleStatus;
    use tamapet::pins::{I2C_FREQ_HZ, I2C_SCL_GPIO, I2C_SDA_GPIO};
    use tamapet::sensors::htu21d::Htu21d;
    use tamapet::weather::openweather::OpenWeatherClient;

    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Tamapet v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let clock = MonotonicClock::new();
    let config = match option_env!("TAMAPET_CONFIG_JSON") {
        Some(json) => PetConfig::from_json(json.as_bytes()).unwrap_or_else(|e| {
            warn!("Built-in config rejected ({}), using defaults", e);
            PetConfig::default()
        }),
        None => PetConfig::default(),
    };

    let peripherals = Peripherals::take()?;
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(I2C_FREQ_HZ)),
    )?;
    info!(
        "I2C0 up: SDA={} SCL={} {} kHz",
        I2C_SDA_GPIO,
        I2C_SCL_GPIO,
        I2C_FREQ_HZ / 1_000
    );

    let mut sensor = Htu21d::new(i2c, FreeRtos);
    if let Err(e) = sensor.reset() {
        warn!("HTU21D reset failed ({}), continuing", e);
    }

    // Seed from the hardware RNG.
    let entropy = unsafe {
        (u64::from(esp_idf_svc::sys::esp_random()) << 32)
            | u64::from(esp_idf_svc::sys::esp_random())
    };

    run(
        &config,
        &clock,
        entropy,
        sensor,
        OpenWeatherClient::new(OfflineTransport),
        ConsoleStatus::stdout(),
        || FreeRtos::delay_ms(10),
    )
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
fn main() -> Result<()> {
    use std::time::Duration;

    use tracing_subscriber::EnvFilter;

    use tamapet::adapters::config_store::JsonConfigStore;
    use tamapet::adapters::sim::{SimSensor, SimWeather, TerminalDisplay};
    use tamapet::weather::{Sky, WeatherReport};

    // Logs go to stderr so they do not tear the frame on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Tamapet v{} (host simulation)", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("tamapet.json"));
    let config = JsonConfigStore::new(path).load_or_default();

    let clock = MonotonicClock::new();
    let sensor = SimSensor::new(22.0, 17.0, 33.0, 0.05).with_dropouts(97);
    let weather = SimWeather::new(
        vec![
            Ok(WeatherReport {
                temp_f: 54.0,
                humidity: Some(82.0),
                sky: Some(Sky::Rain),
            }),
            Err(tamapet::error::ErrorKind::Timeout),
            Ok(WeatherReport {
                temp_f: 61.0,
                humidity: Some(64.0),
                sky: Some(Sky::Clouds),
            }),
        ],
        5,
    );

    let entropy = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or_else(|_| clock.uptime_us(), |d| d.as_nanos() as u64);

    run(
        &config,
        &clock,
        entropy,
        sensor,
        weather,
        TerminalDisplay::stdout(),
        || std::thread::sleep(Duration::from_millis(20)),
    )
}
