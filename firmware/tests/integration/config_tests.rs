//! Config file → scheduler wiring.

use std::path::PathBuf;

use tamapet::adapters::config_store::JsonConfigStore;
use tamapet::app::ports::ConfigPort;
use tamapet::error::ConfigError;
use tamapet::pet::MoodKind;

use crate::mock_hw::Rig;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tamapet-it-{}-{name}.json",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn full_document_round_trips_into_running_pet() {
    let path = write_temp(
        "full",
        r#"{
            "wifiSsid": "HomeNet",
            "wifiPassword": "correct horse",
            "weatherApiKey": "abc123",
            "weatherCity": "Nairobi",
            "frameTimeMs": 400,
            "moodChangeIntervalMs": 2000,
            "weatherPollIntervalMs": 120000,
            "hotThresholdC": 26.0,
            "comfortMinC": 18.0,
            "comfortMaxC": 24.0,
            "moodSeed": 99
        }"#,
    );
    let config = JsonConfigStore::new(&path).load().unwrap();
    std::fs::remove_file(&path).ok();

    assert!(config.weather_enabled());
    assert_eq!(config.frame_time_ms, 400);
    assert_eq!(config.mood_seed, Some(99));

    let mut rig = Rig::new(&config, config.mood_seed.unwrap());
    rig.set_indoor(27.0);
    rig.tick(2_000);
    assert_eq!(rig.scheduler.pet().mood, MoodKind::Sad);
}

#[test]
fn impossible_band_is_rejected() {
    let path = write_temp("band", r#"{"comfortMinC": 28.0, "comfortMaxC": 21.0}"#);
    let result = JsonConfigStore::new(&path).load();
    std::fs::remove_file(&path).ok();
    assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
}
