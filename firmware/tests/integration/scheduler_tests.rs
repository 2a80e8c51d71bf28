//! End-to-end scheduler scenarios against the mock rig.

use tamapet::app::events::AppEvent;
use tamapet::error::ErrorKind;
use tamapet::pet::{FrameIndex, MoodKind};
use tamapet::render::{self, Scene};
use tamapet::weather::{Sky, WeatherReport};

use crate::mock_hw::{BusOp, Rig, fast_config, reading, weather_config};

const MOOD_MS: u64 = 5_000;

#[test]
fn hot_room_makes_pet_sad_at_next_evaluation() {
    let mut rig = Rig::new(&fast_config(), 1);
    rig.set_indoor(32.0);

    for now in (0..MOOD_MS).step_by(100) {
        rig.tick(now);
        assert_eq!(rig.scheduler.pet().mood, MoodKind::Happy);
    }
    let report = rig.tick(MOOD_MS);
    assert_eq!(rig.scheduler.pet().mood, MoodKind::Sad);
    assert!(report.mood_change.is_some());
}

#[test]
fn comfortable_room_brings_happiness_back() {
    let mut rig = Rig::new(&fast_config(), 2);
    rig.fail_sensor();

    rig.tick(MOOD_MS);
    assert!(MoodKind::IDLE_MOODS.contains(&rig.scheduler.pet().mood));

    rig.set_indoor(22.0);
    rig.tick(MOOD_MS + 1);
    assert_ne!(rig.scheduler.pet().mood, MoodKind::Happy, "not due yet");
    rig.tick(2 * MOOD_MS);
    assert_eq!(rig.scheduler.pet().mood, MoodKind::Happy);
}

#[test]
fn same_seed_same_moods() {
    let run = |seed| {
        let mut rig = Rig::new(&fast_config(), seed);
        rig.fail_sensor();
        (1..=30)
            .map(|i| {
                rig.tick(i * MOOD_MS);
                rig.scheduler.pet().mood
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn mood_change_restarts_animation() {
    let mut rig = Rig::new(&fast_config(), 3);
    rig.set_indoor(35.0);
    rig.tick(0);
    rig.tick(4_600);
    rig.tick(4_700);
    let before = rig.scheduler.pet().last_frame_change_ms;
    assert_ne!(before, MOOD_MS);

    rig.tick(MOOD_MS);
    let pet = rig.scheduler.pet();
    assert_eq!(pet.mood, MoodKind::Sad);
    assert_eq!(pet.frame, FrameIndex::First);
    assert_eq!(pet.last_frame_change_ms, MOOD_MS);
}

#[test]
fn animation_alternates_every_frame_time() {
    let mut rig = Rig::new(&fast_config(), 4);
    rig.set_indoor(22.0);
    let mut frames = Vec::new();
    for now in (0..3_000).step_by(250) {
        frames.push(rig.tick(now).frame);
    }
    // 250 ms ticks, 500 ms frames: each frame shows for two ticks.
    for pair in frames.chunks(2) {
        assert_eq!(pair[0], pair[1]);
    }
    assert!(frames.windows(3).any(|w| w[0] != w[2]));
}

#[test]
fn every_tick_renders_and_sensor_precedes_display() {
    let mut rig = Rig::new(&fast_config(), 5);
    rig.set_indoor(22.0);
    for now in 0..10 {
        rig.tick(now * 10);
    }
    assert_eq!(rig.frames.borrow().len(), 10);
    let bus = rig.bus.borrow();
    for pair in bus.chunks(2) {
        assert_eq!(pair, [BusOp::SensorRead, BusOp::DisplayWrite]);
    }
}

#[test]
fn stale_indoor_value_stays_on_screen() {
    let mut rig = Rig::new(&fast_config(), 6);
    rig.sensor_script.borrow_mut().push_back(reading(21.0));
    rig.fail_sensor();

    for now in 0..5 {
        rig.tick(now);
    }
    assert_eq!(rig.scheduler.env().indoor_temp_c, Some(21.0));

    let expected = render::draw(&Scene::from_state(rig.scheduler.pet(), rig.scheduler.env()));
    assert_eq!(rig.last_frame(), Some(expected));
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::SensorLost(_))),
        1
    );
}

#[test]
fn recovered_sensor_shows_only_the_fresh_value() {
    let mut rig = Rig::new(&fast_config(), 7);
    rig.tick(0);
    assert_eq!(rig.scheduler.env().indoor_temp_c, None);

    rig.set_indoor(24.0);
    rig.tick(1);
    assert_eq!(rig.scheduler.env().indoor_temp_c, Some(24.0));
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::SensorRecovered { temp_c: 24.0 })
    );
}

#[test]
fn pending_weather_does_not_stall_the_loop() {
    let mut rig = Rig::new(&weather_config(), 8);
    rig.set_indoor(22.0);

    let mut toggles = 0;
    for now in (0..2_900).step_by(100) {
        let report = rig.tick(now);
        assert!(report.weather.is_none());
        toggles += u32::from(report.frame_toggled);
    }
    assert!(rig.scheduler.is_weather_in_flight());
    assert!(toggles >= 4);
    assert_eq!(rig.frames.borrow().len(), 29);
    assert_eq!(rig.fetches.borrow().len(), 1);
}

#[test]
fn stalled_weather_times_out_and_waits_full_interval() {
    let mut rig = Rig::new(&weather_config(), 9);
    rig.set_indoor(22.0);

    rig.tick(0);
    let report = rig.tick(3_000);
    assert_eq!(report.weather, Some(Err(ErrorKind::Timeout)));
    assert_eq!(rig.scheduler.env().outdoor_temp_f, None);
    assert_eq!(rig.scheduler.failures().get(ErrorKind::Timeout), 1);

    for now in (3_100..60_000).step_by(1_000) {
        rig.tick(now);
    }
    assert_eq!(rig.fetches.borrow().len(), 1);

    rig.tick(60_000);
    assert_eq!(rig.fetches.borrow().len(), 2);
}

#[test]
fn completed_weather_lands_on_screen() {
    let mut rig = Rig::new(&weather_config(), 10);
    rig.set_indoor(22.0);
    rig.tick(0);

    let report = WeatherReport {
        temp_f: 44.0,
        humidity: Some(90.0),
        sky: Some(Sky::Drizzle),
    };
    rig.resolve_weather(Ok(report));
    assert_eq!(rig.tick(100).weather, Some(Ok(report)));

    let env = rig.scheduler.env();
    assert_eq!(env.outdoor_temp_f, Some(44.0));
    assert_eq!(env.outdoor_humidity, Some(90.0));
    assert!(env.is_raining());
    assert_eq!(rig.fetches.borrow()[0].0, "Reykjavik");

    let expected = render::draw(&Scene::from_state(rig.scheduler.pet(), env));
    assert_eq!(rig.last_frame(), Some(expected));
}

#[test]
fn failed_refresh_keeps_previous_outdoor_value() {
    let mut rig = Rig::new(&weather_config(), 11);
    rig.set_indoor(22.0);

    rig.resolve_weather(Ok(WeatherReport {
        temp_f: 50.0,
        humidity: None,
        sky: None,
    }));
    rig.tick(0);
    assert_eq!(rig.scheduler.env().outdoor_temp_f, Some(50.0));

    rig.resolve_weather(Err(ErrorKind::NetworkUnavailable));
    rig.tick(60_000);
    let env = rig.scheduler.env();
    assert_eq!(env.outdoor_temp_f, Some(50.0));
    assert_eq!(env.last_weather_error, Some(ErrorKind::NetworkUnavailable));
    assert_eq!(env.last_weather_fetch_ms, Some(60_000));
}

#[test]
fn display_outage_is_survived() {
    let mut rig = Rig::new(&fast_config(), 12);
    rig.set_indoor(22.0);
    rig.display_fail.set(true);
    for now in 0..10 {
        let report = rig.tick(now * 500);
        assert_eq!(report.display, Err(ErrorKind::DisplayWriteFailed));
    }
    rig.display_fail.set(false);
    rig.tick(5_000);
    assert_eq!(rig.frames.borrow().len(), 1);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::DisplayLost(_))), 1);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::DisplayRecovered), 1);
    assert_eq!(rig.scheduler.failures().get(ErrorKind::DisplayWriteFailed), 10);
}

#[test]
fn telemetry_snapshot_counts_failures() {
    let mut rig = Rig::new(&fast_config(), 13);
    rig.fail_sensor();
    for now in (0..=30_000).step_by(1_000) {
        rig.tick(now);
    }
    let telemetry: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Telemetry(t) => Some(*t),
            _ => None,
        })
        .collect();
    assert_eq!(telemetry.len(), 1);
    assert_eq!(telemetry[0].sensor_failures, 31);
    assert_eq!(telemetry[0].uptime_ms, 30_000);
}
