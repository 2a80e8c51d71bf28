//! Fuzz target: OpenWeather response body parser
//!
//! Feeds arbitrary bytes to `parse_body` and verifies:
//! - No panics under arbitrary input
//! - An accepted body always yields a finite temperature
//! - Reported humidity is always within 0..=100
//!
//! cargo fuzz run fuzz_weather_body

#![no_main]

use libfuzzer_sys::fuzz_target;
use tamapet::error::ErrorKind;
use tamapet::weather::openweather::parse_body;

fuzz_target!(|data: &[u8]| {
    match parse_body(data) {
        Ok(report) => {
            assert!(report.temp_f.is_finite(), "non-finite temperature accepted");
            if let Some(h) = report.humidity {
                assert!((0.0..=100.0).contains(&h), "humidity {h} out of range");
            }
        }
        Err(kind) => assert_eq!(kind, ErrorKind::MalformedResponse),
    }
});
