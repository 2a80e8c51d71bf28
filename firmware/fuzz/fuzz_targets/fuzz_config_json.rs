//! Fuzz target: `PetConfig::from_json`
//!
//! Any document that loads must also pass validation on its own, and
//! serialising it back must load to the same config.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use tamapet::config::PetConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = PetConfig::from_json(data) else {
        return;
    };
    assert!(config.validate().is_ok());

    let json = serde_json::to_vec(&config).expect("serialise loaded config");
    let again = PetConfig::from_json(&json).expect("reload serialised config");
    assert_eq!(again, config);
});
