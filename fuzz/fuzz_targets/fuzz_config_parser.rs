//! Fuzz target for `posture.toml` parsing and resolution.
//!
//! Goal: parsing and resolving **never panic** on any input; errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(cfg) = posture_settings::parse_config_toml(text) {
        let _ = posture_settings::resolve_config(cfg, posture_settings::Overrides::default());
    }
});
