#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and validation should never panic
        let _ = toml::from_str::<portship::Config>(content);
        if let Ok((config, _warnings)) =
            portship::config::parse_with_warnings(content, Path::new("fuzz.toml"))
        {
            let _ = config.validate();
            let _ = config.compiler_settings();
        }
    }
});
