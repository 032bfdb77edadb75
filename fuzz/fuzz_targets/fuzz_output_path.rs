#![no_main]

use libfuzzer_sys::fuzz_target;
use portship::domain::value_objects::{escape_literal, OutputPath};
use portship::infrastructure::ninja::escape_path;

fuzz_target!(|data: &[u8]| {
    let stored = String::from_utf8_lossy(data);
    let Ok(path) = OutputPath::from_stored(&stored) else {
        return;
    };
    assert!(!path.as_str().split('/').any(|part| matches!(part, "" | "." | "..")));
    let (stem, extension) = path.split_extension();
    assert_eq!(stem.len() + extension.len(), path.as_str().len());
    let _ = escape_path(&escape_literal(path.as_str()));
});
