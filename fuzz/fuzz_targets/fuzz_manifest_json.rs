#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use portship::domain::policies::ConversionPolicy;
use portship::domain::services::{CompilerSettings, GraphCompiler};
use portship::infrastructure::{JsonManifestReader, NinjaWriter};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(index) = JsonManifestReader::new().parse(content, Path::new("fuzz/index.json")) else {
        return;
    };

    // Any decoded index either compiles or reports a duplicate output
    let compiler = GraphCompiler::new(CompilerSettings::default(), ConversionPolicy::default());
    let mut writer = NinjaWriter::new(Vec::new());
    let _ = compiler.compile(&index, &mut writer);
    let _ = compiler.plan(&index);
});
