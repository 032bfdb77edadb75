use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use portship::application::{GenerateOptions, GenerateResult, GenerateUseCase};
use portship::config::Config;
use portship::domain::ports::CompileEventSink;
use portship::infrastructure::{JsonEventSink, JsonManifestReader, TracingEventSink};

pub fn cmd_generate(
    index: &Path,
    dest: &Path,
    config: Option<&PathBuf>,
    force: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let loaded = Config::discover(config.map(PathBuf::as_path), dest)
        .context("failed to load configuration")?;
    super::report_config(&loaded, verbose);

    let events: Arc<dyn CompileEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink::new().with_details(verbose > 1))
    };

    let use_case = GenerateUseCase::new(JsonManifestReader::new(), loaded.config);
    let options = GenerateOptions::new(index)
        .with_dest(dest)
        .with_force(force);

    let result = use_case
        .execute_with_events(&options, events)
        .with_context(|| format!("failed to generate from {}", index.display()))?;

    if json {
        print_json_result(&result);
    } else {
        print_text_result(&result);
    }
    Ok(())
}

fn print_text_result(result: &GenerateResult) {
    let verb = if result.has_changes() {
        "Wrote"
    } else {
        "Up to date:"
    };
    println!(
        "{} {} ({} entries compiled, {} skipped, {} edges)",
        verb,
        result.output.display(),
        result.summary.compiled,
        result.summary.skipped,
        result.summary.edges
    );
}

fn print_json_result(result: &GenerateResult) {
    let value = serde_json::json!({
        "event": "written",
        "command": "generate",
        "output": result.output.display().to_string(),
        "status": result.status.as_str(),
        "hash": result.hash.as_str(),
        "rules": result.summary.rules,
        "edges": result.summary.edges,
    });
    println!("{value}");
}
