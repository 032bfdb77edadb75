use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use portship::application::{InspectItem, InspectResult, InspectUseCase};
use portship::config::Config;
use portship::domain::services::PlanOutcome;
use portship::infrastructure::JsonManifestReader;

pub fn cmd_inspect(
    index: &Path,
    config: Option<&PathBuf>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let dest = std::env::current_dir().context("failed to resolve current directory")?;
    let loaded = Config::discover(config.map(PathBuf::as_path), &dest)
        .context("failed to load configuration")?;
    super::report_config(&loaded, verbose);

    let use_case = InspectUseCase::new(JsonManifestReader::new(), loaded.config);
    let result = use_case
        .execute(index)
        .with_context(|| format!("failed to inspect {}", index.display()))?;

    if json {
        for item in &result.items {
            println!("{}", item_json(item));
        }
    } else {
        print_text(&result);
    }
    Ok(())
}

fn item_json(item: &InspectItem) -> serde_json::Value {
    match &item.outcome {
        PlanOutcome::Planned(plan) => serde_json::json!({
            "key": item.key,
            "path": item.path,
            "eligible": true,
            "extraction": plan.kind.as_str(),
            "rule": plan.transformation.rule,
            "raw_output": plan.raw_output(),
            "final_output": plan.final_output(),
        }),
        PlanOutcome::Skipped(reasons) => {
            let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
            serde_json::json!({
                "key": item.key,
                "path": item.path,
                "eligible": false,
                "reasons": reasons,
            })
        }
        PlanOutcome::Rejected(reason) => serde_json::json!({
            "key": item.key,
            "path": item.path,
            "eligible": true,
            "rejected": reason,
        }),
    }
}

fn print_text(result: &InspectResult) {
    println!("Index: {}", result.index_path.display());
    for item in &result.items {
        match &item.outcome {
            PlanOutcome::Planned(plan) => println!(
                "  {} [{}] {} -> {} ({})",
                item.key,
                plan.kind.as_str(),
                plan.raw_output(),
                plan.final_output(),
                plan.transformation.rule
            ),
            PlanOutcome::Skipped(reasons) => {
                let reasons: Vec<String> = reasons.iter().map(ToString::to_string).collect();
                println!("  {} skipped: {}", item.key, reasons.join(", "));
            }
            PlanOutcome::Rejected(reason) => println!("  {} rejected: {}", item.key, reason),
        }
    }
    println!(
        "{} planned, {} skipped, {} rejected",
        result.planned, result.skipped, result.rejected
    );
}
