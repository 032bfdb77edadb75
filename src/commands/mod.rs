pub mod generate;
pub mod inspect;

use portship::config::LoadedConfig;
use tracing::warn;

/// Start logging, then report where the config came from and any unknown
/// keys it contained
pub fn report_config(loaded: &LoadedConfig, verbose: u8) {
    crate::init_logging(verbose, loaded.config.output.verbosity);

    match &loaded.source {
        Some(path) => tracing::debug!(config = %path.display(), "config loaded"),
        None => tracing::debug!("using built-in config defaults"),
    }
    for warning in &loaded.warnings {
        warn!("{warning}");
    }
}
