//! Configuration module for Portship
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PORTSHIP_*)
//! 3. Explicit `--config` file, else `<dest>/portship.toml`
//! 4. User config (`<config dir>/portship/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_overrides, parse_with_warnings, user_config_path, ConfigWarning, PROJECT_CONFIG_NAME,
};
pub use types::{
    ArchiveConfig, Config, ConversionConfig, LoadedConfig, NinjaConfig, OutputConfig,
    PathsConfig, RuleConfig, ToolConfig, Verbosity, MIN_LINE_WIDTH,
};
