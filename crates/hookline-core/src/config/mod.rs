//! Configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Every field has a default so an absent file is valid.

pub mod logging;
pub mod registry;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::registry::RegistryConfig;

use crate::error::HookError;

/// Environment variable prefix for overrides, e.g.
/// `HOOKLINE__REGISTRY__SLOW_HOOK_THRESHOLD_MS=250`.
pub const ENV_PREFIX: &str = "HOOKLINE";

/// Root configuration.
///
/// Deserialization target for the merged configuration files
/// (`default.toml` + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hook registry settings.
    pub registry: RegistryConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the `config/` directory.
    pub fn load(env: &str) -> Result<Self, HookError> {
        Self::load_from(Path::new("config"), env)
    }

    /// Load configuration from `dir`.
    ///
    /// Merges `dir/default`, the `dir/<env>` overlay, and environment
    /// variables prefixed with `HOOKLINE__`. Missing files are skipped.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, HookError> {
        let base = dir.join("default");
        let overlay = dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&base.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&overlay.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| HookError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| HookError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
