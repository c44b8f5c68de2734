//! Hook registry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings applied to every `execute` call of a registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// A hook running longer than this many milliseconds is reported with a
    /// warning once it completes. `0` disables the check. Hooks are never
    /// cancelled.
    pub slow_hook_threshold_ms: u64,
}

impl RegistryConfig {
    /// Returns the slow-hook threshold, or `None` when disabled.
    pub fn slow_hook_threshold(&self) -> Option<Duration> {
        (self.slow_hook_threshold_ms > 0).then(|| Duration::from_millis(self.slow_hook_threshold_ms))
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            slow_hook_threshold_ms: default_slow_hook_threshold(),
        }
    }
}

fn default_slow_hook_threshold() -> u64 {
    5000
}
