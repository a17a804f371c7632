//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Log diagnostic traces (transcript probes, raw exchange bodies)
    #[serde(default)]
    pub verbose_diagnostics: bool,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}
