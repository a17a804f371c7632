//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHATKIT_PANEL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use chatkit_panel::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Credentials from {}", config.panel.create_session_url().unwrap());
//! ```

mod error;
mod features;
mod panel;
mod timing;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use panel::PanelConfig;
pub use timing::TimingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads successfully.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Workflow id and endpoint locations
    #[serde(default)]
    pub panel: PanelConfig,

    /// Script readiness timeout and capture schedule
    #[serde(default)]
    pub timing: TimingConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CHATKIT_PANEL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHATKIT_PANEL__PANEL__WORKFLOW_ID=wf_abc` -> `panel.workflow_id = wf_abc`
    /// - `CHATKIT_PANEL__TIMING__CAPTURE_DELAYS_MS=800,1500` -> `timing.capture_delays_ms`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHATKIT_PANEL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// A missing workflow id is not rejected here. The panel reports it
    /// as a session error when it mounts.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.panel.validate()?;
        self.timing.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CHATKIT_PANEL__PANEL__WORKFLOW_ID",
        "CHATKIT_PANEL__PANEL__BASE_URL",
        "CHATKIT_PANEL__TIMING__SCRIPT_LOAD_TIMEOUT_MS",
        "CHATKIT_PANEL__TIMING__CAPTURE_DELAYS_MS",
        "CHATKIT_PANEL__FEATURES__VERBOSE_DIAGNOSTICS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.panel.base_url, "http://localhost:3000");
        assert_eq!(config.timing.script_load_timeout_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CHATKIT_PANEL__PANEL__WORKFLOW_ID", "wf_live_123");
        env::set_var("CHATKIT_PANEL__PANEL__BASE_URL", "https://forms.example.com");
        env::set_var("CHATKIT_PANEL__TIMING__SCRIPT_LOAD_TIMEOUT_MS", "2500");
        env::set_var("CHATKIT_PANEL__TIMING__CAPTURE_DELAYS_MS", "100,200");
        env::set_var("CHATKIT_PANEL__FEATURES__VERBOSE_DIAGNOSTICS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.panel.workflow_id, "wf_live_123");
        assert_eq!(
            config.panel.create_session_url().unwrap().as_str(),
            "https://forms.example.com/api/create-session"
        );
        assert_eq!(config.timing.script_load_timeout(), Duration::from_millis(2500));
        assert_eq!(config.timing.capture_delays().unwrap().len(), 2);
        assert!(config.features.verbose_diagnostics);
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CHATKIT_PANEL__PANEL__BASE_URL", "not a url");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBaseUrl(_))
        ));
    }
}
