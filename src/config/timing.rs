//! Timing configuration for readiness and answer capture

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Timers used by the panel controller
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// How long to wait for the widget runtime to register
    #[serde(default = "default_script_load_timeout")]
    pub script_load_timeout_ms: u64,

    /// Delays between answer capture attempts (comma-separated milliseconds)
    #[serde(default = "default_capture_delays")]
    pub capture_delays_ms: String,
}

impl TimingConfig {
    pub fn script_load_timeout(&self) -> Duration {
        Duration::from_millis(self.script_load_timeout_ms)
    }

    /// Parse the capture delays list
    pub fn capture_delays(&self) -> Result<Vec<Duration>, ValidationError> {
        let delays = self
            .capture_delays_ms
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ValidationError::InvalidCaptureDelays(self.capture_delays_ms.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if delays.is_empty() {
            return Err(ValidationError::InvalidCaptureDelays(
                self.capture_delays_ms.clone(),
            ));
        }
        Ok(delays)
    }

    /// Validate timing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.script_load_timeout_ms == 0 {
            return Err(ValidationError::InvalidScriptTimeout);
        }
        self.capture_delays()?;
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            script_load_timeout_ms: default_script_load_timeout(),
            capture_delays_ms: default_capture_delays(),
        }
    }
}

fn default_script_load_timeout() -> u64 {
    5000
}

fn default_capture_delays() -> String {
    "800,1500,2000".to_string()
}
