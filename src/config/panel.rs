//! Panel endpoint configuration

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::error::ValidationError;

/// Where the panel exchanges credentials and saves answers
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    /// Workflow backing the conversation. Empty means not configured.
    #[serde(default)]
    pub workflow_id: String,

    /// Origin of the host page
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the credential exchange endpoint
    #[serde(default = "default_create_session_path")]
    pub create_session_path: String,

    /// Path of the save-answer endpoint
    #[serde(default = "default_save_answer_path")]
    pub save_answer_path: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl PanelConfig {
    /// Full URL of the credential exchange endpoint
    pub fn create_session_url(&self) -> Result<Url, ValidationError> {
        self.endpoint(&self.create_session_path)
    }

    /// Full URL of the save-answer endpoint
    pub fn save_answer_url(&self) -> Result<Url, ValidationError> {
        self.endpoint(&self.save_answer_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate panel configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let base = self.base()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        for path in [&self.create_session_path, &self.save_answer_path] {
            if !path.starts_with('/') {
                return Err(ValidationError::InvalidEndpointPath(path.clone()));
            }
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }

    fn base(&self) -> Result<Url, ValidationError> {
        Url::parse(&self.base_url).map_err(|_| ValidationError::InvalidBaseUrl(self.base_url.clone()))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ValidationError> {
        self.base()?
            .join(path)
            .map_err(|_| ValidationError::InvalidEndpointPath(path.to_string()))
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            workflow_id: String::new(),
            base_url: default_base_url(),
            create_session_path: default_create_session_path(),
            save_answer_path: default_save_answer_path(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_create_session_path() -> String {
    "/api/create-session".to_string()
}

fn default_save_answer_path() -> String {
    "/api/save-answer".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_config_defaults() {
        let config = PanelConfig::default();
        assert_eq!(config.workflow_id, "");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_urls() {
        let config = PanelConfig::default();
        assert_eq!(
            config.create_session_url().unwrap().as_str(),
            "http://localhost:3000/api/create-session"
        );
        assert_eq!(
            config.save_answer_url().unwrap().as_str(),
            "http://localhost:3000/api/save-answer"
        );
    }

    #[test]
    fn test_rejects_non_http_base() {
        let config = PanelConfig {
            base_url: "ftp://files.example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_rejects_relative_path() {
        let config = PanelConfig {
            save_answer_path: "api/save".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidEndpointPath("api/save".to_string()))
        );
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = PanelConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
