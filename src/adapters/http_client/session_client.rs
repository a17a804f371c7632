//! HTTP implementation of the credential exchange.
//!
//! # Wire format
//!
//! `POST {endpoint}?user_first_name=..&user_last_name=..&form_template_uid=..
//! &user_id=..&question_template_id=..&version=..` with a JSON body
//! `{workflow:{id}, question_template_id, chatkit_configuration:{file_upload:{enabled:false}}}`.
//! A success body is a JSON object with a `client_secret` string.
//!
//! The body is parsed leniently: an unparsable body is logged and treated
//! as an empty object, so only a missing `client_secret` (or a failure
//! status) fails the exchange.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::error_detail::extract_error_detail;
use crate::domain::session::{SessionCredential, SessionError, SessionRequest};
use crate::ports::SessionGateway;

/// Maximum number of body characters included in debug logs.
const BODY_PREVIEW_CHARS: usize = 1600;

/// Credential exchange over HTTP.
pub struct HttpSessionGateway {
    endpoint: Url,
    client: Client,
}

impl HttpSessionGateway {
    /// Creates a gateway posting to `endpoint`.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }

    /// Creates a gateway that reuses an existing client.
    pub fn with_client(endpoint: Url, client: Client) -> Self {
        Self { endpoint, client }
    }

    /// The exchange URL with the page context appended as query parameters.
    pub fn request_url(&self, request: &SessionRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in request.query_pairs() {
                query.append_pair(key, value);
            }
        }
        url
    }
}

#[async_trait]
impl SessionGateway for HttpSessionGateway {
    async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<SessionCredential, SessionError> {
        let url = self.request_url(request);

        let response = self
            .client
            .post(url)
            .json(&request.body())
            .send()
            .await
            .map_err(|e| SessionError::transport(e.to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| SessionError::transport(e.to_string()))?;

        tracing::debug!(
            status = status.as_u16(),
            ok = status.is_success(),
            body_preview = %raw.chars().take(BODY_PREVIEW_CHARS).collect::<String>(),
            "create-session response"
        );

        let data = parse_lenient(&raw);

        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or_default();
            let detail = extract_error_detail(&data, fallback);
            tracing::error!(status = status.as_u16(), body = %data, "Create session request failed");
            return Err(SessionError::exchange(status.as_u16(), detail));
        }

        data.get("client_secret")
            .and_then(Value::as_str)
            .filter(|secret| !secret.is_empty())
            .map(SessionCredential::new)
            .ok_or(SessionError::MissingClientSecret)
    }
}

/// Parses `raw` as JSON, falling back to an empty object.
fn parse_lenient(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::error!("Failed to parse create-session response: {}", e);
        Value::Object(Default::default())
    })
}
