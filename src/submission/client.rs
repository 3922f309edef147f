//! HTTP client for the external profile API.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::validate::build_payload;
use crate::config::SubmissionConfig;
use crate::error::{SubmissionError, SubmissionErrorKind};
use crate::profile::{Measurements, UserProfile};

/// A profile accepted by the external API.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedProfile {
    /// Parsed response body.
    pub data: Value,
    /// The body's `id` field, when present.
    pub profile_id: Option<String>,
}

/// Something that can turn a completed profile into a stored one.
///
/// Implemented by [`ProfileClient`]; the onboarding manager only depends on
/// this trait.
#[async_trait]
pub trait ProfileSubmitter: Send + Sync {
    async fn submit(
        &self,
        profile: &UserProfile,
        measurements: &Measurements,
    ) -> Result<CreatedProfile, SubmissionError>;
}

/// Posts validated profiles to the configured endpoint.
///
/// One attempt per call: no retries, no timeout beyond the transport's.
pub struct ProfileClient {
    http: reqwest::Client,
    config: SubmissionConfig,
}

impl ProfileClient {
    pub fn new(config: SubmissionConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http: reqwest::Client, config: SubmissionConfig) -> Self {
        Self { http, config }
    }

    /// Endpoint this client posts to (external API or proxy).
    pub fn endpoint(&self) -> String {
        self.config.submit_url()
    }

    /// Validate, map, and post a profile.
    pub async fn create_profile(
        &self,
        profile: &UserProfile,
        measurements: &Measurements,
    ) -> Result<CreatedProfile, SubmissionError> {
        let payload = build_payload(profile, measurements, &self.config).inspect_err(|e| {
            warn!(error = %e, details = %e.details(), "Profile rejected before submission");
        })?;

        let url = self.endpoint();
        debug!(?payload, %url, "Calling profile API");

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, %url, "Profile API request failed");
                SubmissionError::from(e)
            })?;

        let status = response.status();
        info!(status = status.as_u16(), "Profile API responded");

        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %body, "Profile API returned an error");
            return Err(SubmissionError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let data: Value = serde_json::from_str(&body).map_err(|e| SubmissionError::Unknown {
            reason: format!("Profile API returned invalid JSON: {e}"),
        })?;
        let profile_id = extract_profile_id(&data);
        info!(profile_id = ?profile_id, "Profile created");

        Ok(CreatedProfile { data, profile_id })
    }
}

#[async_trait]
impl ProfileSubmitter for ProfileClient {
    async fn submit(
        &self,
        profile: &UserProfile,
        measurements: &Measurements,
    ) -> Result<CreatedProfile, SubmissionError> {
        self.create_profile(profile, measurements).await
    }
}

fn extract_profile_id(data: &Value) -> Option<String> {
    match data.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Discriminated result handed back to the presentation layer.
///
/// Success: `{success: true, data, profileId}`.
/// Failure: `{success: false, error, details, kind}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SubmitResponse {
    Success(SubmitSuccess),
    Failure(SubmitFailure),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSuccess {
    success: bool,
    pub data: Value,
    pub profile_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitFailure {
    success: bool,
    pub error: String,
    pub details: String,
    pub kind: SubmissionErrorKind,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<CreatedProfile, SubmissionError>> for SubmitResponse {
    fn from(result: Result<CreatedProfile, SubmissionError>) -> Self {
        match result {
            Ok(created) => Self::Success(SubmitSuccess {
                success: true,
                data: created.data,
                profile_id: created.profile_id,
            }),
            Err(e) => Self::Failure(SubmitFailure {
                success: false,
                error: e.to_string(),
                details: e.details(),
                kind: e.kind(),
            }),
        }
    }
}
