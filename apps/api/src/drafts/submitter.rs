//! Posts a finished draft to the backend webhook.
//!
//! One round trip per call, bounded by the configured timeout. No retries:
//! a failure leaves the draft (and its idempotency key) in place so the
//! caller can try again without risking a double insert.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::drafts::cache::StorageError;
use crate::drafts::store::DraftStore;
use crate::models::resume::{Education, PersonalInfo, WorkExperience};

pub const WEBHOOK_PATH: &str = "/functions/v1/botpress-webhook";
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

pub const NO_DRAFT_MESSAGE: &str = "No resume data found";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to save resume";
pub const NETWORK_FAILURE_MESSAGE: &str = "Network error while saving resume";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Submission rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Outcome reported to callers. Failures are data, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    pub fn submitted(resume_id: Option<String>) -> Self {
        Self {
            success: true,
            resume_id,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            resume_id: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionPayload<'a> {
    user_id: Uuid,
    title: &'a str,
    personal_info: &'a PersonalInfo,
    work_experience: &'a [WorkExperience],
    skills: &'a [String],
    education: &'a [Education],
    certifications: &'a [String],
    #[serde(rename = "resume_data")]
    resume_data: NestedCertifications<'a>,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct NestedCertifications<'a> {
    certifications: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebhookResponse {
    #[serde(default)]
    success: bool,
    resume_id: Option<Value>,
    error: Option<String>,
}

#[derive(Clone)]
pub struct ResumeSubmitter {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ResumeSubmitter {
    pub fn new(
        base_url: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, SubmissionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), WEBHOOK_PATH),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submits the draft held by `store` on behalf of `user_id`.
    ///
    /// On an acknowledged success the draft is cleared and the remote id
    /// returned. Storage failures while reading the draft are propagated;
    /// everything that goes wrong on the wire becomes a failed result.
    pub async fn submit(
        &self,
        store: &DraftStore,
        user_id: Uuid,
        title: &str,
    ) -> Result<SubmissionResult, StorageError> {
        let Some(mut draft) = store.get().await? else {
            return Ok(SubmissionResult::failed(NO_DRAFT_MESSAGE));
        };

        if draft.certifications.is_none() {
            draft.certifications = store.legacy_certifications().await?;
        }

        let idempotency_key = store.submission_key().await?;
        let certifications = draft.certifications();
        let payload = SubmissionPayload {
            user_id,
            title,
            personal_info: &draft.personal_info,
            work_experience: &draft.work_experience,
            skills: &draft.skills,
            education: &draft.education,
            certifications,
            resume_data: NestedCertifications { certifications },
            status: "complete",
        };

        match self.post(&payload, &idempotency_key).await {
            Ok(resume_id) => {
                if let Err(e) = store.clear().await {
                    warn!("Submitted résumé for {user_id} but could not clear the draft: {e}");
                }
                info!(
                    "Résumé submitted for {user_id} (id: {})",
                    resume_id.as_deref().unwrap_or("unknown")
                );
                Ok(SubmissionResult::submitted(resume_id))
            }
            Err(SubmissionError::Rejected { status, message }) => {
                warn!("Résumé submission for {user_id} rejected with status {status}: {message}");
                Ok(SubmissionResult::failed(message))
            }
            Err(e) => {
                warn!("Résumé submission for {user_id} failed: {e}");
                Ok(SubmissionResult::failed(NETWORK_FAILURE_MESSAGE))
            }
        }
    }

    async fn post(
        &self,
        payload: &SubmissionPayload<'_>,
        idempotency_key: &str,
    ) -> Result<Option<String>, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(IDEMPOTENCY_HEADER, idempotency_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body: WebhookResponse = response.json().await?;

        if status.is_success() && body.success {
            return Ok(body.resume_id.map(|id| match id {
                Value::String(s) => s,
                other => other.to_string(),
            }));
        }

        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message: body
                .error
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
        })
    }
}
