use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::drafts::normalizer::normalize_botpress_payload;
use crate::drafts::submitter::NO_DRAFT_MESSAGE;
use crate::drafts::validation::{validate_resume_data, ValidationReport};
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub resume_data: ResumeData,
    pub ready: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub resume_data: ResumeData,
    pub validation: ValidationReport,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub title: String,
}

/// GET /api/v1/drafts/:worker_id
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> Result<Json<DraftResponse>, AppError> {
    let store = state.draft_store(worker_id);
    let resume_data = store
        .get()
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No draft for worker {worker_id}")))?;
    let ready = store.is_ready().await?;
    Ok(Json(DraftResponse { resume_data, ready }))
}

/// PUT /api/v1/drafts/:worker_id
pub async fn handle_put_draft(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
    Json(resume_data): Json<ResumeData>,
) -> Result<Json<DraftResponse>, AppError> {
    state.draft_store(worker_id).set(&resume_data).await?;
    Ok(Json(DraftResponse {
        resume_data,
        ready: true,
    }))
}

/// DELETE /api/v1/drafts/:worker_id
pub async fn handle_delete_draft(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.draft_store(worker_id).clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/drafts/:worker_id/botpress
///
/// Normalizes the bot payload and stores it even when incomplete; the
/// report tells the bot flow what is still missing.
pub async fn handle_botpress_ingest(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
    Json(raw): Json<Value>,
) -> Result<Json<IngestResponse>, AppError> {
    let resume_data = normalize_botpress_payload(&raw);
    let validation = validate_resume_data(&resume_data);
    debug!(
        "Bot payload for {worker_id}: valid={} ({} issues)",
        validation.valid,
        validation.errors.len()
    );
    state.draft_store(worker_id).set(&resume_data).await?;
    Ok(Json(IngestResponse {
        resume_data,
        validation,
    }))
}

/// POST /api/v1/drafts/:worker_id/validate
pub async fn handle_validate_draft(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
) -> Result<Json<ValidationReport>, AppError> {
    let draft = state
        .draft_store(worker_id)
        .get()
        .await?
        .ok_or_else(|| AppError::NotFound(NO_DRAFT_MESSAGE.to_string()))?;
    Ok(Json(validate_resume_data(&draft)))
}

/// POST /api/v1/drafts/:worker_id/submit
pub async fn handle_submit_draft(
    State(state): State<AppState>,
    Path(worker_id): Path<Uuid>,
    Json(req): Json<SubmitRequest>,
) -> Result<Response, AppError> {
    let store = state.draft_store(worker_id);
    let draft = store
        .get()
        .await?
        .ok_or_else(|| AppError::NotFound(NO_DRAFT_MESSAGE.to_string()))?;

    let report = validate_resume_data(&draft);
    if !report.valid {
        return Err(AppError::IncompleteResume(report));
    }

    let result = state.submitter.submit(&store, worker_id, &req.title).await?;
    let status = if result.success {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_GATEWAY
    };
    Ok((status, Json(result)).into_response())
}
