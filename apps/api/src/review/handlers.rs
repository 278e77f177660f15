use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ApprovalStatus, ResumeRecord};
use crate::review::adapter::resume_record;
use crate::review::dashboard::{
    engagement, filter_summaries, EngagementBucket, ResumeSummary, StatusFilter,
};
use crate::review::repository::{self, ApprovalOutcome};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RecruiterQuery {
    pub recruiter_id: Uuid,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub recruiter_id: Uuid,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub search: String,
}

#[derive(Deserialize)]
pub struct ReviewDecision {
    pub recruiter_id: Uuid,
}

#[derive(Serialize)]
pub struct ResumeDetail {
    #[serde(flatten)]
    pub summary: ResumeSummary,
    pub resume: ResumeRecord,
}

#[derive(Serialize)]
pub struct DecisionResponse {
    pub id: Uuid,
    pub approval_status: ApprovalStatus,
}

async fn require_recruiter(pool: &PgPool, recruiter_id: Uuid) -> Result<(), AppError> {
    if repository::is_recruiter(pool, recruiter_id).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// GET /api/v1/recruiter/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    require_recruiter(&state.db, params.recruiter_id).await?;
    let summaries = repository::list_resumes(&state.db)
        .await?
        .iter()
        .map(ResumeSummary::from_row)
        .collect();
    Ok(Json(filter_summaries(summaries, params.status, &params.search)))
}

/// GET /api/v1/recruiter/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<RecruiterQuery>,
) -> Result<Json<ResumeDetail>, AppError> {
    require_recruiter(&state.db, params.recruiter_id).await?;
    let row = repository::fetch_listing(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(ResumeDetail {
        summary: ResumeSummary::from_row(&row),
        resume: resume_record(&row.resume),
    }))
}

/// GET /api/v1/recruiter/engagement
pub async fn handle_engagement(
    State(state): State<AppState>,
    Query(params): Query<RecruiterQuery>,
) -> Result<Json<Vec<EngagementBucket>>, AppError> {
    require_recruiter(&state.db, params.recruiter_id).await?;
    let (rows, categories) = tokio::try_join!(
        repository::list_resumes(&state.db),
        repository::list_trade_categories(&state.db),
    )?;
    let summaries: Vec<ResumeSummary> = rows.iter().map(ResumeSummary::from_row).collect();
    let names: Vec<String> = categories.into_iter().map(|c| c.name).collect();
    Ok(Json(engagement(&summaries, &names)))
}

async fn decide(
    state: &AppState,
    id: Uuid,
    recruiter_id: Uuid,
    decision: ApprovalStatus,
) -> Result<Json<DecisionResponse>, AppError> {
    require_recruiter(&state.db, recruiter_id).await?;
    match repository::record_decision(&state.db, id, recruiter_id, decision).await? {
        ApprovalOutcome::Applied(status) => Ok(Json(DecisionResponse {
            id,
            approval_status: status,
        })),
        ApprovalOutcome::NotFound => Err(AppError::NotFound(format!("Resume {id} not found"))),
        ApprovalOutcome::NotPending(current) => Err(AppError::Conflict(format!(
            "Resume {id} is already {current}"
        ))),
    }
}

/// POST /api/v1/recruiter/resumes/:id/approve
pub async fn handle_approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewDecision>,
) -> Result<Json<DecisionResponse>, AppError> {
    decide(&state, id, req.recruiter_id, ApprovalStatus::Approved).await
}

/// POST /api/v1/recruiter/resumes/:id/reject
pub async fn handle_reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReviewDecision>,
) -> Result<Json<DecisionResponse>, AppError> {
    decide(&state, id, req.recruiter_id, ApprovalStatus::Rejected).await
}
