use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::resume::{ApprovalStatus, ResumeRow};
use crate::models::user::{ReviewListingRow, TradeCategoryRow, UserRoleRow};

pub const RECRUITER_ROLE: &str = "recruiter";

const LISTING_SELECT: &str = r#"
    SELECT r.id, r.user_id, r.title, r.resume_name, r.personal_info,
           r.work_experience, r.skills, r.education, r.certifications,
           r.resume_data, r.approval_status, r.trade_category_id, r.created_at,
           p.full_name, t.name AS trade_name
    FROM resumes r
    INNER JOIN user_profiles p ON p.user_id = r.user_id
    LEFT JOIN trade_categories t ON t.id = r.trade_category_id
"#;

pub async fn is_recruiter(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let roles: Vec<UserRoleRow> =
        sqlx::query_as("SELECT user_id, role FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(roles.iter().any(|r| r.role == RECRUITER_ROLE))
}

/// All résumés with profile and trade data, newest first.
pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ReviewListingRow>, sqlx::Error> {
    sqlx::query_as(&format!("{LISTING_SELECT} ORDER BY r.created_at DESC"))
        .fetch_all(pool)
        .await
}

pub async fn fetch_listing(
    pool: &PgPool,
    resume_id: Uuid,
) -> Result<Option<ReviewListingRow>, sqlx::Error> {
    sqlx::query_as(&format!("{LISTING_SELECT} WHERE r.id = $1"))
        .bind(resume_id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_resume(pool: &PgPool, resume_id: Uuid) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, user_id, title, resume_name, personal_info, work_experience,
               skills, education, certifications, resume_data, approval_status,
               trade_category_id, created_at
        FROM resumes
        WHERE id = $1
        "#,
    )
    .bind(resume_id)
    .fetch_optional(pool)
    .await
}

pub async fn list_trade_categories(pool: &PgPool) -> Result<Vec<TradeCategoryRow>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, description FROM trade_categories ORDER BY name")
        .fetch_all(pool)
        .await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalOutcome {
    Applied(ApprovalStatus),
    NotFound,
    /// The résumé is not pending; carries its current status.
    NotPending(String),
}

/// Moves a pending résumé to `decision` and records the reviewer.
///
/// The row is locked for the duration; the status update and the
/// `resume_approvals` upsert commit together or not at all.
pub async fn record_decision(
    pool: &PgPool,
    resume_id: Uuid,
    recruiter_id: Uuid,
    decision: ApprovalStatus,
) -> Result<ApprovalOutcome, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let current: Option<String> =
        sqlx::query_scalar("SELECT approval_status FROM resumes WHERE id = $1 FOR UPDATE")
            .bind(resume_id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some(current) = current else {
        return Ok(ApprovalOutcome::NotFound);
    };
    let allowed = ApprovalStatus::parse(&current)
        .map(|status| status.can_transition_to(decision))
        .unwrap_or(false);
    if !allowed {
        return Ok(ApprovalOutcome::NotPending(current));
    }

    sqlx::query("UPDATE resumes SET approval_status = $1 WHERE id = $2")
        .bind(decision.as_str())
        .bind(resume_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO resume_approvals (resume_id, recruiter_id, status, reviewed_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (resume_id, recruiter_id)
        DO UPDATE SET status = EXCLUDED.status, reviewed_at = EXCLUDED.reviewed_at
        "#,
    )
    .bind(resume_id)
    .bind(recruiter_id)
    .bind(decision.as_str())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Resume {resume_id} marked {} by recruiter {recruiter_id}",
        decision.as_str()
    );
    Ok(ApprovalOutcome::Applied(decision))
}
