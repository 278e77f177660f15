use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::export::{render_document_blocking, DocumentFormat, RenderedDocument};
use crate::render::qr::{render_qr_svg, share_url, DEFAULT_QR_SIZE, MAX_QR_SIZE, MIN_QR_SIZE};
use crate::review::{adapter::resume_record, repository};
use crate::state::AppState;

fn default_qr_size() -> u32 {
    DEFAULT_QR_SIZE
}

#[derive(Deserialize)]
pub struct QrQuery {
    #[serde(default = "default_qr_size")]
    pub size: u32,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: DocumentFormat,
}

/// GET /api/v1/resumes/:id/export?format=pdf|html
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ExportQuery>,
) -> Result<RenderedDocument, AppError> {
    let row = repository::fetch_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    let record = resume_record(&row);
    let document = render_document_blocking(record, params.format, state.html.clone()).await?;
    Ok(document)
}

/// GET /api/v1/resumes/:id/qr?size=
/// SVG share code for the résumé's public HTML export.
pub async fn handle_share_qr(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<QrQuery>,
) -> Result<Response, AppError> {
    if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&params.size) {
        return Err(AppError::Validation(format!(
            "size must be between {MIN_QR_SIZE} and {MAX_QR_SIZE}"
        )));
    }
    repository::fetch_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let svg = render_qr_svg(&share_url(&state.config.public_base_url, id), params.size)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
