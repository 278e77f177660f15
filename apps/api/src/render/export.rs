//! Output formats, file names and persistence of rendered documents.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::models::resume::ResumeRecord;
use crate::render::html::HtmlRenderer;
use crate::render::pdf::render_pdf;
use crate::render::DocumentGenerationError;

const FALLBACK_FILENAME: &str = "resume";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Pdf,
    Html,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Html => "html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Html => "text/html; charset=utf-8",
        }
    }
}

/// `{title}.{ext}` with whitespace runs collapsed to `_`. Path separators,
/// quotes and control characters also become `_`; an empty title falls back
/// to `resume`.
pub fn export_filename(title: &str, format: DocumentFormat) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if matches!(c, '/' | '\\' | '"' | ':' | ';') || c.is_control() {
            stem.push('_');
        } else {
            stem.push(c);
        }
    }
    if stem.is_empty() {
        stem.push_str(FALLBACK_FILENAME);
    }
    format!("{stem}.{}", format.extension())
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

impl RenderedDocument {
    fn content_disposition(&self) -> HeaderValue {
        let ascii: String = self
            .filename
            .chars()
            .map(|c| if c.is_ascii_graphic() { c } else { '_' })
            .collect();
        let encoded: String = self
            .filename
            .bytes()
            .map(|b| {
                if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
                    (b as char).to_string()
                } else {
                    format!("%{b:02X}")
                }
            })
            .collect();
        HeaderValue::from_str(&format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}"
        ))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
    }
}

impl IntoResponse for RenderedDocument {
    fn into_response(self) -> Response {
        let disposition = self.content_disposition();
        (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(self.content_type)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

/// Renders `record` in `format`. Blocking; see [`render_document_blocking`].
pub fn render_document(
    record: &ResumeRecord,
    format: DocumentFormat,
    html: &HtmlRenderer,
) -> Result<RenderedDocument, DocumentGenerationError> {
    let body = match format {
        DocumentFormat::Pdf => Bytes::from(render_pdf(record)?),
        DocumentFormat::Html => Bytes::from(html.render(record)?),
    };
    debug!(
        "Rendered resume {} as {} ({} bytes)",
        record.id,
        format.extension(),
        body.len()
    );
    Ok(RenderedDocument {
        filename: export_filename(&record.title, format),
        content_type: format.content_type(),
        body,
    })
}

/// Runs [`render_document`] on the blocking pool. A panic inside the
/// renderer surfaces as `DocumentGenerationError::Task`.
pub async fn render_document_blocking(
    record: ResumeRecord,
    format: DocumentFormat,
    html: Arc<HtmlRenderer>,
) -> Result<RenderedDocument, DocumentGenerationError> {
    tokio::task::spawn_blocking(move || render_document(&record, format, &html)).await?
}

/// Writes the document into `dir` under its export file name.
///
/// The bytes go to a temp file in the same directory which is then renamed
/// into place, so a failed write leaves nothing behind.
pub fn save_document(
    document: &RenderedDocument,
    dir: &Path,
) -> Result<PathBuf, DocumentGenerationError> {
    let target = dir.join(&document.filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&document.body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(target)
}
