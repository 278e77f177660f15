//! Résumé document export: paginated PDF, escaped HTML and share QR codes.

pub mod dates;
pub mod export;
pub mod fonts;
pub mod handlers;
pub mod html;
pub mod layout;
pub mod pdf;
pub mod qr;
pub mod view;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentGenerationError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("HTML template error: {0}")]
    Template(#[from] tera::Error),

    #[error("I/O error while saving document: {0}")]
    Io(#[from] std::io::Error),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
