//! Scannable share codes for persisted résumés.

use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use uuid::Uuid;

use crate::render::DocumentGenerationError;

pub const DEFAULT_QR_SIZE: u32 = 200;
pub const MIN_QR_SIZE: u32 = 64;
pub const MAX_QR_SIZE: u32 = 2048;

/// Where a scanned code lands: the HTML export of the résumé.
pub fn share_url(public_base_url: &str, resume_id: Uuid) -> String {
    format!(
        "{}/api/v1/resumes/{resume_id}/export?format=html",
        public_base_url.trim_end_matches('/')
    )
}

fn encode(data: &str) -> Result<QrCode, DocumentGenerationError> {
    QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)
        .map_err(|e| DocumentGenerationError::Qr(e.to_string()))
}

/// SVG QR code of `data` at error-correction level H, quiet zone included,
/// at least `size` px on each side.
pub fn render_qr_svg(data: &str, size: u32) -> Result<String, DocumentGenerationError> {
    let code = encode(data)?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .quiet_zone(true)
        .build())
}
