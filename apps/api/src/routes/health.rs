use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service version and which draft backend is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let drafts = if state.config.redis_url.is_some() {
        "redis"
    } else {
        "memory"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-desk",
        "drafts": drafts
    }))
}
