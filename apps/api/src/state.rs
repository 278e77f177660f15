use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::drafts::cache::KeyValueCache;
use crate::drafts::store::DraftStore;
use crate::drafts::submitter::ResumeSubmitter;
use crate::render::html::HtmlRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Backing cache for worker drafts (Redis, or memory when unconfigured).
    pub drafts: Arc<dyn KeyValueCache>,
    pub submitter: ResumeSubmitter,
    /// Compiled once at startup.
    pub html: Arc<HtmlRenderer>,
    pub config: Config,
}

impl AppState {
    pub fn draft_store(&self, worker_id: Uuid) -> DraftStore {
        DraftStore::for_worker(self.drafts.clone(), worker_id)
    }
}
