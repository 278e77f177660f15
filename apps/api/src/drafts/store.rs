//! The single in-progress résumé slot of a worker.
//!
//! The slot is backed by a `KeyValueCache` under fixed keys. Readiness is an
//! explicit flag (`resumeReady`), never inferred from the payload key. Last
//! write wins; callers are expected to operate sequentially within a session.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::drafts::cache::{KeyValueCache, StorageError};
use crate::models::resume::ResumeData;

pub const DRAFT_KEY: &str = "resumeData";
pub const READY_KEY: &str = "resumeReady";
/// Older bot flows stored certifications on their own.
pub const LEGACY_CERTIFICATIONS_KEY: &str = "certifications";
pub const SUBMISSION_KEY: &str = "submissionKey";

#[derive(Clone)]
pub struct DraftStore {
    cache: Arc<dyn KeyValueCache>,
    namespace: String,
}

impl DraftStore {
    /// A store whose keys are exactly the fixed key names.
    pub fn new(cache: Arc<dyn KeyValueCache>) -> Self {
        Self {
            cache,
            namespace: String::new(),
        }
    }

    /// A store scoped to one worker on a shared cache.
    pub fn for_worker(cache: Arc<dyn KeyValueCache>, worker_id: Uuid) -> Self {
        Self {
            cache,
            namespace: worker_id.to_string(),
        }
    }

    fn key(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("drafts:{}:{}", self.namespace, name)
        }
    }

    /// Returns the current draft. A payload that no longer decodes is logged
    /// and treated as absent.
    pub async fn get(&self) -> Result<Option<ResumeData>, StorageError> {
        let Some(raw) = self.cache.get(&self.key(DRAFT_KEY)).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<ResumeData>(&raw) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                warn!(namespace = %self.namespace, "Discarding unreadable draft payload: {e}");
                Ok(None)
            }
        }
    }

    /// Overwrites the draft and marks it ready in one atomic write.
    pub async fn set(&self, data: &ResumeData) -> Result<(), StorageError> {
        let payload = serde_json::to_string(data)?;
        let draft_key = self.key(DRAFT_KEY);
        let ready_key = self.key(READY_KEY);
        self.cache
            .set_many(&[(draft_key.as_str(), payload.as_str()), (ready_key.as_str(), "true")])
            .await?;
        debug!(namespace = %self.namespace, "Draft saved");
        Ok(())
    }

    pub async fn is_ready(&self) -> Result<bool, StorageError> {
        Ok(self.cache.get(&self.key(READY_KEY)).await?.as_deref() == Some("true"))
    }

    /// Removes the draft, its ready flag and any pending submission key.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.cache.remove(&self.key(DRAFT_KEY)).await?;
        self.cache.remove(&self.key(READY_KEY)).await?;
        self.cache.remove(&self.key(SUBMISSION_KEY)).await?;
        debug!(namespace = %self.namespace, "Draft cleared");
        Ok(())
    }

    /// Certifications saved under the legacy key, if any decode.
    pub async fn legacy_certifications(&self) -> Result<Option<Vec<String>>, StorageError> {
        let Some(raw) = self
            .cache
            .get(&self.key(LEGACY_CERTIFICATIONS_KEY))
            .await?
        else {
            return Ok(None);
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(certs) => Ok(Some(certs)),
            Err(e) => {
                warn!(namespace = %self.namespace, "Ignoring unreadable legacy certifications: {e}");
                Ok(None)
            }
        }
    }

    /// Idempotency key for submitting the current draft. Created on first use
    /// and reused until the draft is cleared.
    pub async fn submission_key(&self) -> Result<String, StorageError> {
        let key = self.key(SUBMISSION_KEY);
        if let Some(existing) = self.cache.get(&key).await? {
            return Ok(existing);
        }
        let fresh = Uuid::new_v4().to_string();
        self.cache.set(&key, &fresh).await?;
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafts::cache::MemoryCache;
    use crate::models::resume::PersonalInfo;

    fn sample_draft() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                name: "Oreo".to_string(),
                email: "oreo@example.com".to_string(),
                phone: Some("9876543210".to_string()),
                location: None,
            },
            skills: vec!["machine operator".to_string()],
            certifications: Some(vec!["Trade School Certification".to_string()]),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_store_has_no_draft_and_is_not_ready() {
        let store = DraftStore::new(Arc::new(MemoryCache::new()));
        assert!(store.get().await.unwrap().is_none());
        assert!(!store.is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn test_set_then_get_returns_draft_and_ready() {
        let store = DraftStore::new(Arc::new(MemoryCache::new()));
        let draft = sample_draft();
        store.set(&draft).await.unwrap();

        assert_eq!(store.get().await.unwrap(), Some(draft));
        assert!(store.is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = DraftStore::new(Arc::new(MemoryCache::new()));
        store.set(&sample_draft()).await.unwrap();

        let mut second = sample_draft();
        second.personal_info.name = "Second".to_string();
        store.set(&second).await.unwrap();

        assert_eq!(
            store.get().await.unwrap().unwrap().personal_info.name,
            "Second"
        );
    }

    #[tokio::test]
    async fn test_clear_removes_draft_flag_and_submission_key() {
        let cache = Arc::new(MemoryCache::new());
        let store = DraftStore::new(cache.clone());
        store.set(&sample_draft()).await.unwrap();
        let first_key = store.submission_key().await.unwrap();

        store.clear().await.unwrap();

        assert!(store.get().await.unwrap().is_none());
        assert!(!store.is_ready().await.unwrap());
        assert!(cache.get(SUBMISSION_KEY).await.unwrap().is_none());
        assert_ne!(store.submission_key().await.unwrap(), first_key);
    }

    /// Accepts single writes but refuses batches.
    struct NoBatchCache(MemoryCache);

    #[async_trait::async_trait]
    impl KeyValueCache for NoBatchCache {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key).await
        }
        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.set(key, value).await
        }
        async fn set_many(&self, _entries: &[(&str, &str)]) -> Result<(), StorageError> {
            Err(StorageError::Backend("EXECABORT".to_string()))
        }
        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_failed_save_leaves_neither_payload_nor_flag() {
        let store = DraftStore::new(Arc::new(NoBatchCache(MemoryCache::new())));
        assert!(store.set(&sample_draft()).await.is_err());
        assert!(store.get().await.unwrap().is_none());
        assert!(!store.is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_payload_reads_as_absent() {
        let cache = Arc::new(MemoryCache::new());
        cache.set(DRAFT_KEY, "{not json").await.unwrap();
        let store = DraftStore::new(cache);
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ready_flag_requires_literal_true() {
        let cache = Arc::new(MemoryCache::new());
        cache.set(READY_KEY, "yes").await.unwrap();
        let store = DraftStore::new(cache);
        assert!(!store.is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn test_worker_stores_do_not_share_slots() {
        let cache: Arc<dyn KeyValueCache> = Arc::new(MemoryCache::new());
        let a = DraftStore::for_worker(cache.clone(), Uuid::new_v4());
        let b = DraftStore::for_worker(cache.clone(), Uuid::new_v4());

        a.set(&sample_draft()).await.unwrap();

        assert!(a.is_ready().await.unwrap());
        assert!(!b.is_ready().await.unwrap());
        assert!(b.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_submission_key_is_stable_until_cleared() {
        let store = DraftStore::new(Arc::new(MemoryCache::new()));
        let first = store.submission_key().await.unwrap();
        let second = store.submission_key().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_legacy_certifications_decoding() {
        let cache = Arc::new(MemoryCache::new());
        let store = DraftStore::new(cache.clone());
        assert_eq!(store.legacy_certifications().await.unwrap(), None);

        cache
            .set(LEGACY_CERTIFICATIONS_KEY, r#"["Forklift"]"#)
            .await
            .unwrap();
        assert_eq!(
            store.legacy_certifications().await.unwrap(),
            Some(vec!["Forklift".to_string()])
        );

        cache.set(LEGACY_CERTIFICATIONS_KEY, "oops").await.unwrap();
        assert_eq!(store.legacy_certifications().await.unwrap(), None);
    }
}
