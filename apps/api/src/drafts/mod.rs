//! Worker drafts: cache-backed storage, bot payload normalization,
//! validation and submission to the backend.

pub mod cache;
pub mod handlers;
pub mod normalizer;
pub mod store;
pub mod submitter;
pub mod validation;
