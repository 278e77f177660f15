use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::resume::ResumeRow;

/// `user_roles` row; only the role string matters to the service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRoleRow {
    pub user_id: Uuid,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TradeCategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// One résumé joined with the worker profile and its trade category,
/// as listed on the recruiter dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewListingRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub resume: ResumeRow,
    pub full_name: Option<String>,
    pub trade_name: Option<String>,
}
