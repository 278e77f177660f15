use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Canonical résumé model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperience {
    pub job_title: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub is_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution_name: String,
    pub degree_or_program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub is_current: bool,
}

/// The in-progress résumé a worker builds through the bot flow.
///
/// `certifications` is `None` when the draft never carried the field at all;
/// the submitter then falls back to the legacy cache key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperience>,
    pub skills: Vec<String>,
    pub education: Vec<Education>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
}

impl ResumeData {
    pub fn certifications(&self) -> &[String] {
        self.certifications.as_deref().unwrap_or_default()
    }
}

/// Secondary location some submissions use for certifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedResumeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
}

/// A submitted résumé as read back for rendering.
///
/// Top-level keys follow the persisted column names; camelCase spellings are
/// accepted so a submission payload can be rendered directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub id: String,
    pub title: String,
    #[serde(alias = "personalInfo")]
    pub personal_info: PersonalInfo,
    #[serde(alias = "workExperience")]
    pub work_experience: Vec<WorkExperience>,
    pub skills: Vec<String>,
    pub education: Vec<Education>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
    #[serde(alias = "resumeData", skip_serializing_if = "Option::is_none")]
    pub resume_data: Option<NestedResumeData>,
}

impl ResumeRecord {
    /// Resolves certifications: the top-level field wins whenever it is
    /// present, the nested `resume_data.certifications` is the fallback.
    pub fn certifications(&self) -> &[String] {
        self.certifications
            .as_deref()
            .or_else(|| {
                self.resume_data
                    .as_ref()
                    .and_then(|nested| nested.certifications.as_deref())
            })
            .unwrap_or_default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Approval status
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(ApprovalStatus::Pending),
            "approved" => Some(ApprovalStatus::Approved),
            "rejected" => Some(ApprovalStatus::Rejected),
            _ => None,
        }
    }

    /// Recruiters only ever decide on pending résumés.
    pub fn can_transition_to(&self, next: ApprovalStatus) -> bool {
        matches!(
            (self, next),
            (ApprovalStatus::Pending, ApprovalStatus::Approved)
                | (ApprovalStatus::Pending, ApprovalStatus::Rejected)
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted rows
// ────────────────────────────────────────────────────────────────────────────

/// Raw `resumes` row. Section columns are JSON and go through
/// `review::adapter` before anything else touches them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub resume_name: Option<String>,
    pub personal_info: Value,
    pub work_experience: Value,
    pub skills: Value,
    pub education: Value,
    pub certifications: Option<Value>,
    pub resume_data: Option<Value>,
    pub approval_status: String,
    pub trade_category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
