//! Recruiter dashboard: listing summaries, status filter, search and the
//! per-trade engagement counts. Everything here is pure; the repository
//! supplies the rows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::ApprovalStatus;
use crate::models::user::ReviewListingRow;
use crate::review::adapter;

pub const UNCLASSIFIED: &str = "Unclassified";
pub const NO_NAME: &str = "N/A";

/// One row of the recruiter's résumé table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub resume_name: Option<String>,
    /// Profile name, else the résumé's own name, else "N/A".
    pub display_name: String,
    /// Category name, else "Unclassified".
    pub trade_label: String,
    pub approval_status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    search_fields: Vec<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

impl ResumeSummary {
    pub fn from_row(row: &ReviewListingRow) -> Self {
        let resume = &row.resume;
        let personal_name = adapter::personal_info(&resume.personal_info).name;
        let display_name = non_blank(row.full_name.as_deref())
            .or_else(|| non_blank(Some(personal_name.as_str())))
            .unwrap_or(NO_NAME)
            .to_string();
        let trade_label = non_blank(row.trade_name.as_deref())
            .unwrap_or(UNCLASSIFIED)
            .to_string();

        // Search looks at the raw names, not at the fallback labels.
        let search_fields = [
            row.full_name.as_deref(),
            Some(personal_name.as_str()),
            row.trade_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::to_lowercase)
        .collect();

        Self {
            id: resume.id,
            user_id: resume.user_id,
            title: resume.title.clone(),
            resume_name: resume.resume_name.clone(),
            display_name,
            trade_label,
            approval_status: resume.approval_status.clone(),
            created_at: resume.created_at,
            search_fields,
        }
    }

    /// Case-insensitive substring match; an empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty() || self.search_fields.iter().any(|field| field.contains(&term))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn matches(&self, status: &str) -> bool {
        let wanted = match self {
            StatusFilter::All => return true,
            StatusFilter::Pending => ApprovalStatus::Pending,
            StatusFilter::Approved => ApprovalStatus::Approved,
            StatusFilter::Rejected => ApprovalStatus::Rejected,
        };
        ApprovalStatus::parse(status) == Some(wanted)
    }
}

/// Applies the status filter and search term, keeping the input order.
pub fn filter_summaries(
    summaries: Vec<ResumeSummary>,
    status: StatusFilter,
    search: &str,
) -> Vec<ResumeSummary> {
    summaries
        .into_iter()
        .filter(|s| status.matches(&s.approval_status) && s.matches_search(search))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Engagement
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementBucket {
    pub trade_name: String,
    pub count: usize,
    /// Highlighted bar on the dashboard chart.
    pub is_max: bool,
}

/// Résumé count per trade label. Every known category appears, with zero
/// when unused; "Unclassified" appears only when some résumé has no
/// category. Sorted by count descending, then name.
pub fn engagement(summaries: &[ResumeSummary], categories: &[String]) -> Vec<EngagementBucket> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for summary in summaries {
        *counts.entry(summary.trade_label.as_str()).or_default() += 1;
    }
    for category in categories {
        counts.entry(category.as_str()).or_default();
    }

    let max = counts.values().copied().max().unwrap_or(0);
    let mut buckets: Vec<EngagementBucket> = counts
        .into_iter()
        .map(|(name, count)| EngagementBucket {
            trade_name: name.to_string(),
            count,
            is_max: count > 0 && count == max,
        })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.trade_name.cmp(&b.trade_name)));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeRow;
    use serde_json::json;

    fn listing(full_name: Option<&str>, personal_name: &str, trade: Option<&str>, status: &str) -> ReviewListingRow {
        ReviewListingRow {
            resume: ResumeRow {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                title: "Resume".to_string(),
                resume_name: None,
                personal_info: json!({ "name": personal_name }),
                work_experience: json!([]),
                skills: json!([]),
                education: json!([]),
                certifications: None,
                resume_data: None,
                approval_status: status.to_string(),
                trade_category_id: None,
                created_at: Utc::now(),
            },
            full_name: full_name.map(String::from),
            trade_name: trade.map(String::from),
        }
    }

    fn summary(full_name: Option<&str>, personal_name: &str, trade: Option<&str>, status: &str) -> ResumeSummary {
        ResumeSummary::from_row(&listing(full_name, personal_name, trade, status))
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(summary(Some("Ana Ruiz"), "A. Ruiz", None, "pending").display_name, "Ana Ruiz");
        assert_eq!(summary(Some(""), "A. Ruiz", None, "pending").display_name, "A. Ruiz");
        assert_eq!(summary(None, "", None, "pending").display_name, "N/A");
    }

    #[test]
    fn test_trade_label_fallback() {
        assert_eq!(summary(None, "x", None, "pending").trade_label, "Unclassified");
        assert_eq!(summary(None, "x", Some("Welding"), "pending").trade_label, "Welding");
    }

    #[test]
    fn test_search_is_case_insensitive_over_names_and_trade() {
        let s = summary(Some("Ana Ruiz"), "Ana R.", Some("Welding"), "pending");
        assert!(s.matches_search(""));
        assert!(s.matches_search("ana"));
        assert!(s.matches_search("WELD"));
        assert!(!s.matches_search("plumb"));
    }

    #[test]
    fn test_search_does_not_match_fallback_label() {
        let s = summary(None, "Ana", None, "pending");
        assert!(!s.matches_search("unclassified"));
    }

    #[test]
    fn test_status_filter() {
        let rows = vec![
            summary(None, "a", None, "pending"),
            summary(None, "b", None, "approved"),
            summary(None, "c", None, "rejected"),
        ];
        assert_eq!(filter_summaries(rows.clone(), StatusFilter::All, "").len(), 3);
        let approved = filter_summaries(rows, StatusFilter::Approved, "");
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].approval_status, "approved");
    }

    #[test]
    fn test_status_filter_deserializes() {
        let filter: StatusFilter = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(filter, StatusFilter::Rejected);
        assert_eq!(StatusFilter::default(), StatusFilter::All);
    }

    #[test]
    fn test_engagement_counts_zero_categories_and_order() {
        let rows = vec![
            summary(None, "a", Some("Welding"), "pending"),
            summary(None, "b", Some("Welding"), "approved"),
            summary(None, "c", None, "pending"),
            summary(None, "d", Some("Carpentry"), "pending"),
        ];
        let categories = vec!["Carpentry".to_string(), "Plumbing".to_string(), "Welding".to_string()];
        let buckets = engagement(&rows, &categories);
        let names: Vec<_> = buckets.iter().map(|b| (b.trade_name.as_str(), b.count, b.is_max)).collect();
        assert_eq!(
            names,
            vec![
                ("Welding", 2, true),
                ("Carpentry", 1, false),
                ("Unclassified", 1, false),
                ("Plumbing", 0, false),
            ]
        );
    }

    #[test]
    fn test_engagement_without_resumes_has_no_max() {
        let buckets = engagement(&[], &["Welding".to_string()]);
        assert_eq!(
            buckets,
            vec![EngagementBucket {
                trade_name: "Welding".to_string(),
                count: 0,
                is_max: false
            }]
        );
    }
}
