use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const WORK_EXPERIENCE_REQUIRED: &str = "At least one work experience is required";
pub const SKILL_REQUIRED: &str = "At least one skill is required";

/// Checks a draft for completeness before submission.
///
/// Every rule is evaluated; all violations are reported in rule order.
/// Education and certifications are optional.
pub fn validate_resume_data(data: &ResumeData) -> ValidationReport {
    let mut errors = Vec::new();

    if data.personal_info.name.trim().is_empty() {
        errors.push(NAME_REQUIRED.to_string());
    }
    if data.personal_info.email.trim().is_empty() {
        errors.push(EMAIL_REQUIRED.to_string());
    }
    if data.work_experience.is_empty() {
        errors.push(WORK_EXPERIENCE_REQUIRED.to_string());
    }
    if data.skills.is_empty() {
        errors.push(SKILL_REQUIRED.to_string());
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{PersonalInfo, WorkExperience};

    fn complete_draft() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                name: "Ana Ruiz".to_string(),
                email: "ana@example.com".to_string(),
                ..Default::default()
            },
            work_experience: vec![WorkExperience {
                job_title: "Welder".to_string(),
                company_name: "Acme".to_string(),
                start_date: "2021-03-01".to_string(),
                ..Default::default()
            }],
            skills: vec!["welding".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_draft_is_valid() {
        let report = validate_resume_data(&complete_draft());
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_empty_draft_reports_all_violations_in_order() {
        let report = validate_resume_data(&ResumeData::default());
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![
                NAME_REQUIRED,
                EMAIL_REQUIRED,
                WORK_EXPERIENCE_REQUIRED,
                SKILL_REQUIRED
            ]
        );
    }

    #[test]
    fn test_whitespace_name_is_missing() {
        let mut draft = complete_draft();
        draft.personal_info.name = "   ".to_string();
        let report = validate_resume_data(&draft);
        assert!(!report.valid);
        assert_eq!(report.errors, vec![NAME_REQUIRED]);
    }

    #[test]
    fn test_education_and_certifications_not_required() {
        let mut draft = complete_draft();
        draft.education.clear();
        draft.certifications = None;
        assert!(validate_resume_data(&draft).valid);
    }

    #[test]
    fn test_missing_skill_only() {
        let mut draft = complete_draft();
        draft.skills.clear();
        let report = validate_resume_data(&draft);
        assert_eq!(report.errors, vec![SKILL_REQUIRED]);
    }
}
