//! Render-ready view of a `ResumeRecord`.
//!
//! Both renderers consume this view, so section presence, ordering and date
//! labels cannot drift between the PDF and the HTML output.

use serde::Serialize;

use crate::models::resume::ResumeRecord;
use crate::render::dates::date_range;

/// Résumé sections in their fixed output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    WorkExperience,
    Skills,
    Education,
    Certifications,
}

impl Section {
    pub fn heading(&self) -> &'static str {
        match self {
            Section::WorkExperience => "Work Experience",
            Section::Skills => "Skills",
            Section::Education => "Education",
            Section::Certifications => "Certifications & Licenses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Location,
}

impl ContactKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContactKind::Email => "Email",
            ContactKind::Phone => "Phone",
            ContactKind::Location => "Location",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactLine {
    pub kind: ContactKind,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceView {
    pub job_title: String,
    pub company_name: String,
    /// `"{location} | {dates}"`, or whichever half is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationView {
    pub degree_or_program: String,
    pub institution_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeView {
    pub title: String,
    pub name: String,
    pub contacts: Vec<ContactLine>,
    pub experiences: Vec<ExperienceView>,
    pub skills: Vec<String>,
    pub education: Vec<EducationView>,
    pub certifications: Vec<String>,
    pub sections: Vec<Section>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

impl ResumeView {
    pub fn from_record(record: &ResumeRecord) -> Self {
        let info = &record.personal_info;
        let contacts = [
            (ContactKind::Email, Some(info.email.as_str())),
            (ContactKind::Phone, info.phone.as_deref()),
            (ContactKind::Location, info.location.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, value)| {
            non_blank(value).map(|value| ContactLine {
                kind,
                label: kind.label(),
                value,
            })
        })
        .collect();

        let experiences: Vec<ExperienceView> = record
            .work_experience
            .iter()
            .map(|exp| {
                let dates = date_range(Some(&exp.start_date), exp.end_date.as_deref(), exp.is_current);
                let detail_line = match (non_blank(exp.location.as_deref()), dates) {
                    (Some(location), Some(dates)) => Some(format!("{location} | {dates}")),
                    (location, dates) => location.or(dates),
                };
                ExperienceView {
                    job_title: exp.job_title.clone(),
                    company_name: exp.company_name.clone(),
                    detail_line,
                    description: non_blank(exp.description.as_deref()),
                }
            })
            .collect();

        let education: Vec<EducationView> = record
            .education
            .iter()
            .map(|edu| EducationView {
                degree_or_program: edu.degree_or_program.clone(),
                institution_name: edu.institution_name.clone(),
                field_of_study: non_blank(edu.field_of_study.as_deref()),
                date_line: date_range(
                    edu.start_date.as_deref(),
                    edu.end_date.as_deref(),
                    edu.is_current,
                ),
            })
            .collect();

        let skills = record.skills.clone();
        let certifications = record.certifications().to_vec();

        let mut sections = Vec::new();
        if !experiences.is_empty() {
            sections.push(Section::WorkExperience);
        }
        if !skills.is_empty() {
            sections.push(Section::Skills);
        }
        if !education.is_empty() {
            sections.push(Section::Education);
        }
        if !certifications.is_empty() {
            sections.push(Section::Certifications);
        }

        ResumeView {
            title: record.title.clone(),
            name: info.name.clone(),
            contacts,
            experiences,
            skills,
            education,
            certifications,
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, NestedResumeData, PersonalInfo, WorkExperience};

    fn record() -> ResumeRecord {
        ResumeRecord {
            id: "r1".to_string(),
            title: "Ana Ruiz Resume".to_string(),
            personal_info: PersonalInfo {
                name: "Ana Ruiz".to_string(),
                email: "ana@example.com".to_string(),
                phone: Some("".to_string()),
                location: Some("Austin, TX".to_string()),
            },
            work_experience: vec![WorkExperience {
                job_title: "Welder".to_string(),
                company_name: "Acme".to_string(),
                location: Some("Houston".to_string()),
                start_date: "2021-03-01".to_string(),
                is_current: true,
                ..Default::default()
            }],
            skills: vec!["welding".to_string()],
            education: vec![Education {
                institution_name: "Austin CC".to_string(),
                degree_or_program: "Welding Certificate".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let mut r = record();
        r.certifications = Some(vec!["OSHA 10".to_string()]);
        let view = ResumeView::from_record(&r);
        assert_eq!(
            view.sections,
            vec![
                Section::WorkExperience,
                Section::Skills,
                Section::Education,
                Section::Certifications
            ]
        );
    }

    #[test]
    fn test_empty_sections_omitted() {
        let mut r = record();
        r.work_experience.clear();
        r.education.clear();
        let view = ResumeView::from_record(&r);
        assert_eq!(view.sections, vec![Section::Skills]);
    }

    #[test]
    fn test_blank_contacts_dropped() {
        let view = ResumeView::from_record(&record());
        let kinds: Vec<_> = view.contacts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ContactKind::Email, ContactKind::Location]);
    }

    #[test]
    fn test_experience_detail_line_prefixes_location() {
        let view = ResumeView::from_record(&record());
        assert_eq!(
            view.experiences[0].detail_line.as_deref(),
            Some("Houston | Mar 2021 - Present")
        );
    }

    #[test]
    fn test_education_without_dates_has_no_date_line() {
        let view = ResumeView::from_record(&record());
        assert_eq!(view.education[0].date_line, None);
    }

    #[test]
    fn test_nested_certifications_used_when_top_level_absent() {
        let mut r = record();
        r.resume_data = Some(NestedResumeData {
            certifications: Some(vec!["Forklift".to_string()]),
        });
        let view = ResumeView::from_record(&r);
        assert_eq!(view.certifications, vec!["Forklift"]);
        assert_eq!(view.sections.last(), Some(&Section::Certifications));
    }
}
