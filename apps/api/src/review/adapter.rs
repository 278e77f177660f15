//! Row → canonical record conversion.
//!
//! Persisted section columns (and the bot payloads feeding them) were written
//! by several generations of the bot flow, so items may use camelCase or
//! snake_case keys, nulls, or string booleans, and skills may be plain
//! strings or `{name}` / `{skill_name}` objects. This is the only place that
//! knows about the alternate spellings.

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::resume::{
    Education, NestedResumeData, PersonalInfo, ResumeRecord, ResumeRow, WorkExperience,
};

/// First non-null value under any of `keys`.
fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

fn text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match field(obj, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn flag(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    match field(obj, keys) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Object items of a JSON array column; anything else is dropped.
fn objects<'a>(value: &'a Value, column: &str) -> Vec<&'a Map<String, Value>> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let obj = item.as_object();
            if obj.is_none() {
                warn!("Skipping non-object {column}[{index}] in stored resume");
            }
            obj
        })
        .collect()
}

pub fn personal_info(value: &Value) -> PersonalInfo {
    let Some(obj) = value.as_object() else {
        return PersonalInfo::default();
    };
    PersonalInfo {
        name: text(obj, &["name"]).unwrap_or_default(),
        email: text(obj, &["email"]).unwrap_or_default(),
        phone: text(obj, &["phone"]),
        location: text(obj, &["location"]),
    }
}

pub fn work_experience(value: &Value) -> Vec<WorkExperience> {
    objects(value, "work_experience")
        .into_iter()
        .map(|obj| WorkExperience {
            job_title: text(obj, &["jobTitle", "job_title"]).unwrap_or_default(),
            company_name: text(obj, &["companyName", "company_name"]).unwrap_or_default(),
            location: text(obj, &["location"]),
            start_date: text(obj, &["startDate", "start_date"]).unwrap_or_default(),
            end_date: text(obj, &["endDate", "end_date"]),
            is_current: flag(obj, &["isCurrent", "is_current"]),
            description: text(obj, &["description"]),
        })
        .collect()
}

pub fn education(value: &Value) -> Vec<Education> {
    objects(value, "education")
        .into_iter()
        .map(|obj| Education {
            institution_name: text(obj, &["institutionName", "institution_name"])
                .unwrap_or_default(),
            degree_or_program: text(obj, &["degreeOrProgram", "degree_or_program"])
                .unwrap_or_default(),
            field_of_study: text(obj, &["fieldOfStudy", "field_of_study"]),
            start_date: text(obj, &["startDate", "start_date"]),
            end_date: text(obj, &["endDate", "end_date"]),
            is_current: flag(obj, &["isCurrent", "is_current"]),
        })
        .collect()
}

/// Strings, or objects carrying `name` / `skill_name`. Blank entries are dropped.
pub fn skills(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => field(obj, &["name", "skill_name"]).and_then(Value::as_str),
            _ => None,
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// `None` when the column is absent or not a list, so the nested fallback
/// can apply.
pub fn certifications(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    )
}

pub fn resume_record(row: &ResumeRow) -> ResumeRecord {
    let nested = row
        .resume_data
        .as_ref()
        .and_then(|data| data.get("certifications"))
        .and_then(|certs| certifications(Some(certs)))
        .map(|certs| NestedResumeData {
            certifications: Some(certs),
        });

    ResumeRecord {
        id: row.id.to_string(),
        title: row.title.clone(),
        personal_info: personal_info(&row.personal_info),
        work_experience: work_experience(&row.work_experience),
        skills: skills(&row.skills),
        education: education(&row.education),
        certifications: certifications(row.certifications.as_ref()),
        resume_data: nested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn row(work: Value, skills_col: Value) -> ResumeRow {
        ResumeRow {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            title: "Ana Ruiz Resume".to_string(),
            resume_name: None,
            personal_info: json!({ "name": "Ana Ruiz", "email": "ana@example.com" }),
            work_experience: work,
            skills: skills_col,
            education: json!([]),
            certifications: None,
            resume_data: None,
            approval_status: "pending".to_string(),
            trade_category_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_snake_and_camel_items_converge() {
        let record = resume_record(&row(
            json!([
                { "jobTitle": "Welder", "companyName": "Acme", "startDate": "2021-03-01", "isCurrent": true },
                { "job_title": "Fitter", "company_name": "Beta", "start_date": "2019-01-01", "end_date": "2020-12-01" }
            ]),
            json!([]),
        ));
        assert_eq!(record.work_experience.len(), 2);
        assert_eq!(record.work_experience[0].job_title, "Welder");
        assert!(record.work_experience[0].is_current);
        assert_eq!(record.work_experience[1].company_name, "Beta");
        assert_eq!(record.work_experience[1].end_date.as_deref(), Some("2020-12-01"));
        assert!(!record.work_experience[1].is_current);
    }

    #[test]
    fn test_non_object_items_dropped() {
        let record = resume_record(&row(json!(["Welder at Acme", null, {"jobTitle": "Welder"}]), json!([])));
        assert_eq!(record.work_experience.len(), 1);
    }

    #[test]
    fn test_skill_shapes() {
        let record = resume_record(&row(
            json!([]),
            json!(["welding", { "name": "rigging" }, { "skill_name": "forklift" }, { "level": 3 }, "  "]),
        ));
        assert_eq!(record.skills, vec!["welding", "rigging", "forklift"]);
    }

    #[test]
    fn test_certification_precedence_preserved() {
        let mut r = row(json!([]), json!([]));
        r.resume_data = Some(json!({ "certifications": ["Forklift"] }));
        assert_eq!(resume_record(&r).certifications(), ["Forklift".to_string()]);

        r.certifications = Some(json!(["OSHA 10"]));
        assert_eq!(resume_record(&r).certifications(), ["OSHA 10".to_string()]);
    }

    #[test]
    fn test_education_snake_case() {
        let mut r = row(json!([]), json!([]));
        r.education = json!([{ "institution_name": "Austin CC", "degree_or_program": "Certificate", "field_of_study": "Welding", "is_current": "true" }]);
        let record = resume_record(&r);
        assert_eq!(record.education[0].institution_name, "Austin CC");
        assert_eq!(record.education[0].field_of_study.as_deref(), Some("Welding"));
        assert!(record.education[0].is_current);
    }

    #[test]
    fn test_personal_info_not_object_is_default() {
        let mut r = row(json!([]), json!([]));
        r.personal_info = json!("Ana");
        assert_eq!(resume_record(&r).personal_info, PersonalInfo::default());
    }
}
