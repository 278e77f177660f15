//! Botpress payload normalization.
//!
//! The conversational flow posts loosely-typed JSON. Personal fields may sit
//! under `personalInfo` or at the top level; list fields may be arrays or
//! comma-separated strings. Work and education items go through the same
//! null-tolerant readers as stored rows; only non-object items are dropped.
//! Everything is folded into a `ResumeData`.

use serde_json::Value;

use crate::models::resume::{PersonalInfo, ResumeData};
use crate::review::adapter;

/// Converts a raw bot payload into the canonical draft shape.
pub fn normalize_botpress_payload(raw: &Value) -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            name: personal_field(raw, "name").unwrap_or_default(),
            email: personal_field(raw, "email").unwrap_or_default(),
            phone: personal_field(raw, "phone"),
            location: personal_field(raw, "location"),
        },
        work_experience: adapter::work_experience(
            raw.get("workExperience").unwrap_or(&Value::Null),
        ),
        skills: string_list(raw.get("skills")),
        education: adapter::education(raw.get("education").unwrap_or(&Value::Null)),
        certifications: Some(string_list(raw.get("certifications"))),
    }
}

/// `personalInfo.<name>`, then top-level `<name>`. Blank values fall through.
fn personal_field(raw: &Value, name: &str) -> Option<String> {
    raw.get("personalInfo")
        .and_then(|info| info.get(name))
        .and_then(scalar_text)
        .or_else(|| raw.get(name).and_then(scalar_text))
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Accepts an array of strings or a comma-separated string. Entries are
/// trimmed and blanks dropped; any other shape yields an empty list.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}
