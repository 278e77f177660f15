//! Self-contained HTML export.
//!
//! The template is registered under an `.html` name, so Tera escapes every
//! interpolated value.

use tera::{Context, Tera};

use crate::models::resume::ResumeRecord;
use crate::render::view::ResumeView;
use crate::render::DocumentGenerationError;

const TEMPLATE_NAME: &str = "resume.html";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 40px; color: #333; }
        h1 { font-size: 2.5em; margin-bottom: 10px; color: #1a1a1a; }
        h2 { font-size: 1.5em; margin-top: 30px; margin-bottom: 15px; color: #2563eb; border-bottom: 2px solid #2563eb; padding-bottom: 5px; }
        .contact-info { margin-bottom: 30px; color: #666; }
        .contact-info span { margin-right: 20px; }
        .experience-item, .education-item { margin-bottom: 20px; padding-left: 15px; border-left: 3px solid #2563eb; }
        .job-title, .degree { font-size: 1.2em; font-weight: bold; color: #1a1a1a; }
        .company, .institution { font-weight: 600; color: #444; }
        .date-range { color: #666; font-size: 0.9em; }
        .description { white-space: pre-line; }
        .skills { display: flex; flex-wrap: wrap; gap: 10px; }
        .skill-tag { background-color: #e0f2fe; color: #0369a1; padding: 5px 15px; border-radius: 20px; font-size: 0.9em; }
    </style>
</head>
<body>
    <h1>{{ name }}</h1>
    <div class="contact-info">
{%- for contact in contacts %}
        <span class="{{ contact.kind }}">{{ contact.label }}: {{ contact.value }}</span>
{%- endfor %}
    </div>
{%- for section in sections %}
{%- if section == "work_experience" %}
    <h2>Work Experience</h2>
{%- for exp in experiences %}
    <div class="experience-item">
        <div class="job-title">{{ exp.job_title }}</div>
        <div class="company">{{ exp.company_name }}</div>
{%- if exp.detail_line %}
        <div class="date-range">{{ exp.detail_line }}</div>
{%- endif %}
{%- if exp.description %}
        <p class="description">{{ exp.description }}</p>
{%- endif %}
    </div>
{%- endfor %}
{%- elif section == "skills" %}
    <h2>Skills</h2>
    <div class="skills">
{%- for skill in skills %}
        <span class="skill-tag">{{ skill }}</span>
{%- endfor %}
    </div>
{%- elif section == "education" %}
    <h2>Education</h2>
{%- for edu in education %}
    <div class="education-item">
        <div class="degree">{{ edu.degree_or_program }}</div>
        <div class="institution">{{ edu.institution_name }}</div>
{%- if edu.field_of_study %}
        <div>{{ edu.field_of_study }}</div>
{%- endif %}
{%- if edu.date_line %}
        <div class="date-range">{{ edu.date_line }}</div>
{%- endif %}
    </div>
{%- endfor %}
{%- elif section == "certifications" %}
    <h2>Certifications &amp; Licenses</h2>
{%- for cert in certifications %}
    <div class="education-item">
        <div class="degree">{{ cert }}</div>
    </div>
{%- endfor %}
{%- endif %}
{%- endfor %}
</body>
</html>
"#;

/// Holds the compiled template; build once and share.
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, DocumentGenerationError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;
        Ok(Self { tera })
    }

    pub fn render(&self, record: &ResumeRecord) -> Result<String, DocumentGenerationError> {
        let view = ResumeView::from_record(record);
        let context = Context::from_serialize(&view)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}
