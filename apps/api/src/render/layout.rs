//! Cursor-based page layout for the PDF export.
//!
//! The pass is pure: it turns a `ResumeView` into pages of positioned draw
//! operations and touches no PDF machinery. Coordinates are points measured
//! from the top-left corner of the page; `y` is the text baseline.
//!
//! Before each block the cursor reserves the block's height and starts a new
//! page when `y + height` would cross the bottom margin. Entries and headers
//! use fixed reservations; wrapped text reserves exactly `lines × LINE_HEIGHT`.

use serde::Serialize;

use crate::render::fonts::{wrap_text, FontFace};
use crate::render::view::{ResumeView, Section};

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 40.0;
pub const LINE_HEIGHT: f32 = 15.0;

pub const SECTION_RESERVE: f32 = 100.0;
pub const WORK_ENTRY_RESERVE: f32 = 120.0;
pub const EDUCATION_ENTRY_RESERVE: f32 = 90.0;
pub const CERTIFICATION_RESERVE: f32 = LINE_HEIGHT * 2.0;

const NAME_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 16.0;
const ENTRY_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 11.0;
const INDENT: f32 = 15.0;
const RULE_THICKNESS: f32 = 0.5;

const SKILL_SEPARATOR: &str = " • ";
const BULLET: &str = "• ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    /// Black body text and headings.
    Ink,
    /// Contact details under the name.
    Subtle,
    /// Date and location lines.
    Muted,
}

impl Tone {
    pub fn rgb(&self) -> (f32, f32, f32) {
        match self {
            Tone::Ink => (0.0, 0.0, 0.0),
            Tone::Subtle => (80.0 / 255.0, 80.0 / 255.0, 80.0 / 255.0),
            Tone::Muted => (100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub face: FontFace,
    pub tone: Tone,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text(TextRun),
    /// Horizontal separator under a section heading.
    Rule { x1: f32, x2: f32, y: f32, thickness: f32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    pub pages: Vec<Page>,
}

impl DocumentLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text runs in drawing order, across pages.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|page| {
            page.ops.iter().filter_map(|op| match op {
                DrawOp::Text(run) => Some(run),
                DrawOp::Rule { .. } => None,
            })
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: MARGIN,
        }
    }

    fn bottom() -> f32 {
        PAGE_HEIGHT - MARGIN
    }

    /// Starts a new page when `height` does not fit below the cursor.
    fn reserve(&mut self, height: f32) {
        if self.y + height > Self::bottom() {
            self.pages.push(Page::default());
            self.y = MARGIN;
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text_at(&mut self, x: f32, y: f32, size: f32, face: FontFace, tone: Tone, text: &str) {
        self.push(DrawOp::Text(TextRun {
            x,
            y,
            size,
            face,
            tone,
            text: text.to_string(),
        }));
    }

    fn line(&mut self, x: f32, size: f32, face: FontFace, tone: Tone, text: &str) {
        let y = self.y;
        self.text_at(x, y, size, face, tone, text);
        self.y += LINE_HEIGHT;
    }

    /// Wrapped block with an exact reservation. Blocks taller than a page
    /// continue line by line.
    fn block(&mut self, x: f32, size: f32, face: FontFace, tone: Tone, lines: &[String]) {
        let height = lines.len() as f32 * LINE_HEIGHT;
        if height <= Self::bottom() - MARGIN {
            self.reserve(height);
            for line in lines {
                self.line(x, size, face, tone, line);
            }
        } else {
            for line in lines {
                self.reserve(LINE_HEIGHT);
                self.line(x, size, face, tone, line);
            }
        }
    }

    fn finish(self) -> DocumentLayout {
        DocumentLayout { pages: self.pages }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

pub fn layout_resume(view: &ResumeView) -> DocumentLayout {
    let mut cursor = Cursor::new();

    let name_y = cursor.y + 20.0;
    cursor.text_at(MARGIN, name_y, NAME_SIZE, FontFace::Bold, Tone::Ink, &view.name);
    cursor.y += 40.0;

    let contact_count = view.contacts.len();
    for (i, contact) in view.contacts.iter().enumerate() {
        let y = cursor.y + i as f32 * LINE_HEIGHT;
        let text = format!("{}: {}", contact.label, contact.value);
        cursor.text_at(MARGIN, y, BODY_SIZE, FontFace::Regular, Tone::Subtle, &text);
    }
    cursor.y += LINE_HEIGHT * (contact_count + 1) as f32;

    for section in &view.sections {
        section_heading(&mut cursor, *section);
        match section {
            Section::WorkExperience => work_experience(&mut cursor, view),
            Section::Skills => skills(&mut cursor, view),
            Section::Education => education(&mut cursor, view),
            Section::Certifications => certifications(&mut cursor, view),
        }
    }

    cursor.finish()
}

fn section_heading(cursor: &mut Cursor, section: Section) {
    cursor.reserve(SECTION_RESERVE);
    cursor.y += 20.0;
    let y = cursor.y;
    cursor.text_at(MARGIN, y, HEADING_SIZE, FontFace::Bold, Tone::Ink, section.heading());
    cursor.push(DrawOp::Rule {
        x1: MARGIN,
        x2: PAGE_WIDTH - MARGIN,
        y: y + 5.0,
        thickness: RULE_THICKNESS,
    });
    cursor.y += 30.0;
}

fn work_experience(cursor: &mut Cursor, view: &ResumeView) {
    let x = MARGIN + INDENT;
    let wrap_width = PAGE_WIDTH - MARGIN * 3.0;

    for exp in &view.experiences {
        cursor.reserve(WORK_ENTRY_RESERVE);
        cursor.line(x, ENTRY_SIZE, FontFace::Bold, Tone::Ink, &exp.job_title);
        cursor.line(x, ENTRY_SIZE, FontFace::Regular, Tone::Ink, &exp.company_name);
        if let Some(detail) = &exp.detail_line {
            cursor.line(x, ENTRY_SIZE, FontFace::Regular, Tone::Muted, detail);
        }
        if let Some(description) = &exp.description {
            let lines = wrap_text(description, FontFace::Regular, ENTRY_SIZE, wrap_width);
            cursor.block(x, ENTRY_SIZE, FontFace::Regular, Tone::Ink, &lines);
        }
        cursor.y += LINE_HEIGHT;
    }
}

fn skills(cursor: &mut Cursor, view: &ResumeView) {
    let x = MARGIN + INDENT;
    let wrap_width = PAGE_WIDTH - MARGIN * 2.0 - INDENT;
    let text = view.skills.join(SKILL_SEPARATOR);
    let lines = wrap_text(&text, FontFace::Regular, BODY_SIZE, wrap_width);
    cursor.block(x, BODY_SIZE, FontFace::Regular, Tone::Ink, &lines);
    cursor.y += LINE_HEIGHT;
}

fn education(cursor: &mut Cursor, view: &ResumeView) {
    let x = MARGIN + INDENT;

    for edu in &view.education {
        cursor.reserve(EDUCATION_ENTRY_RESERVE);
        cursor.line(x, ENTRY_SIZE, FontFace::Bold, Tone::Ink, &edu.degree_or_program);
        cursor.line(x, ENTRY_SIZE, FontFace::Regular, Tone::Ink, &edu.institution_name);
        if let Some(field) = &edu.field_of_study {
            cursor.line(x, ENTRY_SIZE, FontFace::Regular, Tone::Ink, field);
        }
        match &edu.date_line {
            Some(dates) => {
                let y = cursor.y;
                cursor.text_at(x, y, ENTRY_SIZE, FontFace::Regular, Tone::Muted, dates);
                cursor.y += LINE_HEIGHT * 1.5;
            }
            None => cursor.y += LINE_HEIGHT * 0.5,
        }
    }
}

fn certifications(cursor: &mut Cursor, view: &ResumeView) {
    let x = MARGIN + INDENT;

    for cert in &view.certifications {
        cursor.reserve(CERTIFICATION_RESERVE);
        let y = cursor.y;
        let text = format!("{BULLET}{cert}");
        cursor.text_at(x, y, BODY_SIZE, FontFace::Regular, Tone::Ink, &text);
        cursor.y += LINE_HEIGHT * 1.5;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
