//! Writes a `DocumentLayout` out through printpdf.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use tracing::warn;

use crate::models::resume::ResumeRecord;
use crate::render::fonts::FontFace;
use crate::render::layout::{layout_resume, DocumentLayout, DrawOp, Tone, PAGE_HEIGHT, PAGE_WIDTH};
use crate::render::view::ResumeView;
use crate::render::DocumentGenerationError;

const LAYER_NAME: &str = "Layer 1";

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn color(tone: Tone) -> Color {
    let (r, g, b) = tone.rgb();
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn pdf_error(e: impl std::fmt::Display) -> DocumentGenerationError {
    DocumentGenerationError::Pdf(e.to_string())
}

/// Whether the builtin fonts can show `c`. They are WinAnsi-encoded, so
/// anything outside Latin-1 and the cp1252 extras is dropped by the writer.
fn has_builtin_glyph(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}')
        || matches!(
            c,
            '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž'
                | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '•'
                | '\u{2013}' | '\u{2014}' | '˜' | '™' | 'š' | '›' | 'œ' | 'ž' | 'Ÿ'
        )
}

/// Number of characters in `text` the builtin fonts cannot show.
pub fn missing_glyphs(text: &str) -> usize {
    text.chars().filter(|c| !has_builtin_glyph(*c)).count()
}

/// Lays out and writes a record as an A4 PDF.
pub fn render_pdf(record: &ResumeRecord) -> Result<Vec<u8>, DocumentGenerationError> {
    let view = ResumeView::from_record(record);
    let layout = layout_resume(&view);
    write_pdf(&view.title, &layout)
}

pub fn write_pdf(title: &str, layout: &DocumentLayout) -> Result<Vec<u8>, DocumentGenerationError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let dropped: usize = layout.text_runs().map(|run| missing_glyphs(&run.text)).sum();
    if dropped > 0 {
        warn!(
            "{dropped} character(s) in \"{title}\" have no Helvetica glyph and will be \
             missing from the PDF"
        );
    }

    let mut first = Some((first_page, first_layer));
    for page in &layout.pages {
        let (page_index, layer_index) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), LAYER_NAME),
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for op in &page.ops {
            draw(&layer, op, &regular, &bold);
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn draw(layer: &PdfLayerReference, op: &DrawOp, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    match op {
        DrawOp::Text(run) => {
            let font = match run.face {
                FontFace::Regular => regular,
                FontFace::Bold => bold,
            };
            layer.set_fill_color(color(run.tone));
            layer.use_text(
                run.text.as_str(),
                run.size,
                mm(run.x),
                mm(PAGE_HEIGHT - run.y),
                font,
            );
        }
        DrawOp::Rule { x1, x2, y, thickness } => {
            let baseline = mm(PAGE_HEIGHT - y);
            layer.set_outline_color(color(Tone::Ink));
            layer.set_outline_thickness(*thickness);
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(*x1), baseline), false),
                    (Point::new(mm(*x2), baseline), false),
                ],
                is_closed: false,
            });
        }
    }
}
