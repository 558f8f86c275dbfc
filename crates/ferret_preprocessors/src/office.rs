//! Office (OOXML) text and metadata preprocessors (spec §4.2): `.docx`,
//! `.xlsx`, `.pptx` are ZIP archives of XML parts.

use ferret_protocol::{MetadataField, PreprocessError, ProcessedContent, ProcessorType};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

fn open_archive(path: &Path) -> Result<ZipArchive<std::fs::File>, PreprocessError> {
    let file = std::fs::File::open(path).map_err(|e| PreprocessError::Io(e.to_string()))?;
    ZipArchive::new(file).map_err(|e| PreprocessError::Malformed {
        format: "office".into(),
        message: e.to_string(),
    })
}

fn read_zip_entry(archive: &mut ZipArchive<std::fs::File>, name: &str) -> Option<String> {
    let mut entry = archive.by_name(name).ok()?;
    let mut buf = String::new();
    entry.read_to_string(&mut buf).ok()?;
    Some(buf)
}

#[derive(PartialEq, Clone, Copy)]
enum LegacyField {
    None,
    Instr,
    Result,
}

/// Flattened run of XML text content under a given element, joining
/// `w:t`/`a:t` text runs and honoring `w:tab`/`w:br` as structural markers
/// the way Word/PowerPoint serialize paragraph breaks. Form fields —
/// `w:fldSimple`, `w:sdt` content controls, and legacy `w:fldChar`
/// begin/separate/end sequences — are emitted as `[FORM:value]` markers
/// rather than plain text (spec §4.2 "Office text").
fn extract_text_runs(xml: &str, text_tag: &[u8], para_tag: &[u8], row_tag: &[u8], cell_tag: &[u8]) -> String {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut out = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();
    let mut first_cell_in_row = true;

    let mut form_nest: usize = 0;
    let mut form_buf = String::new();
    let mut legacy_field = LegacyField::None;
    let mut legacy_buf = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == text_tag => in_text = true,
            Ok(Event::End(e)) if e.local_name().as_ref() == text_tag => in_text = false,
            Ok(Event::Text(e)) if in_text => {
                if let Ok(text) = e.unescape() {
                    if legacy_field == LegacyField::Result {
                        legacy_buf.push_str(&text);
                    } else if form_nest > 0 {
                        form_buf.push_str(&text);
                    } else {
                        out.push_str(&text);
                    }
                }
            }
            Ok(Event::Start(e))
                if e.local_name().as_ref() == b"fldSimple" || e.local_name().as_ref() == b"sdtContent" =>
            {
                form_nest += 1;
            }
            Ok(Event::End(e))
                if e.local_name().as_ref() == b"fldSimple" || e.local_name().as_ref() == b"sdtContent" =>
            {
                if form_nest > 0 {
                    form_nest -= 1;
                    if form_nest == 0 {
                        let value = form_buf.trim();
                        if !value.is_empty() {
                            out.push_str(&format!("[FORM:{value}]"));
                        }
                        form_buf.clear();
                    }
                }
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"fldChar" => {
                let kind = e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.local_name().as_ref() == b"fldCharType")
                    .map(|a| a.value.as_ref().to_vec());
                match kind.as_deref() {
                    Some(b"begin") => legacy_field = LegacyField::Instr,
                    Some(b"separate") => {
                        legacy_field = LegacyField::Result;
                        legacy_buf.clear();
                    }
                    Some(b"end") => {
                        if legacy_field == LegacyField::Result {
                            let value = legacy_buf.trim();
                            if !value.is_empty() {
                                out.push_str(&format!("[FORM:{value}]"));
                            }
                        }
                        legacy_field = LegacyField::None;
                        legacy_buf.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Start(e)) if e.local_name().as_ref() == cell_tag => {
                if !first_cell_in_row {
                    out.push('\t');
                }
                first_cell_in_row = false;
            }
            Ok(Event::Start(e)) if e.local_name().as_ref() == row_tag => {
                first_cell_in_row = true;
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == row_tag => out.push('\n'),
            Ok(Event::End(e)) if e.local_name().as_ref() == para_tag => out.push('\n'),
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    out
}

fn extract_core_properties(xml: &str) -> Vec<MetadataField> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut fields = Vec::new();
    let mut current_key: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current_key = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Text(e)) => {
                if let (Some(key), Ok(text)) = (current_key.take(), e.unescape()) {
                    if !text.trim().is_empty() {
                        fields.push(MetadataField { key: capitalize(&key), value: text.into_owned() });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    fields
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub struct OfficePreprocessor;

impl OfficePreprocessor {
    /// Document body, with headers/footers appended under banners and
    /// table cells kept tab-separated (spec §4.2 "Office text").
    pub fn process_text(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_lowercase();
        let mut archive = open_archive(path)?;

        let body = match extension.as_str() {
            "docx" => self.docx_text(&mut archive),
            "xlsx" => self.xlsx_text(&mut archive),
            "pptx" => self.pptx_text(&mut archive),
            other => {
                return Err(PreprocessError::Malformed {
                    format: "office".into(),
                    message: format!("unsupported office extension: {other}"),
                })
            }
        };

        Ok(ProcessedContent::ok(display, ProcessorType::OfficeText, body))
    }

    fn docx_text(&self, archive: &mut ZipArchive<std::fs::File>) -> String {
        let mut out = String::new();
        if let Some(xml) = read_zip_entry(archive, "word/document.xml") {
            out.push_str(&extract_text_runs(&xml, b"t", b"p", b"tr", b"tc"));
        }
        for (name, banner) in [("word/header1.xml", "HEADER"), ("word/footer1.xml", "FOOTER")] {
            if let Some(xml) = read_zip_entry(archive, name) {
                let text = extract_text_runs(&xml, b"t", b"p", b"tr", b"tc");
                if !text.trim().is_empty() {
                    out.push_str(&format!("\n--- {banner} ---\n{text}"));
                }
            }
        }
        out
    }

    fn xlsx_text(&self, archive: &mut ZipArchive<std::fs::File>) -> String {
        let shared_strings = read_zip_entry(archive, "xl/sharedStrings.xml")
            .map(|xml| parse_shared_strings(&xml))
            .unwrap_or_default();

        let mut sheet_names = Vec::new();
        for name in archive.file_names() {
            if name.starts_with("xl/worksheets/sheet") && name.ends_with(".xml") {
                sheet_names.push(name.to_string());
            }
        }
        sheet_names.sort();

        let mut out = String::new();
        for (index, sheet_path) in sheet_names.iter().enumerate() {
            if let Some(xml) = read_zip_entry(archive, sheet_path) {
                out.push_str(&format!("--- sheet{} ---\n", index + 1));
                out.push_str(&render_sheet(&xml, &shared_strings));
                out.push('\n');
            }
        }
        out
    }

    fn pptx_text(&self, archive: &mut ZipArchive<std::fs::File>) -> String {
        let mut slide_names = Vec::new();
        for name in archive.file_names() {
            if name.starts_with("ppt/slides/slide") && name.ends_with(".xml") {
                slide_names.push(name.to_string());
            }
        }
        slide_names.sort();

        let mut out = String::new();
        for (index, slide_path) in slide_names.iter().enumerate() {
            if let Some(xml) = read_zip_entry(archive, slide_path) {
                out.push_str(&format!("--- Slide {} ---\n", index + 1));
                out.push_str(&extract_text_runs(&xml, b"t", b"p", b"tr", b"tc"));
                out.push('\n');
            }
            let notes_path = slide_path.replace("slides/slide", "notesSlides/notesSlide");
            if let Some(xml) = read_zip_entry(archive, &notes_path) {
                let notes = extract_text_runs(&xml, b"t", b"p", b"tr", b"tc");
                if !notes.trim().is_empty() {
                    out.push_str(&format!("[SPEAKER NOTES]\n{notes}\n"));
                }
            }
        }
        out
    }

    /// Object metadata from `docProps/core.xml` / `app.xml`, excluding
    /// filesystem attributes (spec §4.2 "Office metadata").
    pub fn process_metadata(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let mut archive = open_archive(path)?;

        let mut fields = Vec::new();
        for part in ["docProps/core.xml", "docProps/app.xml"] {
            if let Some(xml) = read_zip_entry(&mut archive, part) {
                fields.extend(extract_core_properties(&xml));
            }
        }

        let body = self.process_text(path)?.text;
        Ok(ProcessedContent::ok(display, ProcessorType::OfficeMetadata, body).with_metadata(fields))
    }
}

fn parse_shared_strings(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"si" => {
                in_si = true;
                current.clear();
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"si" => {
                in_si = false;
                strings.push(current.clone());
            }
            Ok(Event::Text(e)) if in_si => {
                if let Ok(text) = e.unescape() {
                    current.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    strings
}

fn render_sheet(xml: &str, shared_strings: &[String]) -> String {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut rows: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    let mut current_row = 0u32;
    let mut current_is_shared = false;
    let mut current_text = String::new();
    let mut in_value = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"row" => {
                current_row = e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.as_ref() == b"r")
                    .and_then(|a| String::from_utf8_lossy(&a.value).parse().ok())
                    .unwrap_or(current_row + 1);
                rows.entry(current_row).or_default();
            }
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"c" => {
                current_is_shared = e
                    .attributes()
                    .flatten()
                    .any(|a| a.key.as_ref() == b"t" && a.value.as_ref() == b"s");
            }
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"v" => {
                in_value = true;
                current_text.clear();
            }
            Ok(Event::Text(e)) if in_value => {
                if let Ok(text) = e.unescape() {
                    current_text.push_str(&text);
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"v" => {
                in_value = false;
                let value = if current_is_shared {
                    current_text
                        .parse::<usize>()
                        .ok()
                        .and_then(|idx| shared_strings.get(idx).cloned())
                        .unwrap_or_else(|| current_text.clone())
                } else {
                    current_text.clone()
                };
                rows.entry(current_row).or_default().push(value);
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    rows.into_values()
        .map(|cells| cells.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}
