//! OpenDocument text preprocessor (spec §4.2): `.odt/.ods/.odp` parse
//! `content.xml` with banners equivalent to the OOXML preprocessor's.

use ferret_protocol::{MetadataField, PreprocessError, ProcessedContent, ProcessorType};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

pub struct OpenDocumentPreprocessor;

impl OpenDocumentPreprocessor {
    pub fn process(&self, path: &Path) -> Result<ProcessedContent, PreprocessError> {
        let display = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|e| PreprocessError::Io(e.to_string()))?;
        let mut archive = ZipArchive::new(file).map_err(|e| PreprocessError::Malformed {
            format: "opendocument".into(),
            message: e.to_string(),
        })?;

        let content_xml = read_entry(&mut archive, "content.xml").ok_or_else(|| PreprocessError::Malformed {
            format: "opendocument".into(),
            message: "missing content.xml".into(),
        })?;
        let body = extract_body(&content_xml);

        let mut metadata = Vec::new();
        if let Some(meta_xml) = read_entry(&mut archive, "meta.xml") {
            metadata = extract_meta(&meta_xml);
        }

        Ok(ProcessedContent::ok(display, ProcessorType::OpenDocumentText, body).with_metadata(metadata))
    }
}

fn read_entry(archive: &mut ZipArchive<std::fs::File>, name: &str) -> Option<String> {
    let mut entry = archive.by_name(name).ok()?;
    let mut buf = String::new();
    entry.read_to_string(&mut buf).ok()?;
    Some(buf)
}

/// `text:p` paragraphs, `table:table-row`/`table:table-cell` for
/// spreadsheets, `draw:page` banners for presentation master slides.
fn extract_body(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut slide_index = 0usize;
    let mut first_cell_in_row = true;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"page" => {
                    slide_index += 1;
                    out.push_str(&format!("--- Slide {slide_index} ---\n"));
                }
                b"table-row" => first_cell_in_row = true,
                b"table-cell" => {
                    if !first_cell_in_row {
                        out.push('\t');
                    }
                    first_cell_in_row = false;
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"p" => out.push('\n'),
                b"table-row" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let Ok(text) = e.unescape() {
                    out.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    out
}

fn extract_meta(xml: &str) -> Vec<MetadataField> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut fields = Vec::new();
    let mut current_key: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                current_key = Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Text(e)) => {
                if let (Some(key), Ok(text)) = (current_key.take(), e.unescape()) {
                    if !text.trim().is_empty() {
                        fields.push(MetadataField { key, value: text.into_owned() });
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
