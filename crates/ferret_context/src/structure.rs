//! Structure detection (spec §4.4): the first 2000 characters are tested
//! against a fixed battery of regex patterns; the structure with the
//! highest match ratio (at least 0.3) wins, with extension hints
//! pre-empting at confidence 0.9.

use ferret_protocol::DocumentType;
use once_cell::sync::Lazy;
use regex::Regex;

const SAMPLE_CHARS: usize = 2000;
const MIN_MATCH_RATIO: f64 = 0.3;
const EXTENSION_HINT_CONFIDENCE: f64 = 0.9;

struct Pattern {
    document_type: DocumentType,
    regex: Lazy<Regex>,
}

macro_rules! pattern {
    ($doc_type:expr, $re:expr) => {
        Pattern {
            document_type: $doc_type,
            regex: Lazy::new(|| Regex::new($re).unwrap()),
        }
    };
}

static PATTERNS: &[Pattern] = &[
    pattern!(DocumentType::Csv, r"^[^\n,]+(,[^\n,]+){2,}$"),
    pattern!(DocumentType::Tsv, r"^[^\n\t]+(\t[^\n\t]+){2,}$"),
    pattern!(DocumentType::Json, r#"[\{\[]\s*"[\w-]+"\s*:"#),
    pattern!(DocumentType::Xml, r"</?[A-Za-z][\w:-]*(\s[^>]*)?>"),
    pattern!(DocumentType::Sql, r"(?i)\b(SELECT|INSERT INTO|UPDATE|CREATE TABLE)\b"),
    pattern!(DocumentType::Log, r"^\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}"),
    pattern!(DocumentType::Email, r"(?im)^(From|To|Subject|Date):\s"),
    pattern!(DocumentType::Code, r"(?m)^\s*(fn|def|function|class|import|package)\s"),
    pattern!(DocumentType::FixedWidth, r"^.{10,}\s{2,}\S"),
    pattern!(DocumentType::Report, r"(?i)\b(executive summary|table of contents|appendix)\b"),
    pattern!(DocumentType::Configuration, r"(?m)^[\w.-]+\s*=\s*\S+$"),
];

fn extension_hint(extension: &str) -> Option<DocumentType> {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "csv" => Some(DocumentType::Csv),
        "tsv" => Some(DocumentType::Tsv),
        "json" => Some(DocumentType::Json),
        "xml" => Some(DocumentType::Xml),
        "sql" => Some(DocumentType::Sql),
        "log" => Some(DocumentType::Log),
        _ => None,
    }
}

/// Detect the document's structural type and a confidence in `[0, 1]`.
pub fn detect(content: &str, extension: &str) -> (DocumentType, f64) {
    if let Some(hinted) = extension_hint(extension) {
        return (hinted, EXTENSION_HINT_CONFIDENCE);
    }

    let sample: String = content.chars().take(SAMPLE_CHARS).collect();
    let lines: Vec<&str> = sample.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return (DocumentType::Unknown, 0.0);
    }

    let mut best = (DocumentType::Unknown, 0.0_f64);
    for pattern in PATTERNS {
        let matches = lines.iter().filter(|line| pattern.regex.is_match(line)).count();
        let ratio = matches as f64 / lines.len() as f64;
        if ratio > best.1 {
            best = (pattern.document_type, ratio);
        }
    }

    if best.1 >= MIN_MATCH_RATIO {
        best
    } else {
        (DocumentType::Unknown, best.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_hint_preempts_with_high_confidence() {
        let (doc_type, confidence) = detect("not actually csv text", "csv");
        assert_eq!(doc_type, DocumentType::Csv);
        assert_eq!(confidence, EXTENSION_HINT_CONFIDENCE);
    }

    #[test]
    fn detects_csv_from_content_alone() {
        let content = "name,email,phone\nAlice,a@x.com,555-1234\nBob,b@x.com,555-5678\n";
        let (doc_type, confidence) = detect(content, "");
        assert_eq!(doc_type, DocumentType::Csv);
        assert!(confidence >= MIN_MATCH_RATIO);
    }

    #[test]
    fn unstructured_prose_is_unknown() {
        let content = "This is just a paragraph of plain English prose without structure.";
        let (doc_type, _) = detect(content, "");
        assert_eq!(doc_type, DocumentType::Unknown);
    }

    #[test]
    fn empty_content_is_unknown() {
        let (doc_type, confidence) = detect("", "");
        assert_eq!(doc_type, DocumentType::Unknown);
        assert_eq!(confidence, 0.0);
    }
}
