//! Intellectual property validator (spec §4.5): patent/trademark/copyright
//! notices plus user-configurable "internal URL" patterns loaded from
//! configuration.

use crate::common::{build_context, locate, Validator};
use ferret_protocol::Finding;
use once_cell::sync::Lazy;
use regex::Regex;

static PATENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bpatent\s+(?:no\.?|number)?\s*[:#]?\s*(?:US)?\s?\d{1,2}[,.]?\d{3}[,.]?\d{3}\b").unwrap());
static TRADEMARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x{2122}\x{00AE}]|\(TM\)|\(R\)").unwrap());
static COPYRIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:\x{00A9}|copyright)\s*(?:\x{00A9})?\s*\d{4}\s+[A-Za-z][\w .,&-]{1,60}").unwrap());
static TRADE_SECRET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btrade\s+secret\b|\bconfidential\s*[-—:]\s*proprietary\b").unwrap());

/// Loaded from `validators.intellectual_property.internal_urls` — empty by
/// default, the caller (the manager, wiring config) supplies real entries.
pub struct IntellectualPropertyValidator {
    pub internal_urls: Vec<Regex>,
}

impl IntellectualPropertyValidator {
    pub fn new(internal_urls: Vec<Regex>) -> Self {
        Self { internal_urls }
    }
}

impl Default for IntellectualPropertyValidator {
    fn default() -> Self {
        Self { internal_urls: Vec::new() }
    }
}

fn emit(content: &str, filename: &str, validator_name: &str, find: impl Fn(&str) -> Vec<(usize, usize, String)>) -> Vec<Finding> {
    find(content)
        .into_iter()
        .map(|(start, end, label)| {
            let (line_number, line_text, line_offset) = locate(content, start);
            let match_end_in_line = line_offset + (end - start);
            let context = build_context(line_text, line_offset, match_end_in_line);
            Finding::new(label, &content[start..end], line_number, 70.0, validator_name, filename, context)
        })
        .collect()
}

impl crate::common::Validator for IntellectualPropertyValidator {
    fn name(&self) -> &'static str {
        "intellectual_property"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["PATENT", "TRADEMARK", "COPYRIGHT", "TRADE_SECRET", "INTERNAL_URL"]
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        findings.extend(emit(content, filename, self.name(), |c| {
            PATENT.find_iter(c).map(|m| (m.start(), m.end(), "PATENT".to_string())).collect()
        }));
        findings.extend(emit(content, filename, self.name(), |c| {
            TRADEMARK.find_iter(c).map(|m| (m.start(), m.end(), "TRADEMARK".to_string())).collect()
        }));
        findings.extend(emit(content, filename, self.name(), |c| {
            COPYRIGHT.find_iter(c).map(|m| (m.start(), m.end(), "COPYRIGHT".to_string())).collect()
        }));
        findings.extend(emit(content, filename, self.name(), |c| {
            TRADE_SECRET.find_iter(c).map(|m| (m.start(), m.end(), "TRADE_SECRET".to_string())).collect()
        }));

        for pattern in &self.internal_urls {
            findings.extend(emit(content, filename, self.name(), |c| {
                pattern.find_iter(c).map(|m| (m.start(), m.end(), "INTERNAL_URL".to_string())).collect()
            }));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Validator;

    #[test]
    fn patent_number_matches() {
        let validator = IntellectualPropertyValidator::default();
        let findings = validator.validate("Patent No. 10,123,456 covers this design\n", "x.txt");
        assert!(findings.iter().any(|f| f.r#type == "PATENT"));
    }

    #[test]
    fn trade_secret_label_matches() {
        let validator = IntellectualPropertyValidator::default();
        let findings = validator.validate("CONFIDENTIAL - PROPRIETARY: internal roadmap\n", "x.txt");
        assert!(findings.iter().any(|f| f.r#type == "TRADE_SECRET"));
    }

    #[test]
    fn configured_internal_url_matches() {
        let internal = Regex::new(r"https://internal\.example\.corp/\S*").unwrap();
        let validator = IntellectualPropertyValidator::new(vec![internal]);
        let findings = validator.validate("see https://internal.example.corp/wiki/roadmap\n", "x.txt");
        assert!(findings.iter().any(|f| f.r#type == "INTERNAL_URL"));
    }

    #[test]
    fn no_internal_urls_configured_yields_no_internal_url_findings() {
        let validator = IntellectualPropertyValidator::default();
        let findings = validator.validate("see https://internal.example.corp/wiki/roadmap\n", "x.txt");
        assert!(findings.iter().all(|f| f.r#type != "INTERNAL_URL"));
    }
}
