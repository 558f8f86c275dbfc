//! Reference JSON formatter (spec §6): an array of finding objects with
//! the keys §6 names, plus a `suppressed` array.

use crate::formatter::{Formatter, FormatterError, FormatterResult};
use crate::FormatKind;
use ferret_protocol::{Finding, SuppressedFinding};
use serde::Serialize;

#[derive(Serialize)]
struct FindingView<'a> {
    r#type: &'a str,
    validator: &'a str,
    confidence: f64,
    filename: &'a str,
    line_number: usize,
    text: &'a str,
    context: &'a ferret_protocol::Context,
    metadata: &'a std::collections::BTreeMap<String, String>,
}

impl<'a> From<&'a Finding> for FindingView<'a> {
    fn from(f: &'a Finding) -> Self {
        Self {
            r#type: &f.r#type,
            validator: &f.validator,
            confidence: f.confidence,
            filename: &f.filename,
            line_number: f.line_number,
            text: &f.text,
            context: &f.context,
            metadata: &f.metadata,
        }
    }
}

#[derive(Serialize)]
struct SuppressedView<'a> {
    #[serde(flatten)]
    finding: FindingView<'a>,
    rule_id: String,
    expired: bool,
}

#[derive(Serialize)]
pub(crate) struct Document<'a> {
    active: Vec<FindingView<'a>>,
    suppressed: Vec<SuppressedView<'a>>,
}

pub(crate) fn to_document<'a>(active: &'a [Finding], suppressed: &'a [SuppressedFinding]) -> Document<'a> {
    Document {
        active: active.iter().map(FindingView::from).collect(),
        suppressed: suppressed
            .iter()
            .map(|s| SuppressedView { finding: FindingView::from(&s.finding), rule_id: s.rule_id.to_string(), expired: s.expired })
            .collect(),
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn kind(&self) -> FormatKind {
        FormatKind::Json
    }

    fn format(&self, active: &[Finding], suppressed: &[SuppressedFinding]) -> FormatterResult<String> {
        let document = to_document(active, suppressed);
        serde_json::to_string_pretty(&document).map_err(|e| FormatterError::Serialize(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_ids::SuppressionRuleId;
    use ferret_protocol::Context;

    #[test]
    fn active_finding_serializes_with_spec_key_set() {
        let f = Finding::new("EMAIL/GMAIL", "alice@gmail.com", 1, 80.0, "email", "contacts.csv", Context::default());
        let out = JsonFormatter.format(std::slice::from_ref(&f), &[]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let active = parsed["active"].as_array().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0]["type"], "EMAIL/GMAIL");
        assert!(active[0]["context"]["full_line"].is_string());
    }

    #[test]
    fn suppressed_array_carries_rule_id_and_expiry() {
        let f = Finding::new("SSN", "123-45-6789", 1, 70.0, "ssn", "hr.csv", Context::default());
        let suppressed = SuppressedFinding { finding: f, rule_id: SuppressionRuleId::new(), expired: false };
        let out = JsonFormatter.format(&[], std::slice::from_ref(&suppressed)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["suppressed"][0]["expired"], false);
    }
}
