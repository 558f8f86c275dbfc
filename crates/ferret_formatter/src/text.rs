//! Reference text-table formatter (spec §6: "text table... rendering
//! details are formatter-specific and not normative"). One line per
//! finding, then a suppressed-findings section.

use crate::formatter::{Formatter, FormatterResult};
use crate::FormatKind;
use ferret_protocol::{Finding, SuppressedFinding};
use std::fmt::Write;

pub struct TextFormatter;

fn render_finding(out: &mut String, f: &Finding) {
    let _ = writeln!(out, "{}:{}  {:>5.1}  {:<24}  {}", f.filename, f.line_number, f.confidence, f.validator, f.r#type);
}

impl Formatter for TextFormatter {
    fn kind(&self) -> FormatKind {
        FormatKind::Text
    }

    fn format(&self, active: &[Finding], suppressed: &[SuppressedFinding]) -> FormatterResult<String> {
        let mut out = String::new();

        let _ = writeln!(out, "{} active finding(s)", active.len());
        for finding in active {
            render_finding(&mut out, finding);
        }

        if !suppressed.is_empty() {
            let _ = writeln!(out, "\n{} suppressed finding(s)", suppressed.len());
            for s in suppressed {
                render_finding(&mut out, &s.finding);
                let _ = writeln!(out, "    suppressed by rule {} (expired={})", s.rule_id, s.expired);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_ids::SuppressionRuleId;
    use ferret_protocol::Context;

    #[test]
    fn empty_input_reports_zero_findings() {
        let out = TextFormatter.format(&[], &[]).unwrap();
        assert!(out.starts_with("0 active finding(s)"));
    }

    #[test]
    fn active_finding_is_rendered_with_filename_and_line() {
        let f = Finding::new("SSN", "123-45-6789", 2, 70.0, "ssn", "hr.csv", Context::default());
        let out = TextFormatter.format(std::slice::from_ref(&f), &[]).unwrap();
        assert!(out.contains("hr.csv:2"));
        assert!(out.contains("SSN"));
    }

    #[test]
    fn suppressed_finding_notes_expiry_state() {
        let f = Finding::new("SSN", "123-45-6789", 2, 70.0, "ssn", "hr.csv", Context::default());
        let suppressed = SuppressedFinding { finding: f, rule_id: SuppressionRuleId::new(), expired: true };
        let out = TextFormatter.format(&[], std::slice::from_ref(&suppressed)).unwrap();
        assert!(out.contains("expired=true"));
    }
}
