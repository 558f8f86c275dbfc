//! US Social Security Number validator (spec §4.5): area/group/serial
//! structural validation plus HR/tax/healthcare domain boosts sourced from
//! the context insights the manager later applies.

use crate::common::{apply_keyword_scoring, build_context, locate, Validator};
use ferret_protocol::Finding;
use once_cell::sync::Lazy;
use regex::Regex;

static CANDIDATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{3})-(\d{2})-(\d{4})\b").unwrap());

const POSITIVE_KEYWORDS: &[&str] = &["ssn", "social security", "tax id", "employee id"];
const NEGATIVE_KEYWORDS: &[&str] = &["example", "test", "sample", "000-00-0000"];

/// Area 000, area 666, area >= 900, group 00, and serial 0000 are all
/// invalid per SSA allocation rules.
fn structurally_valid(area: &str, group: &str, serial: &str) -> bool {
    let area_n: u32 = area.parse().unwrap_or(0);
    let group_n: u32 = group.parse().unwrap_or(0);
    let serial_n: u32 = serial.parse().unwrap_or(0);

    area_n != 0 && area_n != 666 && area_n < 900 && group_n != 0 && serial_n != 0
}

pub struct SsnValidator;

impl Validator for SsnValidator {
    fn name(&self) -> &'static str {
        "ssn"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["SSN"]
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for caps in CANDIDATE.captures_iter(content) {
            let whole = caps.get(0).unwrap();
            let area = caps.get(1).unwrap().as_str();
            let group = caps.get(2).unwrap().as_str();
            let serial = caps.get(3).unwrap().as_str();

            if !structurally_valid(area, group, serial) {
                continue;
            }

            let (line_number, line_text, line_offset) = locate(content, whole.start());
            let match_end_in_line = line_offset + whole.as_str().len();

            let mut context = build_context(line_text, line_offset, match_end_in_line);
            apply_keyword_scoring(&mut context, POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS, 12.0, 25.0);

            let confidence = (60.0 + context.confidence_impact).clamp(0.0, 100.0);
            if confidence <= 0.0 {
                continue;
            }

            let finding = Finding::new(
                "SSN",
                whole.as_str(),
                line_number,
                confidence,
                self.name(),
                filename,
                context,
            );

            findings.push(finding);
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_ssn_in_hr_context_yields_finding() {
        let validator = SsnValidator;
        let findings = validator.validate("Employee SSN: 123-45-6789\n", "hr.csv");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "123-45-6789");
    }

    #[test]
    fn area_666_is_rejected() {
        let validator = SsnValidator;
        assert!(validator.validate("id: 666-45-6789\n", "x.txt").is_empty());
    }

    #[test]
    fn all_zero_group_rejected() {
        let validator = SsnValidator;
        assert!(validator.validate("id: 123-00-6789\n", "x.txt").is_empty());
    }
}
