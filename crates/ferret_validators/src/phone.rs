//! Phone validator (spec §4.5): several regional patterns, a structural
//! veto against matches embedded in identifiers, and rejection of
//! SSN-shaped and Unix-epoch-shaped digit runs.

use crate::common::{apply_keyword_scoring, build_context, locate, Validator};
use ferret_protocol::Finding;
use once_cell::sync::Lazy;
use regex::Regex;

struct Pattern {
    name: &'static str,
    regex: Lazy<Regex>,
}

macro_rules! pattern {
    ($name:expr, $re:expr) => {
        Pattern { name: $name, regex: Lazy::new(|| Regex::new($re).unwrap()) }
    };
}

static PATTERNS: &[Pattern] = &[
    pattern!("us_dashed", r"\b\d{3}-\d{3}-\d{4}\b"),
    pattern!("us_parenthesized", r"\(\d{3}\)\s?\d{3}-\d{4}"),
    pattern!("uk", r"\b0\d{2,4}\s?\d{3,4}\s?\d{3,4}\b"),
    pattern!("international_plus", r"\+\d{1,3}[\s.-]?\(?\d{1,4}\)?[\s.-]?\d{3,4}[\s.-]?\d{3,4}"),
    pattern!("international_00", r"\b00\d{1,3}[\s.-]?\d{6,10}\b"),
    pattern!("toll_free", r"\b(?:800|888|877|866|855|844|833)-\d{3}-\d{4}\b"),
    pattern!("with_extension", r"\b\d{3}-\d{3}-\d{4}\s?(?:x|ext\.?)\s?\d{2,5}\b"),
];

// Longest-first so e.g. "+44" is preferred over "+4".
static COUNTRY_CODES: &[&str] = &["+1264", "+1868", "+420", "+380", "+234", "+1", "+44", "+49", "+33", "+81", "+86", "+91", "+61"];

const POSITIVE_KEYWORDS: &[&str] = &["phone", "call", "tel", "mobile", "contact", "fax"];
const NEGATIVE_KEYWORDS: &[&str] = &["example", "test", "fax: n/a"];

fn is_ssn_shaped(digits: &str) -> bool {
    digits.len() == 9
}

fn is_unix_epoch_shaped(digits: &str) -> bool {
    matches!(digits.len(), 10 | 13)
}

/// Reject matches whose immediately-adjacent character indicates they are
/// embedded in a larger identifier (e.g. `ami-050451375729`), not a
/// standalone phone number.
fn structural_veto(content: &str, start: usize, end: usize) -> bool {
    let before = content[..start].chars().last();
    let after = content[end..].chars().next();

    if let Some(b) = before {
        if b == '-' || b == '_' {
            let before_that = content[..start.saturating_sub(b.len_utf8())].chars().last();
            if before_that.map(|c| c.is_alphabetic()).unwrap_or(false) {
                return true;
            }
        }
        if b.is_alphanumeric() {
            return true;
        }
    }
    if let Some(a) = after {
        if a.is_alphanumeric() {
            return true;
        }
    }
    false
}

fn country_code_for(candidate: &str) -> Option<&'static str> {
    COUNTRY_CODES.iter().find(|code| candidate.starts_with(*code)).copied()
}

pub struct PhoneValidator;

impl Validator for PhoneValidator {
    fn name(&self) -> &'static str {
        "phone"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["PHONE"]
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for pat in PATTERNS {
            for m in pat.regex.find_iter(content) {
                let candidate = m.as_str();
                if structural_veto(content, m.start(), m.end()) {
                    continue;
                }

                let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
                if is_ssn_shaped(&digits) || is_unix_epoch_shaped(&digits) {
                    continue;
                }

                let (line_number, line_text, line_offset) = locate(content, m.start());
                let match_end_in_line = line_offset + candidate.len();

                let mut context = build_context(line_text, line_offset, match_end_in_line);
                apply_keyword_scoring(&mut context, POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS, 10.0, 20.0);

                let confidence = (65.0 + context.confidence_impact).clamp(0.0, 100.0);
                if confidence <= 0.0 {
                    continue;
                }

                let mut finding = Finding::new(
                    "PHONE",
                    candidate,
                    line_number,
                    confidence,
                    self.name(),
                    filename,
                    context,
                )
                .with_metadata("pattern", pat.name);

                if let Some(code) = country_code_for(candidate) {
                    finding = finding.with_metadata("country_code", code);
                }

                findings.push(finding);
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_dashed_number_matches() {
        let validator = PhoneValidator;
        let findings = validator.validate("call me at 555-123-4567 tomorrow\n", "x.txt");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "555-123-4567");
    }

    #[test]
    fn rejects_unix_timestamp() {
        let validator = PhoneValidator;
        let findings = validator.validate("Timestamp: 1700000000 request completed\n", "logs.txt");
        assert!(findings.is_empty());
    }

    #[test]
    fn rejects_embedded_resource_identifier() {
        let validator = PhoneValidator;
        let findings = validator.validate("aws_key = \"ami-050451375729\"\n", "terraform.tfvars");
        assert!(findings.is_empty());
    }

    #[test]
    fn rejects_ssn_shaped_digit_run() {
        let validator = PhoneValidator;
        let findings = validator.validate("id: 123456789 recorded\n", "x.txt");
        assert!(findings.is_empty());
    }
}
