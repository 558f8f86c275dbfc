//! Person name validator (spec §4.5): a small embedded given-name/surname
//! database, boosted when a cross-validator signal places an SSN or phone
//! nearby on the same line.

use crate::common::{build_context, locate, Validator};
use ferret_protocol::Finding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A deliberately small seed set — production-scale name databases are
/// loaded from configuration, but a built-in core keeps the validator
/// useful without one.
static GIVEN_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
        "Charles", "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan",
        "Jessica", "Sarah", "Karen", "Alice", "Jane", "Emily", "Daniel", "Matthew", "Anthony",
    ]
    .into_iter()
    .collect()
});

static CANDIDATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+)\s+([A-Z][a-z]+)\b").unwrap());

static SSN_OR_PHONE_ON_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{3}-\d{2}-\d{4}|\d{3}-\d{3}-\d{4}").unwrap());

pub struct PersonNameValidator;

impl Validator for PersonNameValidator {
    fn name(&self) -> &'static str {
        "person_name"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["PERSON_NAME"]
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for caps in CANDIDATE.captures_iter(content) {
            let whole = caps.get(0).unwrap();
            let given = caps.get(1).unwrap().as_str();

            if !GIVEN_NAMES.contains(given) {
                continue;
            }

            let (line_number, line_text, line_offset) = locate(content, whole.start());
            let match_end_in_line = line_offset + whole.as_str().len();
            let context = build_context(line_text, line_offset, match_end_in_line);

            let mut confidence = 45.0;
            if SSN_OR_PHONE_ON_LINE.is_match(line_text) {
                confidence += 20.0;
            }

            let finding = Finding::new(
                "PERSON_NAME",
                whole.as_str(),
                line_number,
                confidence.clamp(0.0, 100.0),
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
    fn known_given_name_surname_pair_matches() {
        let validator = PersonNameValidator;
        let findings = validator.validate("Employee: John Smith\n", "hr.csv");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].text, "John Smith");
    }

    #[test]
    fn adjacent_ssn_boosts_confidence() {
        let validator = PersonNameValidator;
        let findings = validator.validate("John Smith 123-45-6789\n", "hr.csv");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].confidence >= 60.0);
    }

    #[test]
    fn unknown_given_name_is_not_matched() {
        let validator = PersonNameValidator;
        assert!(validator.validate("Xerxes Qwerty reporting in\n", "x.txt").is_empty());
    }
}
