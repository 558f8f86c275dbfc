//! Passport validator (spec §4.5): country-specific number shapes, kept
//! only when accompanied by strong travel-document context — numeric shape
//! alone is never sufficient (spec §8 testable property).

use crate::common::{build_context, locate, Validator};
use ferret_protocol::Finding;
use once_cell::sync::Lazy;
use regex::Regex;

struct Pattern {
    country: &'static str,
    regex: Lazy<Regex>,
}

macro_rules! pattern {
    ($country:expr, $re:expr) => {
        Pattern { country: $country, regex: Lazy::new(|| Regex::new($re).unwrap()) }
    };
}

static PATTERNS: &[Pattern] = &[
    pattern!("US", r"\b[A-Z]\d{8}\b"),
    pattern!("UK", r"\b\d{9}\b"),
    pattern!("CANADA", r"\b[A-Z]{2}\d{6}\b"),
    pattern!("EU", r"\b[A-Z]{2}[A-Z0-9]{7}\b"),
    pattern!("MRZ", r"\bP[A-Z][A-Z0-9<]{42,44}\b"),
];

const STRONG_TERMS: &[&str] = &["passport", "travel document", "mrz"];

/// Medium-strength travel indicators: two or more within the window,
/// absent a strong term, also qualify (spec §4.5, §8).
const MEDIUM_INDICATORS: &[&str] = &[
    "nationality", "date of birth", "place of birth", "issuing", "expiry", "visa", "border",
    "immigration", "travel",
];

fn has_strong_context(window: &str) -> bool {
    STRONG_TERMS.iter().any(|t| window.contains(t))
}

fn medium_indicator_count(window: &str) -> usize {
    MEDIUM_INDICATORS.iter().filter(|t| window.contains(*t)).count()
}

pub struct PassportValidator;

impl Validator for PassportValidator {
    fn name(&self) -> &'static str {
        "passport"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["PASSPORT"]
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for pat in PATTERNS {
            for m in pat.regex.find_iter(content) {
                let (line_number, line_text, line_offset) = locate(content, m.start());
                let match_end_in_line = line_offset + m.as_str().len();

                let context = build_context(line_text, line_offset, match_end_in_line);
                let window = format!("{} {} {}", context.before_text, context.full_line, context.after_text)
                    .to_lowercase();

                let strong = has_strong_context(&window);
                let medium_count = medium_indicator_count(&window);

                if !strong && medium_count < 2 {
                    continue;
                }

                let confidence = if strong { 80.0 } else { 55.0 + (medium_count as f64 * 5.0) };
                let confidence = confidence.clamp(0.0, 100.0);

                let finding = Finding::new(
                    format!("PASSPORT/{}", pat.country),
                    m.as_str(),
                    line_number,
                    confidence,
                    self.name(),
                    filename,
                    context,
                )
                .with_metadata("country", pat.country);

                findings.push(finding);
            }
        }

        findings
    }
}
