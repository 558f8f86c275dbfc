//! Credit card validator (spec §4.5): Luhn filter, sorted BIN-range lookup
//! for brand tagging, and a hard confidence cap on known test patterns.

use crate::common::{apply_keyword_scoring, build_context, locate, Validator};
use ferret_protocol::Finding;
use once_cell::sync::Lazy;
use regex::Regex;

/// Boundary requires a non-alphanumeric (or start/end of line) character on
/// both sides, so matches don't bleed across adjacent CSV columns.
static CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z])(\d[\d \-]{12,18}\d)(?:[^0-9A-Za-z]|$)").unwrap()
});

const POSITIVE_KEYWORDS: &[&str] = &["card", "credit", "visa", "mastercard", "payment", "cc#", "cvv"];
const NEGATIVE_KEYWORDS: &[&str] = &["test", "example", "sample", "dummy", "fake"];

/// `(low, high, brand)` sorted ascending by `low`. First matching range
/// wins on overlap (spec open question (a)).
static BIN_RANGES: &[(u64, u64, &str)] = &[
    (300_000, 305_999, "DINERS_CLUB"),
    (340_000, 349_999, "AMERICAN_EXPRESS"),
    (352_800, 358_999, "JCB"),
    (370_000, 379_999, "AMERICAN_EXPRESS"),
    (400_000, 499_999, "VISA"),
    (500_000, 509_999, "MAESTRO"),
    (510_000, 559_999, "MASTERCARD"),
    (600_000, 609_999, "DISCOVER"),
    (620_000, 629_999, "UNIONPAY"),
    (622_126, 622_925, "UNIONPAY"),
    (644_000, 649_999, "DISCOVER"),
    (650_000, 659_999, "DISCOVER"),
];

fn brand_for(digits: &str) -> Option<&'static str> {
    let prefix: u64 = digits.get(0..6)?.parse().ok()?;
    BIN_RANGES
        .iter()
        .find(|(low, high, _)| prefix >= *low && prefix <= *high)
        .map(|(_, _, brand)| *brand)
}

fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let mut d = c.to_digit(10).unwrap();
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// Known test patterns: all-same digit, ascending/alternating sequences,
/// and a couple of textbook-example numbers. Matching caps confidence at
/// 15 regardless of otherwise-favorable context.
fn is_known_test_pattern(digits: &str) -> bool {
    if digits.bytes().all(|b| b == digits.as_bytes()[0]) {
        return true;
    }
    if digits.starts_with("4111") {
        return true;
    }
    if digits.starts_with("5555") && digits.ends_with("4444") {
        return true;
    }
    let ascending: String = (0..digits.len()).map(|i| std::char::from_digit((i as u32 % 10) + 1, 10).unwrap()).collect();
    if digits == ascending.as_str() {
        return true;
    }
    let alternating: String = (0..digits.len())
        .map(|i| if i % 2 == 0 { '1' } else { '2' })
        .collect();
    digits == alternating.as_str()
}

/// Unique-digit count as an entropy approximation — low entropy is part of
/// why the known-test-pattern cap exists, but kept as separate metadata for
/// downstream tooling.
fn entropy_estimate(digits: &str) -> usize {
    let mut seen = [false; 10];
    for c in digits.chars() {
        if let Some(d) = c.to_digit(10) {
            seen[d as usize] = true;
        }
    }
    seen.iter().filter(|&&x| x).count()
}

pub struct CreditCardValidator;

impl Validator for CreditCardValidator {
    fn name(&self) -> &'static str {
        "creditcard"
    }

    fn supported_types(&self) -> &'static [&'static str] {
        &["CREDIT_CARD"]
    }

    /// Luhn-confirmed matches are rarely false positives; compress the
    /// curve toward the top of the range rather than passing raw through
    /// unchanged (spec §4.6 step 6 — constants live on the validator).
    fn calibrate(&self, raw_confidence: f64) -> f64 {
        100.0 * (raw_confidence / 100.0).clamp(0.0, 1.0).powf(0.85)
    }

    fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        for caps in CANDIDATE.captures_iter(content) {
            let whole = caps.get(0).unwrap();
            let raw = caps.get(1).unwrap();
            let digits: String = raw.as_str().chars().filter(|c| c.is_ascii_digit()).collect();

            if !matches!(digits.len(), 14 | 15 | 16) {
                continue;
            }
            if !luhn_valid(&digits) {
                continue;
            }

            let brand = brand_for(&digits).unwrap_or("UNKNOWN");
            let test_pattern = is_known_test_pattern(&digits);

            let (line_number, line_text, line_offset) = locate(content, whole.start());
            let match_start_in_line = line_offset + (raw.start() - whole.start());
            let match_end_in_line = match_start_in_line + raw.as_str().len();

            let mut context = build_context(line_text, match_start_in_line, match_end_in_line);
            apply_keyword_scoring(&mut context, POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS, 10.0, 20.0);

            let mut confidence = 70.0 + context.confidence_impact;
            if test_pattern {
                confidence = confidence.min(15.0);
            }

            if confidence <= 0.0 {
                continue;
            }

            let finding = Finding::new(
                "CREDIT_CARD",
                raw.as_str(),
                line_number,
                confidence,
                self.name(),
                filename,
                context,
            )
            .with_metadata("brand", brand)
            .with_metadata("unique_digits", entropy_estimate(&digits).to_string());

            findings.push(finding);
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visa_test_vector_yields_high_confidence_finding() {
        let validator = CreditCardValidator;
        let content = "John,Smith,4532015112830366,03/27\n";
        let findings = validator.validate(content, "cards.csv");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.metadata.get("brand").map(String::as_str), Some("VISA"));
        assert!(f.confidence >= 60.0);
        assert_eq!(f.line_number, 1);
        assert_eq!(f.text, "4532015112830366");
    }

    #[test]
    fn fails_luhn_check_and_is_rejected() {
        let validator = CreditCardValidator;
        let content = "card: 4532015112830367\n";
        assert!(validator.validate(content, "x.txt").is_empty());
    }

    #[test]
    fn known_test_pattern_is_capped_at_fifteen() {
        let validator = CreditCardValidator;
        let content = "credit card number: 4111111111111111\n";
        let findings = validator.validate(content, "x.txt");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].confidence <= 15.0);
    }

    #[test]
    fn short_digit_run_is_not_a_candidate() {
        let validator = CreditCardValidator;
        assert!(validator.validate("phone: 5551234567\n", "x.txt").is_empty());
    }
}
