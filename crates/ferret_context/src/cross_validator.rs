//! Cross-validator signal table (spec §4.4): a small fixed table of
//! composite patterns (e.g. `"<Name> <Name> NNN-NN-NNNN"` -> EmployeeRecord,
//! boost 15) whose detections contribute named `confidence_adjustments`.

use ferret_protocol::CrossValidatorSignal;
use once_cell::sync::Lazy;
use regex::Regex;

struct SignalRule {
    name: &'static str,
    validators: &'static [&'static str],
    impact: f64,
    regex: Lazy<Regex>,
}

macro_rules! signal {
    ($name:expr, $validators:expr, $impact:expr, $re:expr) => {
        SignalRule {
            name: $name,
            validators: $validators,
            impact: $impact,
            regex: Lazy::new(|| Regex::new($re).unwrap()),
        }
    };
}

static SIGNALS: &[SignalRule] = &[
    signal!(
        "EmployeeRecord",
        &["person_name", "ssn"],
        15.0,
        r"[A-Z][a-z]+\s+[A-Z][a-z]+\s+\d{3}-\d{2}-\d{4}"
    ),
    signal!(
        "ContactRecord",
        &["person_name", "phone", "email"],
        10.0,
        r"[A-Z][a-z]+\s+[A-Z][a-z]+.{0,40}(\+?\d[\d\-\(\) ]{7,}\d|[\w.+-]+@[\w-]+\.[a-z]{2,})"
    ),
    signal!(
        "FinancialRecord",
        &["credit_card", "ssn"],
        12.0,
        r"\d{3}-\d{2}-\d{4}.{0,60}\d{13,19}"
    ),
];

/// Returns the signals that matched at a given line, with their name,
/// participating validators, and impact, keyed by nothing here — the
/// caller (the context analyzer) assigns the line number.
pub fn signals_matching(line: &str) -> Vec<CrossValidatorSignal> {
    SIGNALS
        .iter()
        .filter(|s| s.regex.is_match(line))
        .map(|s| CrossValidatorSignal {
            name: s.name.to_string(),
            validators: s.validators.iter().map(|v| v.to_string()).collect(),
            impact: s.impact,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_record_signal_matches_name_and_ssn() {
        let signals = signals_matching("John Smith 123-45-6789");
        assert!(signals.iter().any(|s| s.name == "EmployeeRecord"));
    }

    #[test]
    fn plain_line_matches_no_signals() {
        assert!(signals_matching("just some ordinary text").is_empty());
    }
}
