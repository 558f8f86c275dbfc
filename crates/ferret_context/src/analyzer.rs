//! The Context Analyzer itself (spec §4.4): combines structure/domain
//! detection, semantic scoring, cross-validator signals, and the
//! confidence-adjustment table the Enhanced Validator Manager later applies
//! per finding.

use crate::{cross_validator, domain, semantic, structure};
use ferret_protocol::{ContentMeta, ContextInsights, DocumentType};

/// Validators whose confidence is boosted when content is tabular (spec
/// §4.4: "tabular document types add +20 to all validators whose
/// confidence depends on tabular layout").
const TABULAR_SENSITIVE_VALIDATORS: &[&str] = &["ssn", "creditcard", "phone", "email", "person_name"];

fn is_tabular(document_type: DocumentType) -> bool {
    matches!(document_type, DocumentType::Csv | DocumentType::Tsv | DocumentType::FixedWidth)
}

fn is_low_signal(document_type: DocumentType) -> bool {
    matches!(document_type, DocumentType::Log | DocumentType::Code)
}

fn content_meta(content: &str) -> ContentMeta {
    let total = content.chars().count().max(1) as f64;
    let digits = content.chars().filter(|c| c.is_ascii_digit()).count() as f64;
    let alpha = content.chars().filter(|c| c.is_alphabetic()).count() as f64;
    let spaces = content.chars().filter(|c| c.is_whitespace()).count() as f64;
    let delimiters = content.chars().filter(|c| matches!(c, ',' | '\t' | '|' | ';')).count();

    ContentMeta {
        digit_ratio: digits / total,
        alpha_ratio: alpha / total,
        space_ratio: spaces / total,
        delimiter_count: delimiters,
    }
}

/// Analyzes concatenated content plus its source path and produces the
/// `ContextInsights` the validator manager consumes (spec §4.4).
pub struct ContextAnalyzer;

impl ContextAnalyzer {
    pub fn analyze(&self, content: &str, extension: &str) -> ContextInsights {
        let (document_type, structure_confidence) = structure::detect(content, extension);
        let (detected_domain, domain_confidence) = domain::detect(content);
        let semantic_scores = semantic::score(content);
        let meta = content_meta(content);

        let mut insights = ContextInsights {
            document_type,
            domain: detected_domain,
            structure_confidence,
            domain_confidence,
            semantic_scores,
            meta,
            ..ContextInsights::default()
        };

        for (line_number, line) in content.lines().enumerate() {
            let signals = cross_validator::signals_matching(line);
            if !signals.is_empty() {
                insights.cross_validator_signals.insert(line_number + 1, signals);
            }
        }

        apply_confidence_adjustments(&mut insights);
        insights
    }
}

/// Spec §4.4: "applied by the manager, not the validators themselves" —
/// this function computes the table the manager later looks up per
/// validator name; it does not touch any Finding.
fn apply_confidence_adjustments(insights: &mut ContextInsights) {
    if is_tabular(insights.document_type) {
        for validator in TABULAR_SENSITIVE_VALIDATORS {
            insights.set_adjustment(validator, 20.0);
        }
    }

    if is_low_signal(insights.document_type) {
        for validator in TABULAR_SENSITIVE_VALIDATORS {
            let existing = insights.adjustment_for(validator);
            insights.set_adjustment(validator, existing - 15.0);
        }
    }

    // TestData overrides all positive domain boosts with a hard -30 flag.
    if insights.semantic_scores.test_data > 0.3 {
        for validator in TABULAR_SENSITIVE_VALIDATORS {
            insights.set_adjustment(validator, -30.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabular_csv_content_gets_a_positive_adjustment() {
        let content = "name,ssn,phone\nAlice,123-45-6789,555-1212\n";
        let insights = ContextAnalyzer.analyze(content, "csv");
        assert_eq!(insights.adjustment_for("ssn"), 20.0);
    }

    #[test]
    fn test_data_semantic_overrides_with_negative_thirty() {
        let content = "sample,dummy,fixture,test,lorem ipsum,example\nfoo,bar,1,2,3,4\n";
        let insights = ContextAnalyzer.analyze(content, "csv");
        assert_eq!(insights.adjustment_for("ssn"), -30.0);
    }

    #[test]
    fn log_lines_depress_the_adjustment() {
        let content = "2024-01-01 12:00:00 INFO starting up\n2024-01-01 12:00:01 INFO ready\n";
        let insights = ContextAnalyzer.analyze(content, "log");
        assert!(insights.adjustment_for("ssn") <= 0.0);
    }
}
