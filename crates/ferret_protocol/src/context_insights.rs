//! Output of the Context Analyzer (spec §4.4): the structural and domain
//! classification the Enhanced Validator Manager uses to bias confidence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structural classification of a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Csv,
    Tsv,
    Json,
    Xml,
    Sql,
    Log,
    Email,
    Code,
    FixedWidth,
    Report,
    Configuration,
    Unknown,
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Unknown
    }
}

/// Business-domain classification of a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Domain {
    Healthcare,
    Financial,
    HrPayroll,
    Government,
    Education,
    Retail,
    Unknown,
}

impl Default for Domain {
    fn default() -> Self {
        Domain::Unknown
    }
}

/// Hit-rate scores for a fixed family of semantic signals (spec §4.4
/// "Semantic scores"), each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SemanticScores {
    pub personal_data: f64,
    pub financial_data: f64,
    pub medical_data: f64,
    pub test_data: f64,
    pub production: f64,
}

/// A small fixed-table composite pattern whose detection boosts specific
/// validators on the same line (spec §4.4 "Cross-validator signals").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidatorSignal {
    pub name: String,
    /// Validator names this signal's `impact` applies to when triggered on
    /// the same line.
    pub validators: Vec<String>,
    pub impact: f64,
}

/// Ancillary structural statistics (spec §3 `meta`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentMeta {
    pub digit_ratio: f64,
    pub alpha_ratio: f64,
    pub space_ratio: f64,
    pub delimiter_count: usize,
}

/// The full per-file classification result, computed once per file and
/// shared read-only across every validator invocation for that file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextInsights {
    pub document_type: DocumentType,
    pub domain: Domain,
    pub structure_confidence: f64,
    pub domain_confidence: f64,
    pub semantic_scores: SemanticScores,
    /// Cross-validator signals that matched, keyed by the 1-based line they
    /// matched on.
    pub cross_validator_signals: BTreeMap<usize, Vec<CrossValidatorSignal>>,
    pub meta: ContentMeta,
    /// Named confidence adjustments the manager applies per-validator
    /// (spec §4.4 "Confidence adjustments"), already capped to `[-50, 50]`.
    pub confidence_adjustments: BTreeMap<String, f64>,
}

impl ContextInsights {
    /// Confidence adjustment this insight set contributes for a given
    /// validator name, or `0.0` if none was computed.
    pub fn adjustment_for(&self, validator: &str) -> f64 {
        self.confidence_adjustments
            .get(validator)
            .copied()
            .unwrap_or(0.0)
    }

    /// Insert an adjustment, clamped to the spec's `[-50, +50]` bound.
    pub fn set_adjustment(&mut self, validator: impl Into<String>, value: f64) {
        self.confidence_adjustments
            .insert(validator.into(), value.clamp(-50.0, 50.0));
    }

    pub fn signals_on_line(&self, line_number: usize) -> &[CrossValidatorSignal] {
        self.cross_validator_signals
            .get(&line_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_lookup_defaults_to_zero() {
        let insights = ContextInsights::default();
        assert_eq!(insights.adjustment_for("email"), 0.0);
    }

    #[test]
    fn set_adjustment_clamps_to_spec_bound() {
        let mut insights = ContextInsights::default();
        insights.set_adjustment("creditcard", 999.0);
        assert_eq!(insights.adjustment_for("creditcard"), 50.0);
        insights.set_adjustment("creditcard", -999.0);
        assert_eq!(insights.adjustment_for("creditcard"), -50.0);
    }

    #[test]
    fn signals_on_line_empty_by_default() {
        let insights = ContextInsights::default();
        assert!(insights.signals_on_line(1).is_empty());
    }
}
