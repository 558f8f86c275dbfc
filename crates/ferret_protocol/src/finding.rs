//! [`Finding`] and its attached [`Context`] — the immutable data carrier
//! produced inside a validator and decorated (but never mutated in place)
//! by the Enhanced Validator Manager.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Surrounding text captured around a match, plus the keyword evidence and
/// net confidence adjustment the validator's context phase computed from
/// it (spec §3, §4.5 step 5).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub before_text: String,
    pub after_text: String,
    pub full_line: String,
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
    /// Signed delta this validator's context phase applied to its own raw
    /// confidence. Manager-level adjustments (§4.6) are tracked separately
    /// on the `Finding`, not folded in here, per open question (c).
    pub confidence_impact: f64,
}

/// A single sensitive-data match produced by a validator.
///
/// Immutable after the validator returns it; the manager may only adjust
/// `confidence` (clamped to `[0, 100]`) when folding in context and
/// cross-validator signals — every other field is fixed at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Validator-specific category, e.g. `"CREDIT_CARD"`, `"EMAIL/GMAIL"`,
    /// `"PASSPORT"`.
    pub r#type: String,
    /// The raw matched substring. Always a substring of
    /// `context.full_line` (spec invariant 1). May be swapped for a
    /// placeholder by a formatter at emission time, never by the pipeline.
    pub text: String,
    /// 1-based, within whichever stream (body or metadata) this finding was
    /// routed from (spec invariant 2: always `>= 1`).
    pub line_number: usize,
    /// `[0, 100]`, rounded to at most one decimal place on emission (spec
    /// invariant 3).
    pub confidence: f64,
    /// Name tag of the validator that produced this finding, e.g.
    /// `"creditcard"`.
    pub validator: String,
    /// The original file path (not the preprocessor's temporary path),
    /// possibly a `"<parent> -> <child>"` breadcrumb for embedded media.
    pub filename: String,
    pub context: Context,
    /// Open, string-keyed bag of validator-specific attributes (BIN/brand
    /// tag for credit cards, email domain type, country code for phone,
    /// …). `BTreeMap` keeps emission order deterministic.
    pub metadata: BTreeMap<String, String>,
}

impl Finding {
    /// Construct a finding with raw (pre-manager) confidence. Validators
    /// must call this rather than building the struct directly so the
    /// `text ⊆ context.full_line` invariant has one enforcement point.
    pub fn new(
        r#type: impl Into<String>,
        text: impl Into<String>,
        line_number: usize,
        confidence: f64,
        validator: impl Into<String>,
        filename: impl Into<String>,
        context: Context,
    ) -> Self {
        let text = text.into();
        debug_assert!(
            context.full_line.contains(&text),
            "finding text must be a substring of its context's full_line"
        );
        debug_assert!(line_number >= 1, "line_number must be 1-based");
        Self {
            r#type: r#type.into(),
            text,
            line_number,
            confidence: confidence.clamp(0.0, 100.0),
            validator: validator.into(),
            filename: filename.into(),
            context,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Round confidence to at most one decimal place, per spec invariant 3.
    /// Called once, at emission time, so intermediate manager adjustments
    /// can keep full precision.
    pub fn rounded_confidence(&self) -> f64 {
        (self.confidence * 10.0).round() / 10.0
    }

    /// Apply a signed confidence delta, clamped to `[0, 100]` (spec §4.6
    /// steps 4–5).
    pub fn adjust_confidence(&mut self, delta: f64) {
        self.confidence = (self.confidence + delta).clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(line: &str) -> Context {
        Context {
            full_line: line.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn new_clamps_confidence_into_range() {
        let f = Finding::new("EMAIL", "a@b.com", 1, 150.0, "email", "f.txt", ctx("a@b.com seen"));
        assert_eq!(f.confidence, 100.0);
        let f = Finding::new("EMAIL", "a@b.com", 1, -5.0, "email", "f.txt", ctx("a@b.com seen"));
        assert_eq!(f.confidence, 0.0);
    }

    #[test]
    fn adjust_confidence_clamps_both_directions() {
        let mut f = Finding::new("EMAIL", "a@b.com", 1, 95.0, "email", "f.txt", ctx("a@b.com seen"));
        f.adjust_confidence(20.0);
        assert_eq!(f.confidence, 100.0);
        f.adjust_confidence(-200.0);
        assert_eq!(f.confidence, 0.0);
    }

    #[test]
    fn rounded_confidence_keeps_one_decimal() {
        let f = Finding::new("EMAIL", "a@b.com", 1, 83.46, "email", "f.txt", ctx("a@b.com seen"));
        assert_eq!(f.rounded_confidence(), 83.5);
    }

    #[test]
    #[should_panic]
    fn debug_build_rejects_text_not_in_full_line() {
        let _ = Finding::new("EMAIL", "not-present", 1, 50.0, "email", "f.txt", ctx("a@b.com seen"));
    }
}
