//! Enhanced Validator Manager (spec §4.6): fans a single `RoutedContent`
//! out to every enabled validator and folds their raw findings with
//! context adjustments, cross-validator boosts, and per-validator
//! calibration.

use ferret_context::ContextAnalyzer;
use ferret_protocol::{ContextInsights, Finding, RoutedContent};
use ferret_validators::{MetadataValidator, Validator};
use std::panic::{self, AssertUnwindSafe};

pub struct ManagerConfig {
    pub batch_size: usize,
    pub parallel_width: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self { batch_size: 100, parallel_width: 8 }
    }
}

/// One item submitted to the manager: a file's routed content plus the
/// extension the context analyzer uses for structure-hint pre-emption.
pub struct ManagerItem<'a> {
    pub filename: &'a str,
    pub extension: &'a str,
    pub routed: &'a RoutedContent,
}

pub struct ValidatorManager {
    validators: Vec<Box<dyn Validator>>,
    metadata_validator: MetadataValidator,
    config: ManagerConfig,
}

impl ValidatorManager {
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators, metadata_validator: MetadataValidator, config: ManagerConfig::default() }
    }

    pub fn with_config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Processes a batch of items, respecting `batch_size` by chunking the
    /// caller-provided slice; each item's validator fan-out respects
    /// `parallel_width` independently (spec §4.6 step 1).
    pub fn process_batch(&self, items: &[ManagerItem<'_>]) -> Vec<Finding> {
        let mut out = Vec::new();
        for chunk in items.chunks(self.config.batch_size.max(1)) {
            for item in chunk {
                out.extend(self.process_one(item));
            }
        }
        out
    }

    /// Runs the whole per-file contract: analyze once, fan out, fold (spec
    /// §4.6 steps 2-8).
    pub fn process_one(&self, item: &ManagerItem<'_>) -> Vec<Finding> {
        let insights = ContextAnalyzer.analyze(&item.routed.document_body, item.extension);

        let mut raw_findings = self.run_body_validators(&item.routed.document_body, item.filename);
        for blob in &item.routed.metadata_blobs {
            raw_findings.extend(self.metadata_validator.validate_blob(blob, item.filename));
        }

        self.fold(raw_findings, &insights)
    }

    /// Fans the document body out across enabled validators in groups of
    /// `parallel_width`. A validator panic is caught and logged; it never
    /// takes the batch down (spec §7 error kind 3).
    fn run_body_validators(&self, body: &str, filename: &str) -> Vec<Finding> {
        let mut out = Vec::new();
        let width = self.config.parallel_width.max(1);

        for group in self.validators.chunks(width) {
            std::thread::scope(|scope| {
                let handles: Vec<_> = group
                    .iter()
                    .map(|validator| {
                        scope.spawn(move || {
                            let result = panic::catch_unwind(AssertUnwindSafe(|| validator.validate(body, filename)));
                            match result {
                                Ok(findings) => findings,
                                Err(_) => {
                                    tracing::error!(validator = validator.name(), "validator panicked; skipping");
                                    Vec::new()
                                }
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    out.extend(handle.join().unwrap_or_default());
                }
            });
        }

        out
    }

    /// Applies context adjustments, cross-validator signal boosts, and
    /// per-validator calibration, dropping anything that lands at or below
    /// zero (spec §4.6 steps 4-7).
    fn fold(&self, findings: Vec<Finding>, insights: &ContextInsights) -> Vec<Finding> {
        findings
            .into_iter()
            .filter_map(|mut finding| {
                let mut confidence = finding.confidence + insights.adjustment_for(&finding.validator);

                for signal in insights.signals_on_line(finding.line_number) {
                    if signal.validators.iter().any(|v| v == &finding.validator) {
                        confidence += signal.impact;
                    }
                }

                confidence = confidence.clamp(0.0, 100.0);

                if let Some(validator) = self.validators.iter().find(|v| v.name() == finding.validator) {
                    confidence = validator.calibrate(confidence).clamp(0.0, 100.0);
                }

                if confidence <= 0.0 {
                    return None;
                }

                finding.confidence = (confidence * 10.0).round() / 10.0;
                Some(finding)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_protocol::{MetadataBlob, MetadataKind};

    struct AlwaysMatch;
    impl Validator for AlwaysMatch {
        fn name(&self) -> &'static str {
            "always_match"
        }
        fn supported_types(&self) -> &'static [&'static str] {
            &["TEST"]
        }
        fn validate(&self, content: &str, filename: &str) -> Vec<Finding> {
            let context = ferret_protocol::Context {
                before_text: String::new(),
                after_text: String::new(),
                full_line: content.lines().next().unwrap_or_default().to_string(),
                positive_keywords: Vec::new(),
                negative_keywords: Vec::new(),
                confidence_impact: 0.0,
            };
            vec![Finding::new("TEST", content.lines().next().unwrap_or_default(), 1, 50.0, self.name(), filename, context)]
        }
    }

    struct AlwaysPanics;
    impl Validator for AlwaysPanics {
        fn name(&self) -> &'static str {
            "always_panics"
        }
        fn supported_types(&self) -> &'static [&'static str] {
            &["TEST"]
        }
        fn validate(&self, _content: &str, _filename: &str) -> Vec<Finding> {
            panic!("boom");
        }
    }

    #[test]
    fn tabular_csv_boosts_ssn_through_context_adjustment() {
        let manager = ValidatorManager::new(ferret_validators::default_body_validators());
        let routed = RoutedContent::body_only("name,ssn,phone\nAlice,123-45-6789,555-123-4567\n".to_string());
        let item = ManagerItem { filename: "data.csv", extension: "csv", routed: &routed };
        let findings = manager.process_one(&item);
        assert!(findings.iter().any(|f| f.r#type == "SSN" && f.confidence > 60.0));
    }

    #[test]
    fn metadata_blob_is_validated_with_its_own_line_origin() {
        let manager = ValidatorManager::new(Vec::new());
        let routed = RoutedContent {
            document_body: String::new(),
            metadata_blobs: vec![MetadataBlob::new(MetadataKind::Pdf, "Author: Jane Doe".to_string())],
        };
        let item = ManagerItem { filename: "resume.pdf", extension: "pdf", routed: &routed };
        let findings = manager.process_one(&item);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].r#type, "PERSON_NAME");
    }

    #[test]
    fn panicking_validator_is_isolated_and_others_still_run() {
        let manager = ValidatorManager::new(vec![Box::new(AlwaysPanics), Box::new(AlwaysMatch)]);
        let routed = RoutedContent::body_only("hello world\n".to_string());
        let item = ManagerItem { filename: "x.txt", extension: "txt", routed: &routed };
        let findings = manager.process_one(&item);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].validator, "always_match");
    }
}
