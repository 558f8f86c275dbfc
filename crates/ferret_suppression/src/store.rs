//! Rule store and matching (spec §4.8): rules are evaluated in insertion
//! order; the first enabled rule whose filters all match wins. A rule
//! whose `expires_at` has passed still wins the match but tags the result
//! `expired=true` rather than falling through to later rules.

use crate::fingerprint::fingerprint;
use chrono::{DateTime, Utc};
use ferret_ids::SuppressionRuleId;
use ferret_protocol::{Finding, SuppressedFinding, SuppressionRule};
use glob::Pattern;

#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    /// Primary storage is insertion-ordered; matching depends on it.
    rules: Vec<SuppressionRule>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: Vec<SuppressionRule>) -> Self {
        Self { rules }
    }

    pub fn add(&mut self, rule: SuppressionRule) {
        self.rules.push(rule);
    }

    pub fn remove(&mut self, id: SuppressionRuleId) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        self.rules.len() != before
    }

    pub fn rules(&self) -> &[SuppressionRule] {
        &self.rules
    }

    fn matches(rule: &SuppressionRule, finding: &Finding) -> bool {
        if !rule.enabled {
            return false;
        }
        if let Some(validator) = &rule.validator {
            if validator != &finding.validator {
                return false;
            }
        }
        if let Some(r#type) = &rule.r#type {
            if r#type != &finding.r#type {
                return false;
            }
        }
        if let Some(text) = &rule.text {
            if text != &finding.text {
                return false;
            }
        }
        if let Some(expected) = &rule.fingerprint {
            if expected != &fingerprint(finding) {
                return false;
            }
        }
        if let Some(glob) = &rule.path_glob {
            match Pattern::new(glob) {
                Ok(pattern) if pattern.matches(&finding.filename) => {}
                _ => return false,
            }
        }
        true
    }

    /// First matching rule in insertion order, if any.
    pub fn match_finding(&self, finding: &Finding) -> Option<&SuppressionRule> {
        self.rules.iter().find(|rule| Self::matches(rule, finding))
    }

    /// Splits `findings` into the active and suppressed partitions (spec
    /// §4.8, §8 partition law: `active ∩ suppressed = ∅`,
    /// `active ∪ suppressed = all_findings`).
    pub fn partition(&self, findings: Vec<Finding>, now: DateTime<Utc>) -> (Vec<Finding>, Vec<SuppressedFinding>) {
        let mut active = Vec::new();
        let mut suppressed = Vec::new();

        for finding in findings {
            match self.match_finding(&finding) {
                Some(rule) => {
                    let expired = rule.is_expired(now);
                    suppressed.push(SuppressedFinding { finding, rule_id: rule.id.clone(), expired });
                }
                None => active.push(finding),
            }
        }

        (active, suppressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_protocol::Context;

    fn rule(validator: &str, r#type: &str, enabled: bool) -> SuppressionRule {
        SuppressionRule {
            id: SuppressionRuleId::new(),
            validator: Some(validator.to_string()),
            r#type: Some(r#type.to_string()),
            text: None,
            fingerprint: None,
            path_glob: None,
            enabled,
            expires_at: None,
            reason: "test".to_string(),
        }
    }

    fn finding() -> Finding {
        Finding::new("EMAIL/GMAIL", "alice@gmail.com", 3, 80.0, "email", "contacts.csv", Context::default())
    }

    #[test]
    fn enabled_matching_rule_suppresses_the_finding() {
        let mut store = RuleStore::new();
        store.add(rule("email", "EMAIL/GMAIL", true));
        let (active, suppressed) = store.partition(vec![finding()], Utc::now());
        assert!(active.is_empty());
        assert_eq!(suppressed.len(), 1);
        assert!(!suppressed[0].expired);
    }

    #[test]
    fn disabled_rule_does_not_suppress() {
        let mut store = RuleStore::new();
        store.add(rule("email", "EMAIL/GMAIL", false));
        let (active, suppressed) = store.partition(vec![finding()], Utc::now());
        assert_eq!(active.len(), 1);
        assert!(suppressed.is_empty());
    }

    #[test]
    fn expired_rule_still_suppresses_but_is_flagged() {
        let mut store = RuleStore::new();
        let mut r = rule("email", "EMAIL/GMAIL", true);
        r.expires_at = Some(Utc::now() - chrono::Duration::days(1));
        store.add(r);
        let (active, suppressed) = store.partition(vec![finding()], Utc::now());
        assert!(active.is_empty());
        assert!(suppressed[0].expired);
    }

    #[test]
    fn first_matching_rule_in_insertion_order_wins() {
        let mut store = RuleStore::new();
        let first = rule("email", "EMAIL/GMAIL", true);
        let first_id = first.id.clone();
        store.add(first);
        store.add(rule("email", "EMAIL/GMAIL", true));
        let (_, suppressed) = store.partition(vec![finding()], Utc::now());
        assert_eq!(suppressed[0].rule_id, first_id);
    }

    #[test]
    fn path_glob_filter_restricts_matches() {
        let mut store = RuleStore::new();
        let mut r = rule("email", "EMAIL/GMAIL", true);
        r.path_glob = Some("*.yaml".to_string());
        store.add(r);
        let (active, suppressed) = store.partition(vec![finding()], Utc::now());
        assert_eq!(active.len(), 1);
        assert!(suppressed.is_empty());
    }

    #[test]
    fn partition_covers_every_finding_exactly_once() {
        let mut store = RuleStore::new();
        store.add(rule("email", "EMAIL/GMAIL", true));
        let findings = vec![finding(), Finding::new("SSN", "123-45-6789", 1, 70.0, "ssn", "x.csv", Context::default())];
        let (active, suppressed) = store.partition(findings, Utc::now());
        assert_eq!(active.len() + suppressed.len(), 2);
    }
}
