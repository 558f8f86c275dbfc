//! Generation mode (spec §4.8): writes the current findings as disabled
//! rules so the user can review and enable each one explicitly rather than
//! having the tool silently start suppressing anything.

use crate::fingerprint::fingerprint;
use ferret_ids::SuppressionRuleId;
use ferret_protocol::{Finding, SuppressionRule};

pub fn generate_rules(findings: &[Finding]) -> Vec<SuppressionRule> {
    findings
        .iter()
        .map(|finding| SuppressionRule {
            id: SuppressionRuleId::new(),
            validator: Some(finding.validator.clone()),
            r#type: Some(finding.r#type.clone()),
            text: None,
            fingerprint: Some(fingerprint(finding)),
            path_glob: Some(finding.filename.clone()),
            enabled: false,
            expires_at: None,
            reason: "generated from scan results; review before enabling".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferret_protocol::Context;

    #[test]
    fn generated_rules_are_disabled_by_default() {
        let finding = Finding::new("SSN", "123-45-6789", 2, 70.0, "ssn", "hr.csv", Context::default());
        let rules = generate_rules(std::slice::from_ref(&finding));
        assert_eq!(rules.len(), 1);
        assert!(!rules[0].enabled);
        assert_eq!(rules[0].fingerprint, Some(fingerprint(&finding)));
    }
}
